//! Claw gripper servo driver
//!
//! The claw is a hobby servo with two commanded endpoints. A command
//! starts a settle countdown; the claw reports settled once the servo
//! has had time to reach the endpoint.

use pincer_core::traits::{ActuatorError, ClawDriver, ClawState};

/// Claw servo configuration
#[derive(Debug, Clone)]
pub struct ClawServoConfig {
    /// Pulse width for the open endpoint (µs)
    pub open_us: u16,
    /// Pulse width for the closed endpoint (µs)
    pub closed_us: u16,
    /// Time the servo needs to traverse between endpoints (ms)
    pub settle_ms: u32,
}

impl Default for ClawServoConfig {
    fn default() -> Self {
        Self {
            open_us: 1000,
            closed_us: 1900,
            settle_ms: 500,
        }
    }
}

/// Claw gripper servo
pub struct ClawServo {
    config: ClawServoConfig,
    state: ClawState,
    /// Remaining settle time for the last command (ms)
    settle_remaining_ms: u32,
}

impl ClawServo {
    /// Create a claw driver, starting open and settled
    pub fn new(config: ClawServoConfig) -> Self {
        Self {
            config,
            state: ClawState::Open,
            settle_remaining_ms: 0,
        }
    }

    /// Pulse width for the current commanded state (µs)
    pub fn pulse_us(&self) -> u16 {
        match self.state {
            ClawState::Open => self.config.open_us,
            ClawState::Closed => self.config.closed_us,
        }
    }
}

impl ClawDriver for ClawServo {
    fn set_state(&mut self, state: ClawState) -> Result<(), ActuatorError> {
        if state == self.state {
            return Ok(());
        }
        if !self.is_settled() {
            return Err(ActuatorError::Busy);
        }
        self.state = state;
        self.settle_remaining_ms = self.config.settle_ms;
        Ok(())
    }

    fn state(&self) -> ClawState {
        self.state
    }

    fn is_settled(&self) -> bool {
        self.settle_remaining_ms == 0
    }

    fn update(&mut self, delta_ms: u32) -> u16 {
        self.settle_remaining_ms = self.settle_remaining_ms.saturating_sub(delta_ms);
        self.pulse_us()
    }
}
