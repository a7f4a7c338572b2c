//! Two-position arm servo driver
//!
//! The arm lifts the claw between the stowed pickup position and the
//! raised carry position. Same settle discipline as the claw.

use pincer_core::traits::{ActuatorError, ArmDriver, ArmPosition};

/// Arm servo configuration
#[derive(Debug, Clone)]
pub struct ArmServoConfig {
    /// Pulse width for the stowed position (µs)
    pub stowed_us: u16,
    /// Pulse width for the carry position (µs)
    pub carry_us: u16,
    /// Time the servo needs to traverse between positions (ms)
    pub settle_ms: u32,
}

impl Default for ArmServoConfig {
    fn default() -> Self {
        Self {
            stowed_us: 1200,
            carry_us: 1800,
            settle_ms: 1000,
        }
    }
}

/// Two-position arm servo
pub struct ArmServo {
    config: ArmServoConfig,
    position: ArmPosition,
    settle_remaining_ms: u32,
}

impl ArmServo {
    /// Create an arm driver, starting stowed and settled
    pub fn new(config: ArmServoConfig) -> Self {
        Self {
            config,
            position: ArmPosition::Stowed,
            settle_remaining_ms: 0,
        }
    }

    /// Pulse width for the current commanded position (µs)
    pub fn pulse_us(&self) -> u16 {
        match self.position {
            ArmPosition::Stowed => self.config.stowed_us,
            ArmPosition::Carry => self.config.carry_us,
        }
    }
}

impl ArmDriver for ArmServo {
    fn set_position(&mut self, pos: ArmPosition) -> Result<(), ActuatorError> {
        if pos == self.position {
            return Ok(());
        }
        if !self.is_settled() {
            return Err(ActuatorError::Busy);
        }
        self.position = pos;
        self.settle_remaining_ms = self.config.settle_ms;
        Ok(())
    }

    fn position(&self) -> ArmPosition {
        self.position
    }

    fn is_settled(&self) -> bool {
        self.settle_remaining_ms == 0
    }

    fn update(&mut self, delta_ms: u32) -> u16 {
        self.settle_remaining_ms = self.settle_remaining_ms.saturating_sub(delta_ms);
        self.pulse_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_stowed() {
        let arm = ArmServo::new(ArmServoConfig::default());
        assert_eq!(arm.position(), ArmPosition::Stowed);
        assert_eq!(arm.pulse_us(), 1200);
        assert!(arm.is_settled());
    }

    #[test]
    fn test_raise_to_carry() {
        let mut arm = ArmServo::new(ArmServoConfig::default());
        arm.set_position(ArmPosition::Carry).unwrap();

        assert_eq!(arm.update(500), 1800);
        assert!(!arm.is_settled());
        arm.update(500);
        assert!(arm.is_settled());
    }

    #[test]
    fn test_lower_mid_raise_is_busy() {
        let mut arm = ArmServo::new(ArmServoConfig::default());
        arm.set_position(ArmPosition::Carry).unwrap();
        arm.update(500);

        assert_eq!(
            arm.set_position(ArmPosition::Stowed),
            Err(ActuatorError::Busy)
        );
        assert_eq!(arm.position(), ArmPosition::Carry);

        arm.update(500);
        assert!(arm.set_position(ArmPosition::Stowed).is_ok());
    }
}
