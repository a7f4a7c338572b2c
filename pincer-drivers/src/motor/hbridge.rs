//! H-bridge DC motor driver
//!
//! Drives one chassis side through an H-bridge (IN-A, IN-B, PWM).
//! Power is signed percent; the sign picks the active bridge leg and
//! the magnitude becomes the PWM duty, scaled above the dead zone where
//! the motor will not turn. Power changes are slew-limited so direction
//! reversals always pass through zero.
//!
//! # Usage
//!
//! The driver is updated by calling `update()` periodically. This
//! returns the duty cycle to apply to the PWM output; the bridge leg
//! states come from `in_a_state()`/`in_b_state()`.
//!
//! ```ignore
//! let mut motor = HBridgeMotor::new(config);
//! motor.enable(true);
//! motor.set_power(-30)?; // 30% reverse
//!
//! // In periodic timer task:
//! let duty = motor.update();
//! pwm.set_duty(duty);
//! in_a.set_level(motor.in_a_state());
//! in_b.set_level(motor.in_b_state());
//! ```

use pincer_core::traits::{ChassisMotorDriver, MotorDriver, MotorError, MotorState};

/// H-bridge motor configuration
#[derive(Debug, Clone)]
pub struct HBridgeConfig {
    /// Minimum duty cycle percentage (below this the motor won't turn)
    pub min_duty: u8,
    /// Time to slew from 0 to 100% power (ms, 0 = instant)
    pub ramp_ms: u16,
    /// Motor is mounted reversed; swaps the bridge legs
    pub inverted: bool,
}

impl Default for HBridgeConfig {
    fn default() -> Self {
        Self {
            min_duty: 12,
            ramp_ms: 300,
            inverted: false,
        }
    }
}

/// H-bridge DC motor driver state
pub struct HBridgeMotor {
    config: HBridgeConfig,
    /// Target power (signed percent)
    target: i8,
    /// Current actual power (signed percent, during slewing)
    actual: i8,
    /// Whether the driver is enabled
    enabled: bool,
    /// Fractional slew progress in power-milli-percent
    slew_accum_mpct: u32,
}

impl HBridgeMotor {
    /// Create a new H-bridge motor driver
    pub fn new(config: HBridgeConfig) -> Self {
        Self {
            config,
            target: 0,
            actual: 0,
            enabled: false,
            slew_accum_mpct: 0,
        }
    }

    /// Get the current ramp state
    pub fn state(&self) -> MotorState {
        if self.actual == 0 && self.target == 0 {
            MotorState::Stopped
        } else if self.actual != self.target {
            MotorState::Ramping
        } else {
            MotorState::Running
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &HBridgeConfig {
        &self.config
    }

    /// IN-A pin level (forward leg)
    pub fn in_a_state(&self) -> bool {
        let forward = self.actual > 0;
        forward != self.config.inverted
    }

    /// IN-B pin level (reverse leg)
    pub fn in_b_state(&self) -> bool {
        let reverse = self.actual < 0;
        reverse != self.config.inverted
    }

    /// Scale a power magnitude to the actual duty cycle
    ///
    /// Maps 1-100% onto min_duty-100% so the motor always gets enough
    /// duty to turn; zero stays zero (both legs released, coast).
    fn scale_duty(&self, magnitude: u8) -> u8 {
        if magnitude == 0 {
            0
        } else {
            let min = self.config.min_duty as u32;
            let range = 100 - min;
            let scaled = min + (magnitude as u32 * range / 100);
            scaled.min(100) as u8
        }
    }

    /// Update for a specific time delta (in ms)
    ///
    /// Returns the duty cycle to apply.
    pub fn update_with_delta(&mut self, delta_ms: u32) -> u8 {
        if !self.enabled {
            self.actual = 0;
            self.slew_accum_mpct = 0;
            return 0;
        }

        if self.actual != self.target {
            if self.config.ramp_ms == 0 {
                self.actual = self.target;
                self.slew_accum_mpct = 0;
            } else {
                // Accumulate slew in milli-percent so slow tick rates
                // with short ramps still converge
                self.slew_accum_mpct += delta_ms * 100_000 / self.config.ramp_ms as u32;
                let step = (self.slew_accum_mpct / 1000) as i16;
                if step > 0 {
                    self.slew_accum_mpct %= 1000;
                    let diff = self.target as i16 - self.actual as i16;
                    let applied = diff.clamp(-step, step);
                    self.actual = (self.actual as i16 + applied) as i8;
                }
            }
        }

        self.scale_duty(self.actual.unsigned_abs())
    }

    /// IN-A and IN-B pin levels as a pair
    pub fn bridge_pins(&self) -> (bool, bool) {
        if self.actual == 0 {
            // Coast: both legs released regardless of mounting
            (false, false)
        } else {
            (self.in_a_state(), self.in_b_state())
        }
    }
}

impl MotorDriver for HBridgeMotor {
    fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.target = 0;
            self.actual = 0;
            self.slew_accum_mpct = 0;
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn stop(&mut self) {
        self.target = 0;
    }

    fn is_stopped(&self) -> bool {
        self.actual == 0 && self.target == 0
    }
}

impl ChassisMotorDriver for HBridgeMotor {
    fn set_power(&mut self, percent: i8) -> Result<(), MotorError> {
        if !self.enabled {
            return Err(MotorError::Disabled);
        }
        if !(-100..=100).contains(&percent) {
            return Err(MotorError::InvalidPower);
        }
        self.target = percent;
        Ok(())
    }

    fn get_power(&self) -> i8 {
        self.target
    }

    fn get_actual_power(&self) -> i8 {
        self.actual
    }

    fn update(&mut self) -> u8 {
        // Default 1ms update interval
        self.update_with_delta(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> HBridgeConfig {
        HBridgeConfig {
            min_duty: 0,
            ramp_ms: 0,
            inverted: false,
        }
    }

    #[test]
    fn test_initial_state() {
        let motor = HBridgeMotor::new(HBridgeConfig::default());
        assert!(!motor.is_enabled());
        assert!(motor.is_stopped());
        assert_eq!(motor.get_power(), 0);
        assert_eq!(motor.bridge_pins(), (false, false));
    }

    #[test]
    fn test_set_power_requires_enable() {
        let mut motor = HBridgeMotor::new(instant());
        assert_eq!(motor.set_power(50), Err(MotorError::Disabled));

        motor.enable(true);
        assert_eq!(motor.set_power(50), Ok(()));
    }

    #[test]
    fn test_invalid_power_rejected() {
        let mut motor = HBridgeMotor::new(instant());
        motor.enable(true);
        assert_eq!(motor.set_power(101), Err(MotorError::InvalidPower));
        assert_eq!(motor.set_power(-101), Err(MotorError::InvalidPower));
    }

    #[test]
    fn test_forward_pin_states() {
        let mut motor = HBridgeMotor::new(instant());
        motor.enable(true);
        motor.set_power(50).unwrap();
        motor.update();

        assert_eq!(motor.get_actual_power(), 50);
        assert_eq!(motor.bridge_pins(), (true, false));
    }

    #[test]
    fn test_reverse_pin_states() {
        let mut motor = HBridgeMotor::new(instant());
        motor.enable(true);
        motor.set_power(-50).unwrap();
        motor.update();

        assert_eq!(motor.bridge_pins(), (false, true));
    }

    #[test]
    fn test_inverted_mounting_swaps_legs() {
        let mut motor = HBridgeMotor::new(HBridgeConfig {
            inverted: true,
            ..instant()
        });
        motor.enable(true);
        motor.set_power(50).unwrap();
        motor.update();

        assert_eq!(motor.bridge_pins(), (false, true));
    }

    #[test]
    fn test_zero_power_coasts() {
        let mut motor = HBridgeMotor::new(HBridgeConfig {
            inverted: true,
            ..instant()
        });
        motor.enable(true);
        motor.set_power(50).unwrap();
        motor.update();
        motor.stop();
        motor.update();

        // Both legs released even with inverted mounting
        assert_eq!(motor.bridge_pins(), (false, false));
        assert_eq!(motor.update(), 0);
    }

    #[test]
    fn test_slew_limits_power_change() {
        let mut motor = HBridgeMotor::new(HBridgeConfig {
            min_duty: 0,
            ramp_ms: 100,
            inverted: false,
        });
        motor.enable(true);
        motor.set_power(100).unwrap();

        // 50 ms of a 100 ms ramp: about half power
        let mut duty = 0;
        for _ in 0..50 {
            duty = motor.update();
        }
        assert!(motor.get_actual_power() >= 40 && motor.get_actual_power() <= 60);
        assert_eq!(duty as i8, motor.get_actual_power());

        for _ in 0..60 {
            motor.update();
        }
        assert_eq!(motor.get_actual_power(), 100);
        assert_eq!(motor.state(), MotorState::Running);
    }

    #[test]
    fn test_reversal_passes_through_zero() {
        let mut motor = HBridgeMotor::new(HBridgeConfig {
            min_duty: 0,
            ramp_ms: 100,
            inverted: false,
        });
        motor.enable(true);
        motor.set_power(100).unwrap();
        for _ in 0..110 {
            motor.update();
        }
        assert_eq!(motor.get_actual_power(), 100);

        motor.set_power(-100).unwrap();
        let mut saw_zero = false;
        for _ in 0..210 {
            motor.update();
            if motor.get_actual_power() == 0 {
                saw_zero = true;
            }
        }
        assert!(saw_zero);
        assert_eq!(motor.get_actual_power(), -100);
        assert_eq!(motor.bridge_pins(), (false, true));
    }

    #[test]
    fn test_duty_dead_zone_scaling() {
        let mut motor = HBridgeMotor::new(HBridgeConfig {
            min_duty: 20,
            ramp_ms: 0,
            inverted: false,
        });
        motor.enable(true);

        // 50% power scales to 20 + 50% of 80 = 60
        motor.set_power(50).unwrap();
        assert_eq!(motor.update(), 60);

        // Full power is full duty
        motor.set_power(100).unwrap();
        assert_eq!(motor.update(), 100);

        // Sign does not affect the duty magnitude
        motor.set_power(-50).unwrap();
        assert_eq!(motor.update(), 60);

        // Zero stays zero, not min_duty
        motor.set_power(0).unwrap();
        assert_eq!(motor.update(), 0);
    }

    #[test]
    fn test_disable_releases_motor() {
        let mut motor = HBridgeMotor::new(instant());
        motor.enable(true);
        motor.set_power(80).unwrap();
        motor.update();

        motor.enable(false);
        assert_eq!(motor.update(), 0);
        assert!(motor.is_stopped());
        assert_eq!(motor.bridge_pins(), (false, false));
    }
}
