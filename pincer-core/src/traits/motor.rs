//! Chassis motor driver traits
//!
//! The chassis uses two brushed DC motors behind H-bridge drivers.
//! Power is a signed percentage: positive drives forward, negative
//! reverses, zero releases both bridge legs so the motor coasts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Motor is disabled
    Disabled,
    /// Power value outside -100..=100
    InvalidPower,
}

/// Ramp state of a chassis motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotorState {
    /// Motor is stopped, both bridge legs released
    #[default]
    Stopped,
    /// Motor is ramping toward its target power
    Ramping,
    /// Motor is running at target power
    Running,
}

/// Base trait for motor drivers
pub trait MotorDriver {
    /// Enable or disable the driver
    ///
    /// When disabled, the motor coasts to a stop and ignores power
    /// commands.
    fn enable(&mut self, enabled: bool);

    /// Check if the driver is enabled
    fn is_enabled(&self) -> bool;

    /// Stop the motor (begin ramping to zero)
    fn stop(&mut self);

    /// Check if the motor is fully stopped
    fn is_stopped(&self) -> bool;
}

/// Trait for signed-power chassis motors
///
/// Power is a percentage in -100..=100. The sign selects the H-bridge
/// direction: IN-A high for forward, IN-B high for reverse, both low
/// at zero power.
pub trait ChassisMotorDriver: MotorDriver {
    /// Set the target power percentage
    fn set_power(&mut self, percent: i8) -> Result<(), MotorError>;

    /// Get the current target power
    fn get_power(&self) -> i8;

    /// Get the current actual power (may differ during ramping)
    fn get_actual_power(&self) -> i8;

    /// Check if the motor has reached its target power
    fn is_at_power(&self) -> bool {
        self.get_power() == self.get_actual_power()
    }

    /// Update the motor state (call periodically for ramping)
    ///
    /// Returns the unsigned PWM duty to apply (0-100).
    fn update(&mut self) -> u8;
}
