//! Claw and arm actuator traits
//!
//! The end-effector is a gripper claw on a two-position arm. Both are
//! hobby servos: commands take a settle time to complete, so drivers
//! expose an `is_settled` check instead of blocking.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur with actuator operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Commanded to a new endpoint while the previous move is still
    /// settling
    Busy,
}

/// Claw gripper state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClawState {
    /// Claw released
    #[default]
    Open,
    /// Claw gripping
    Closed,
}

impl ClawState {
    /// Claw state for a boolean grip command
    pub fn from_grip(grip: bool) -> Self {
        if grip {
            ClawState::Closed
        } else {
            ClawState::Open
        }
    }
}

/// Arm positions
///
/// `Stowed` is the low pickup position, `Carry` is the raised travel
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArmPosition {
    /// Lowered, ready to grip an object on the ground
    #[default]
    Stowed,
    /// Raised, object held clear of the ground
    Carry,
}

/// Trait for the claw gripper
pub trait ClawDriver {
    /// Command the claw open or closed
    ///
    /// Re-commanding the current state is a no-op; commanding the
    /// other endpoint mid-settle fails with [`ActuatorError::Busy`].
    fn set_state(&mut self, state: ClawState) -> Result<(), ActuatorError>;

    /// Get the commanded claw state
    fn state(&self) -> ClawState;

    /// Check if the last command has finished settling
    fn is_settled(&self) -> bool;

    /// Update the servo (call periodically)
    ///
    /// Returns the pulse width in microseconds to output.
    fn update(&mut self, delta_ms: u32) -> u16;
}

/// Trait for the two-position arm
pub trait ArmDriver {
    /// Command the arm to a position
    ///
    /// Re-commanding the current position is a no-op; commanding the
    /// other position mid-settle fails with [`ActuatorError::Busy`].
    fn set_position(&mut self, pos: ArmPosition) -> Result<(), ActuatorError>;

    /// Get the commanded arm position
    fn position(&self) -> ArmPosition;

    /// Check if the last command has finished settling
    fn is_settled(&self) -> bool;

    /// Update the servo (call periodically)
    ///
    /// Returns the pulse width in microseconds to output.
    fn update(&mut self, delta_ms: u32) -> u16;
}
