//! Claw and arm servo drivers

pub mod arm;
pub mod claw;

pub use arm::{ArmServo, ArmServoConfig};
pub use claw::{ClawServo, ClawServoConfig};
