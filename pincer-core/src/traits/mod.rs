//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod motor;
pub mod sensor;

pub use actuator::{ActuatorError, ArmDriver, ArmPosition, ClawDriver, ClawState};
pub use motor::{ChassisMotorDriver, MotorDriver, MotorError, MotorState};
pub use sensor::{HeadingSensor, ProximitySensor, SensorError};
