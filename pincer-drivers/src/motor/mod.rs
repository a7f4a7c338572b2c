//! Chassis motor drivers

pub mod hbridge;

pub use hbridge::{HBridgeConfig, HBridgeMotor};
