//! Analog sensor drivers

pub mod capacitive;
pub mod tumbler;

pub use capacitive::{AdcReader, CapacitiveSensor, CapacitiveSensorConfig};
pub use tumbler::TumblerReader;
