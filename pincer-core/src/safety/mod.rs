//! Safety monitoring

pub mod monitor;

pub use monitor::{SafetyMonitor, SafetyStatus};
