//! Sensor abstraction traits

/// Errors that can occur when reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not respond (bus error, open circuit)
    NotResponding,
    /// Reading outside the plausible range
    OutOfRange,
    /// Sensor has not produced a sample yet
    NotReady,
}

/// Trait for the capacitive proximity sensor on the claw
///
/// Reads true when an object is in gripping range.
pub trait ProximitySensor {
    /// Check whether an object is detected
    fn is_triggered(&mut self) -> Result<bool, SensorError>;
}

/// Trait for the yaw heading source
///
/// Heading is in 0.1 degree units, positive clockwise, relative to an
/// arbitrary zero chosen by the implementation.
pub trait HeadingSensor {
    /// Read the current heading (0.1 degree units)
    fn heading_deg_x10(&mut self) -> Result<i16, SensorError>;
}
