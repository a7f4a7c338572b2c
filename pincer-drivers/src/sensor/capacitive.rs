//! Capacitive proximity sensor
//!
//! The sensor on the claw reads as an analog level that rises sharply
//! when an object is in gripping range. Raw readings are compared
//! against a threshold and debounced with consecutive-sample counting
//! so the approach loop cannot trip on a single noisy sample.

use pincer_core::traits::{ProximitySensor, SensorError};

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read ADC value (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Capacitive sensor configuration
#[derive(Debug, Clone)]
pub struct CapacitiveSensorConfig {
    /// ADC level above which the sensor counts as triggered
    pub threshold: u16,
    /// Consecutive triggered samples required before reporting true
    pub debounce_samples: u8,
}

impl Default for CapacitiveSensorConfig {
    fn default() -> Self {
        Self {
            threshold: 2000,
            debounce_samples: 2,
        }
    }
}

/// Debounced capacitive proximity sensor
pub struct CapacitiveSensor<ADC> {
    adc: ADC,
    config: CapacitiveSensorConfig,
    /// Consecutive triggered samples seen so far
    hit_count: u8,
}

impl<ADC: AdcReader> CapacitiveSensor<ADC> {
    /// Create a new sensor
    pub fn new(adc: ADC, config: CapacitiveSensorConfig) -> Self {
        Self {
            adc,
            config,
            hit_count: 0,
        }
    }

    /// Read one raw sample
    pub fn read_raw(&mut self) -> Result<u16, SensorError> {
        self.adc.read().map_err(|_| SensorError::NotResponding)
    }
}

impl<ADC: AdcReader> ProximitySensor for CapacitiveSensor<ADC> {
    fn is_triggered(&mut self) -> Result<bool, SensorError> {
        let raw = self.read_raw()?;

        if raw > self.config.threshold {
            self.hit_count = self.hit_count.saturating_add(1);
        } else {
            self.hit_count = 0;
        }

        Ok(self.hit_count >= self.config.debounce_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockAdc {
        values: &'static [u16],
        index: usize,
    }

    impl AdcReader for MockAdc {
        fn read(&mut self) -> Result<u16, ()> {
            let v = self.values[self.index.min(self.values.len() - 1)];
            self.index += 1;
            Ok(v)
        }
    }

    struct FailingAdc;

    impl AdcReader for FailingAdc {
        fn read(&mut self) -> Result<u16, ()> {
            Err(())
        }
    }

    fn sensor(values: &'static [u16]) -> CapacitiveSensor<MockAdc> {
        CapacitiveSensor::new(
            MockAdc { values, index: 0 },
            CapacitiveSensorConfig::default(),
        )
    }

    #[test]
    fn test_quiet_sensor() {
        let mut s = sensor(&[100, 200, 150]);
        assert_eq!(s.is_triggered(), Ok(false));
        assert_eq!(s.is_triggered(), Ok(false));
    }

    #[test]
    fn test_debounce_requires_two_samples() {
        let mut s = sensor(&[3000, 3000, 3000]);
        assert_eq!(s.is_triggered(), Ok(false));
        assert_eq!(s.is_triggered(), Ok(true));
    }

    #[test]
    fn test_single_spike_ignored() {
        let mut s = sensor(&[3000, 100, 3000, 100]);
        assert_eq!(s.is_triggered(), Ok(false));
        assert_eq!(s.is_triggered(), Ok(false));
        assert_eq!(s.is_triggered(), Ok(false));
        assert_eq!(s.is_triggered(), Ok(false));
    }

    #[test]
    fn test_adc_failure_propagates() {
        let mut s = CapacitiveSensor::new(FailingAdc, CapacitiveSensorConfig::default());
        assert_eq!(s.is_triggered(), Err(SensorError::NotResponding));
    }
}
