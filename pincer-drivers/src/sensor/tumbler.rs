//! Tumbler switch ADC reader
//!
//! Reads the two tumbler channels and feeds the raw levels to the
//! core's debounced decoder. The tumblers share a resistor ladder, so
//! they arrive as analog levels rather than clean logic inputs.

use pincer_core::config::TumblerConfig;
use pincer_core::switches::{ModeSelect, TumblerBank};
use pincer_core::traits::SensorError;

use super::capacitive::AdcReader;

/// Two-channel tumbler reader
pub struct TumblerReader<A, B> {
    grab_adc: A,
    remote_adc: B,
    bank: TumblerBank,
}

impl<A: AdcReader, B: AdcReader> TumblerReader<A, B> {
    /// Create a reader over the two tumbler ADC channels
    pub fn new(grab_adc: A, remote_adc: B, config: TumblerConfig) -> Self {
        Self {
            grab_adc,
            remote_adc,
            bank: TumblerBank::new(config),
        }
    }

    /// Current debounced mode
    pub fn mode(&self) -> ModeSelect {
        self.bank.mode()
    }

    /// Sample both channels once
    ///
    /// Returns the new mode if the debounced selection changed.
    pub fn poll(&mut self) -> Result<Option<ModeSelect>, SensorError> {
        let grab = self
            .grab_adc
            .read()
            .map_err(|_| SensorError::NotResponding)?;
        let remote = self
            .remote_adc
            .read()
            .map_err(|_| SensorError::NotResponding)?;

        Ok(self.bank.update(grab, remote))
    }
}
