//! Tumbler switch decoding
//!
//! Two physical tumblers select the operating mode: the mode tumbler
//! starts the grab sequence, the middle tumbler hands control to the
//! Raspberry Pi link. Both are read as analog levels against a single
//! threshold and debounced by requiring consecutive identical decodes.

use crate::config::TumblerConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decoded tumbler position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModeSelect {
    /// Both tumblers up
    #[default]
    Neutral,
    /// Mode tumbler down: run the grab sequence
    Grab,
    /// Middle tumbler down: Raspberry Pi control
    Remote,
}

/// Debounced two-tumbler decoder
#[derive(Debug, Clone)]
pub struct TumblerBank {
    config: TumblerConfig,
    /// Last debounced mode
    stable: ModeSelect,
    /// Mode currently being counted toward stability
    candidate: ModeSelect,
    /// Consecutive reads of `candidate`
    count: u8,
}

impl TumblerBank {
    /// Create a decoder starting in neutral
    pub fn new(config: TumblerConfig) -> Self {
        Self {
            config,
            stable: ModeSelect::Neutral,
            candidate: ModeSelect::Neutral,
            count: 0,
        }
    }

    /// Get the current debounced mode
    pub fn mode(&self) -> ModeSelect {
        self.stable
    }

    /// Decode raw ADC levels into a mode
    ///
    /// The grab tumbler wins if both are thrown.
    pub fn decode(&self, grab_raw: u16, remote_raw: u16) -> ModeSelect {
        if grab_raw > self.config.on_threshold {
            ModeSelect::Grab
        } else if remote_raw > self.config.on_threshold {
            ModeSelect::Remote
        } else {
            ModeSelect::Neutral
        }
    }

    /// Feed one pair of raw readings
    ///
    /// Returns the new mode once it has been stable for the configured
    /// number of samples, or None if the debounced mode is unchanged.
    pub fn update(&mut self, grab_raw: u16, remote_raw: u16) -> Option<ModeSelect> {
        let read = self.decode(grab_raw, remote_raw);

        if read == self.candidate {
            self.count = self.count.saturating_add(1);
        } else {
            self.candidate = read;
            self.count = 1;
        }

        if self.candidate != self.stable && self.count >= self.config.debounce_samples {
            self.stable = self.candidate;
            return Some(self.stable);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> TumblerBank {
        TumblerBank::new(TumblerConfig {
            on_threshold: 700,
            debounce_samples: 3,
        })
    }

    #[test]
    fn test_decode_thresholds() {
        let bank = bank();
        assert_eq!(bank.decode(0, 0), ModeSelect::Neutral);
        assert_eq!(bank.decode(900, 0), ModeSelect::Grab);
        assert_eq!(bank.decode(0, 900), ModeSelect::Remote);
        // Exactly at the threshold still reads as off
        assert_eq!(bank.decode(700, 700), ModeSelect::Neutral);
    }

    #[test]
    fn test_grab_wins_over_remote() {
        let bank = bank();
        assert_eq!(bank.decode(900, 900), ModeSelect::Grab);
    }

    #[test]
    fn test_debounce_requires_consecutive_reads() {
        let mut bank = bank();

        assert_eq!(bank.update(900, 0), None);
        assert_eq!(bank.update(900, 0), None);
        assert_eq!(bank.update(900, 0), Some(ModeSelect::Grab));
        assert_eq!(bank.mode(), ModeSelect::Grab);

        // Already stable: no repeated notification
        assert_eq!(bank.update(900, 0), None);
    }

    #[test]
    fn test_glitch_resets_debounce() {
        let mut bank = bank();

        assert_eq!(bank.update(900, 0), None);
        assert_eq!(bank.update(0, 0), None); // bounce
        assert_eq!(bank.update(900, 0), None);
        assert_eq!(bank.update(900, 0), None);
        assert_eq!(bank.update(900, 0), Some(ModeSelect::Grab));
    }

    #[test]
    fn test_release_back_to_neutral() {
        let mut bank = bank();
        for _ in 0..3 {
            bank.update(0, 900);
        }
        assert_eq!(bank.mode(), ModeSelect::Remote);

        assert_eq!(bank.update(0, 0), None);
        assert_eq!(bank.update(0, 0), None);
        assert_eq!(bank.update(0, 0), Some(ModeSelect::Neutral));
    }
}
