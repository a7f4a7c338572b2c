//! Heading estimate from gyro rate samples
//!
//! Integrates yaw rate into a heading. Good enough for short
//! heading-hold runs; drift is not compensated.

use pincer_core::traits::{HeadingSensor, SensorError};

/// Yaw-rate integrating heading estimate
///
/// Heading is kept in 0.001 degree units internally to limit
/// integration rounding, and reported in 0.1 degree units wrapped to
/// -1800..=1800.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroHeading {
    /// Accumulated heading in millidegrees
    heading_mdeg: i64,
}

impl GyroHeading {
    /// Create a heading estimate at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the heading to zero
    pub fn reset(&mut self) {
        self.heading_mdeg = 0;
    }

    /// Ingest one yaw rate sample
    ///
    /// `rate_dps_x10` is the angular rate in 0.1 °/s units, positive
    /// clockwise; `delta_ms` is the time since the previous sample.
    pub fn ingest(&mut self, rate_dps_x10: i16, delta_ms: u32) {
        // 0.1 °/s * ms = 0.0001 ° -> /10 for millidegrees
        self.heading_mdeg += rate_dps_x10 as i64 * delta_ms as i64 / 10;
    }

    /// Current heading in 0.1 degree units, wrapped to -1800..=1800
    pub fn current_deg_x10(&self) -> i16 {
        let wrapped = self.heading_mdeg.rem_euclid(360_000);
        let centered = if wrapped > 180_000 {
            wrapped - 360_000
        } else {
            wrapped
        };
        (centered / 100) as i16
    }
}

impl HeadingSensor for GyroHeading {
    fn heading_deg_x10(&mut self) -> Result<i16, SensorError> {
        Ok(self.current_deg_x10())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(GyroHeading::new().current_deg_x10(), 0);
    }

    #[test]
    fn test_integrates_rate() {
        let mut h = GyroHeading::new();
        // 90 °/s for 500 ms = 45°
        for _ in 0..50 {
            h.ingest(900, 10);
        }
        assert_eq!(h.current_deg_x10(), 450);
    }

    #[test]
    fn test_negative_rate() {
        let mut h = GyroHeading::new();
        h.ingest(-900, 1000); // -90°
        assert_eq!(h.current_deg_x10(), -900);
    }

    #[test]
    fn test_wraps_past_half_turn() {
        let mut h = GyroHeading::new();
        h.ingest(900, 3000); // 270° -> reported as -90°
        assert_eq!(h.current_deg_x10(), -900);
    }

    #[test]
    fn test_reset() {
        let mut h = GyroHeading::new();
        h.ingest(900, 1000);
        h.reset();
        assert_eq!(h.current_deg_x10(), 0);
    }
}
