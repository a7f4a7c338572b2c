//! Differential-drive power mixing
//!
//! The chassis has one motor per side. Steering works by reducing power
//! on the inner wheel: for a requested steering angle the inner side is
//! scaled down by `turn_gain * |angle| / 90` while the outer side stays
//! at cruise power. The scaled power is clamped at zero so a sharp turn
//! pivots rather than counter-rotating.

use crate::config::ChassisConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Signed power pair for the two chassis sides
///
/// Percent units, -100..=100. Positive drives forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrivePower {
    /// Left side power (percent)
    pub left: i8,
    /// Right side power (percent)
    pub right: i8,
}

impl DrivePower {
    /// Both sides stopped
    pub const STOP: Self = Self { left: 0, right: 0 };

    /// Create a clamped power pair
    pub fn new(left: i16, right: i16) -> Self {
        Self {
            left: clamp_percent(left),
            right: clamp_percent(right),
        }
    }

    /// Both sides at the same power
    pub const fn straight(power: i8) -> Self {
        Self {
            left: power,
            right: power,
        }
    }

    /// Check if both sides are stopped
    pub fn is_stopped(&self) -> bool {
        self.left == 0 && self.right == 0
    }

    /// Reverse both sides
    pub fn reversed(self) -> Self {
        Self {
            left: self.left.saturating_neg(),
            right: self.right.saturating_neg(),
        }
    }
}

/// Clamp a power value to the valid percent range
pub fn clamp_percent(power: i16) -> i8 {
    power.clamp(-100, 100) as i8
}

/// Mix a steering angle into per-side powers
///
/// `angle_deg` is -90..=90: negative steers left (left wheel slows),
/// positive steers right. `base` is the signed cruise power; its sign
/// carries through, so the same mix works in reverse.
///
/// The inner wheel is scaled by `base * turn_gain * |angle| / 90` and
/// clamped at zero, never reversed.
pub fn steer(config: &ChassisConfig, base: i8, angle_deg: i16) -> DrivePower {
    let angle = angle_deg.clamp(-90, 90);
    let base = base.clamp(-100, 100) as i32;

    // Reduction for the inner wheel, in percent of base
    let cut = base.abs() * angle.unsigned_abs() as i32 * config.turn_gain_x100 as i32 / (90 * 100);
    let inner = (base.abs() - cut).max(0);

    // Restore the sign of the cruise power
    let inner = if base < 0 { -inner } else { inner };

    if angle < 0 {
        DrivePower::new(inner as i16, base as i16)
    } else {
        DrivePower::new(base as i16, inner as i16)
    }
}

/// Mix a steering angle at the configured cruise power
pub fn steer_at_cruise(config: &ChassisConfig, angle_deg: i16) -> DrivePower {
    steer(config, config.max_power, angle_deg)
}
