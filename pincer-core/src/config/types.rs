//! Configuration type definitions
//!
//! Defaults carry the tuning the robot shipped with: 16% approach power
//! (40/255 on the original 8-bit scale), 1.5 turn gain, and unit PID
//! coefficients at a 30 ms sample time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chassis configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChassisConfig {
    /// Cruise power in percent
    pub max_power: i8,
    /// Steering turn gain ×100 (150 = inner wheel fully cut at 60°)
    pub turn_gain_x100: u16,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            max_power: 30,
            turn_gain_x100: 150,
        }
    }
}

/// Grab routine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrabConfig {
    /// Approach power in percent while creeping toward the object
    pub approach_power: i8,
    /// Maximum time to wait for the proximity sensor during approach (ms)
    pub approach_timeout_ms: u32,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            approach_power: 16,
            approach_timeout_ms: 8000,
        }
    }
}

/// Timings of the fixed grab-and-retreat sequence (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceTimings {
    /// Initial dwell with claw open, chassis stopped
    pub prepare_ms: u32,
    /// Forward run toward the object
    pub advance_ms: u32,
    /// Claw close settle
    pub grip_ms: u32,
    /// Arm raise settle during the scripted sequence
    pub raise_ms: u32,
    /// Reverse run away from the pickup spot
    pub retreat_ms: u32,
    /// Claw close settle in the sensor-terminated grab
    pub approach_grip_ms: u32,
    /// Arm raise settle in the sensor-terminated grab
    pub approach_raise_ms: u32,
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self {
            prepare_ms: 1000,
            advance_ms: 1500,
            grip_ms: 200,
            raise_ms: 200,
            retreat_ms: 1000,
            approach_grip_ms: 500,
            approach_raise_ms: 1000,
        }
    }
}

/// Tumbler switch decoding configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TumblerConfig {
    /// ADC level above which a tumbler reads as thrown
    pub on_threshold: u16,
    /// Consecutive identical decodes required before a mode change
    pub debounce_samples: u8,
}

impl Default for TumblerConfig {
    fn default() -> Self {
        Self {
            on_threshold: 700,
            debounce_samples: 3,
        }
    }
}

/// Heading-hold PID configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteeringPidConfig {
    /// Proportional gain ×100
    pub kp_x100: i32,
    /// Integral gain ×100
    pub ki_x100: i32,
    /// Derivative gain ×100
    pub kd_x100: i32,
    /// Control loop sample time (ms)
    pub sample_ms: u16,
    /// Heading error deadband (0.1 degree units)
    pub deadband_deg_x10: i16,
    /// Integral windup clamp (0.1 degree units)
    pub integral_limit_deg_x10: i16,
    /// Steering output clamp (degrees)
    pub max_angle_deg: i16,
}

impl Default for SteeringPidConfig {
    fn default() -> Self {
        Self {
            kp_x100: 100,
            ki_x100: 100,
            kd_x100: 100,
            sample_ms: 30,
            deadband_deg_x10: 5,
            integral_limit_deg_x10: 300,
            max_angle_deg: 45,
        }
    }
}

/// Remote link supervision configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Time without a ping before a heartbeat is counted missed (ms)
    pub heartbeat_timeout_ms: u32,
    /// Missed heartbeats before the link is declared lost
    pub max_missed_heartbeats: u8,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout_ms: 1000,
            max_missed_heartbeats: 3,
        }
    }
}

/// Complete robot configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotConfig {
    pub chassis: ChassisConfig,
    pub grab: GrabConfig,
    pub timings: SequenceTimings,
    pub tumblers: TumblerConfig,
    pub steering: SteeringPidConfig,
    pub link: LinkConfig,
}
