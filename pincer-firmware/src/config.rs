//! Compile-time robot configuration
//!
//! Tuning constants for the shipped cart. Edit and rebuild to retune;
//! there is no flash persistence.

use pincer_core::config::{
    ChassisConfig, GrabConfig, LinkConfig, RobotConfig, SequenceTimings, SteeringPidConfig,
    TumblerConfig,
};
use pincer_drivers::actuator::{ArmServoConfig, ClawServoConfig};
use pincer_drivers::motor::HBridgeConfig;
use pincer_drivers::sensor::CapacitiveSensorConfig;

/// Robot-level tuning
pub const fn robot_config() -> RobotConfig {
    RobotConfig {
        chassis: ChassisConfig {
            max_power: 30,
            turn_gain_x100: 150,
        },
        grab: GrabConfig {
            approach_power: 16,
            approach_timeout_ms: 8000,
        },
        timings: SequenceTimings {
            prepare_ms: 1000,
            advance_ms: 1500,
            grip_ms: 200,
            raise_ms: 200,
            retreat_ms: 1000,
            approach_grip_ms: 500,
            approach_raise_ms: 1000,
        },
        tumblers: TumblerConfig {
            on_threshold: 700,
            debounce_samples: 3,
        },
        steering: SteeringPidConfig {
            kp_x100: 100,
            ki_x100: 100,
            kd_x100: 100,
            sample_ms: 30,
            deadband_deg_x10: 5,
            integral_limit_deg_x10: 300,
            max_angle_deg: 45,
        },
        link: LinkConfig {
            heartbeat_timeout_ms: 1000,
            max_missed_heartbeats: 3,
        },
    }
}

/// Chassis motor driver tuning (both sides)
pub const fn motor_config() -> HBridgeConfig {
    HBridgeConfig {
        min_duty: 12,
        ramp_ms: 300,
        inverted: false,
    }
}

/// The right motor is mounted mirrored
pub const fn right_motor_config() -> HBridgeConfig {
    HBridgeConfig {
        inverted: true,
        ..motor_config()
    }
}

/// Claw gripper servo endpoints
pub const fn claw_config() -> ClawServoConfig {
    ClawServoConfig {
        open_us: 1000,
        closed_us: 1900,
        settle_ms: 500,
    }
}

/// Arm servo endpoints
pub const fn arm_config() -> ArmServoConfig {
    ArmServoConfig {
        stowed_us: 1200,
        carry_us: 1800,
        settle_ms: 1000,
    }
}

/// Capacitive proximity sensor tuning
pub const fn capacitive_config() -> CapacitiveSensorConfig {
    CapacitiveSensorConfig {
        threshold: 2000,
        debounce_samples: 2,
    }
}
