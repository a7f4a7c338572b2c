//! Heading-hold PID controller
//!
//! Turns heading error into a steering angle. The output feeds the same
//! differential mix used for remote steering, so the autopilot and the
//! Pi link share one chassis path.

use pincer_core::chassis::{self, DrivePower};
use pincer_core::config::{ChassisConfig, SteeringPidConfig};

use super::fixed::Fixed32;

/// PID state for heading hold
pub struct HeadingPid {
    config: SteeringPidConfig,
    kp: Fixed32,
    ki: Fixed32,
    kd: Fixed32,
    /// Accumulated integral term
    integral: Fixed32,
    /// Previous error for the derivative
    prev_error_x10: i16,
}

impl HeadingPid {
    /// Create a controller from config gains
    pub fn new(config: SteeringPidConfig) -> Self {
        Self {
            kp: Fixed32::from_scaled_100(config.kp_x100),
            ki: Fixed32::from_scaled_100(config.ki_x100),
            kd: Fixed32::from_scaled_100(config.kd_x100),
            config,
            integral: Fixed32::ZERO,
            prev_error_x10: 0,
        }
    }

    /// Reset internal state
    ///
    /// Call when the setpoint changes to avoid integral windup and
    /// derivative kick from the jump.
    pub fn reset(&mut self) {
        self.integral = Fixed32::ZERO;
        self.prev_error_x10 = 0;
    }

    /// Compute the steering angle for a heading error
    ///
    /// `error_x10` is setpoint minus heading in 0.1 degree units,
    /// positive when the robot must turn clockwise. Returns a steering
    /// angle in whole degrees, clamped to the configured maximum.
    pub fn update(&mut self, error_x10: i16) -> i16 {
        // Deadband: treat small errors as zero to stop hunting
        let error_x10 = if error_x10.abs() <= self.config.deadband_deg_x10 {
            0
        } else {
            error_x10
        };

        let error = Fixed32::from_int(error_x10);

        // Proportional term
        let p_term = self.kp.mul(error);

        // Integral term with anti-windup clamp
        self.integral = self.integral.saturating_add(self.ki.mul(error));
        let limit = Fixed32::from_int(self.config.integral_limit_deg_x10);
        self.integral = self.integral.clamp(-limit, limit);

        // Derivative on error
        let d_error = error_x10 - self.prev_error_x10;
        let d_term = self.kd.mul(Fixed32::from_int(d_error));
        self.prev_error_x10 = error_x10;

        let output = p_term.saturating_add(self.integral).saturating_add(d_term);

        // Output is in 0.1 degree units; steering wants whole degrees
        let angle = output.to_int() / 10;
        angle.clamp(-self.config.max_angle_deg, self.config.max_angle_deg)
    }
}

/// Heading-hold autopilot
///
/// Captures the heading at engage time as the setpoint and drives at a
/// signed base power, steering to hold the captured heading.
pub struct HeadingHold {
    pid: HeadingPid,
    chassis: ChassisConfig,
    /// Captured setpoint (0.1 degree units)
    setpoint_x10: i16,
    /// Signed cruise power; negative drives backward
    base_power: i8,
    engaged: bool,
}

impl HeadingHold {
    /// Create a disengaged autopilot
    pub fn new(pid_config: SteeringPidConfig, chassis: ChassisConfig) -> Self {
        Self {
            pid: HeadingPid::new(pid_config),
            chassis,
            setpoint_x10: 0,
            base_power: 0,
            engaged: false,
        }
    }

    /// Engage at the current heading
    ///
    /// `base_power` sets speed and direction; the sign drives the
    /// chassis forward or backward along the held heading.
    pub fn engage(&mut self, heading_x10: i16, base_power: i8) {
        self.setpoint_x10 = heading_x10;
        self.base_power = base_power.clamp(-100, 100);
        self.pid.reset();
        self.engaged = true;
    }

    /// Disengage and stop commanding the chassis
    pub fn disengage(&mut self) {
        self.engaged = false;
    }

    /// Check if the autopilot is engaged
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Compute the chassis command for the current heading
    pub fn update(&mut self, heading_x10: i16) -> DrivePower {
        if !self.engaged {
            return DrivePower::STOP;
        }

        // Shortest-path heading error, wrapped to -1800..1800
        let raw = self.setpoint_x10 as i32 - heading_x10 as i32;
        let error_x10 = ((raw + 1800).rem_euclid(3600) - 1800) as i16;

        let angle = self.pid.update(error_x10);
        chassis::steer(&self.chassis, self.base_power, angle)
    }
}
