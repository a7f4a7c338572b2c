//! Safety monitor implementation
//!
//! Tracks gyro health and the Raspberry Pi link heartbeat. The approach
//! timeout is enforced inside the sequence executor, which owns the
//! timing of that phase.

use crate::config::LinkConfig;
use crate::state::ErrorKind;

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Safety condition violated
    Fault(ErrorKind),
}

/// Safety monitor for fault detection
///
/// The link heartbeat is only supervised while `link_required` is set
/// (Remote and Autopilot modes); the grab sequence runs without the Pi.
#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    config: LinkConfig,
    /// Gyro responded to its last read
    gyro_valid: bool,
    /// Heartbeat supervision active
    link_required: bool,
    /// Missed heartbeat count
    missed_heartbeats: u8,
    /// Time since last heartbeat (ms)
    time_since_heartbeat_ms: u32,
}

impl SafetyMonitor {
    /// Create a new safety monitor
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            gyro_valid: true,
            link_required: false,
            missed_heartbeats: 0,
            time_since_heartbeat_ms: 0,
        }
    }

    /// Update gyro health
    pub fn update_gyro(&mut self, responding: bool) {
        self.gyro_valid = responding;
    }

    /// Enable or disable link heartbeat supervision
    ///
    /// Enabling resets the heartbeat counters so a stale timestamp from
    /// a previous session cannot trip the check immediately.
    pub fn set_link_required(&mut self, required: bool) {
        if required && !self.link_required {
            self.missed_heartbeats = 0;
            self.time_since_heartbeat_ms = 0;
        }
        self.link_required = required;
    }

    /// Record a heartbeat received from the Pi
    pub fn heartbeat_received(&mut self) {
        self.missed_heartbeats = 0;
        self.time_since_heartbeat_ms = 0;
    }

    /// Update time tracking
    pub fn update_time(&mut self, delta_ms: u32) {
        if !self.link_required {
            return;
        }

        self.time_since_heartbeat_ms = self.time_since_heartbeat_ms.saturating_add(delta_ms);

        if self.time_since_heartbeat_ms >= self.config.heartbeat_timeout_ms {
            self.missed_heartbeats = self.missed_heartbeats.saturating_add(1);
            self.time_since_heartbeat_ms = 0;
        }
    }

    /// Check all safety conditions
    ///
    /// Returns the first fault detected, or Ok if all conditions are
    /// normal.
    pub fn check(&self) -> SafetyStatus {
        if !self.gyro_valid {
            return SafetyStatus::Fault(ErrorKind::GyroFault);
        }

        if self.link_required && self.missed_heartbeats >= self.config.max_missed_heartbeats {
            return SafetyStatus::Fault(ErrorKind::LinkLost);
        }

        SafetyStatus::Ok
    }

    /// Check if the link is healthy
    pub fn is_link_healthy(&self) -> bool {
        self.missed_heartbeats < self.config.max_missed_heartbeats
    }

    /// Get number of missed heartbeats
    pub fn missed_heartbeats(&self) -> u8 {
        self.missed_heartbeats
    }
}

impl Default for SafetyMonitor {
    fn default() -> Self {
        Self::new(LinkConfig::default())
    }
}
