//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication; latest-value
//! sensor readings go through portable-atomic cells instead of channels.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicI16};

use pincer_core::chassis::DrivePower;
use pincer_core::switches::ModeSelect;
use pincer_core::traits::{ArmPosition, ClawState};
use pincer_protocol::{LinkCommand, Telemetry};

/// Channel capacity for debounced tumbler mode changes
const MODE_CHANNEL_SIZE: usize = 4;

/// Channel capacity for Pi link commands
const LINK_CHANNEL_SIZE: usize = 8;

/// Debounced tumbler mode selections from the switches task
pub static MODE_CHANNEL: Channel<CriticalSectionRawMutex, ModeSelect, MODE_CHANNEL_SIZE> =
    Channel::new();

/// Commands received over the Pi link
pub static LINK_CHANNEL: Channel<CriticalSectionRawMutex, LinkCommand, LINK_CHANNEL_SIZE> =
    Channel::new();

/// Chassis drive command (updated by controller)
pub static DRIVE_CMD: Signal<CriticalSectionRawMutex, DrivePower> = Signal::new();

/// Claw command (updated by controller)
pub static CLAW_CMD: Signal<CriticalSectionRawMutex, ClawState> = Signal::new();

/// Arm command (updated by controller)
pub static ARM_CMD: Signal<CriticalSectionRawMutex, ArmPosition> = Signal::new();

/// Signal that a heartbeat (PING) was received from the Pi
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that a PONG response should be sent to the Pi
pub static PONG_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Telemetry snapshot for the link TX task (updated by controller)
pub static TELEMETRY: Signal<CriticalSectionRawMutex, Telemetry> = Signal::new();

/// Latest debounced proximity reading (updated by switches task)
pub static PROXIMITY: AtomicBool = AtomicBool::new(false);

/// Latest integrated heading in 0.1 degree units (updated by gyro task)
pub static HEADING: AtomicI16 = AtomicI16::new(0);

/// Whether the gyro is responding (updated by gyro task)
pub static GYRO_OK: AtomicBool = AtomicBool::new(false);
