//! Pi Link Communication Protocol
//!
//! This crate defines the UART-based protocol between the Pincer robot
//! (motor controller) and the Raspberry Pi line follower that drives it
//! in remote mode.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ SYNC  │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–64B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Structured payloads are postcard-encoded. The Pi owns navigation;
//! the robot owns motion safety, so commands are only honored while the
//! robot is in remote mode and the link heartbeat is alive.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_SYNC, MAX_FRAME_LEN, MAX_PAYLOAD};
pub use messages::{LinkCommand, LinkMessage, ReportedMode, RobotMessage, Telemetry};
