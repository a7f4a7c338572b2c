//! Board-agnostic core logic for the Pincer claw cart firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (chassis motors, claw/arm, sensors)
//! - Differential-drive power mixing
//! - Timed grab sequence engine
//! - Mode state machine
//! - Tumbler switch decoding
//! - Safety monitoring logic
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod chassis;
pub mod config;
pub mod safety;
pub mod sequence;
pub mod state;
pub mod switches;
pub mod traits;
