//! Hardware driver implementations for the Pincer claw cart
//!
//! Drivers are plain state machines updated from periodic tasks; they
//! compute pin states and PWM values but never touch hardware directly.

#![no_std]
#![deny(unsafe_code)]

pub mod actuator;
pub mod motor;
pub mod sensor;
pub mod steering;
