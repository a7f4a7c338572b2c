//! Heading-hold steering
//!
//! Implements the autonomous drive mode: a gyro-rate integrator keeps a
//! heading estimate, and a fixed-point PID turns heading error into a
//! steering angle for the chassis mix.

pub mod fixed;
pub mod heading;
pub mod pid;

pub use fixed::Fixed32;
pub use heading::GyroHeading;
pub use pid::{HeadingHold, HeadingPid};
