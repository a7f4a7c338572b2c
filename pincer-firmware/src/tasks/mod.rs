//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod chassis;
pub mod claw;
pub mod controller;
pub mod gyro;
pub mod remote;
pub mod switches;
pub mod tick;

pub use chassis::chassis_task;
pub use claw::claw_task;
pub use controller::controller_task;
pub use gyro::gyro_task;
pub use remote::{link_rx_task, link_tx_task};
pub use switches::switches_task;
pub use tick::tick_task;
