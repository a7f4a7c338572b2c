//! Main controller task
//!
//! Coordinates the state machine, sequence executor, heading hold, and
//! safety monitoring. Receives tumbler mode changes, link commands, and
//! tick signals; pushes drive/claw/arm commands and telemetry.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use portable_atomic::Ordering;

use pincer_core::config::RobotConfig;
use pincer_core::state::{Event, State};

use crate::channels::{
    ARM_CMD, CLAW_CMD, DRIVE_CMD, GYRO_OK, HEADING, HEARTBEAT_RECEIVED, LINK_CHANNEL,
    MODE_CHANNEL, PROXIMITY, TELEMETRY,
};
use crate::controller::Controller;
use crate::tasks::tick::TICK_SIGNAL;

/// Log a state transition, classified by the event's source
fn log_transition(event: Event, state: State) {
    if event.is_error_event() {
        warn!("Fault: {:?} -> {:?}", event, state);
    } else if event.is_tumbler_event() {
        info!("Tumbler: {:?} -> {:?}", event, state);
    } else if event.is_sequence_event() {
        info!("Sequence: {:?} -> {:?}", event, state);
    } else {
        info!("Event: {:?} -> {:?}", event, state);
    }
}

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: RobotConfig) {
    info!("Controller task started");

    let mut controller = Controller::new(config);
    controller.boot_complete();
    info!("Boot complete, entering idle state");

    let mut last_ms: u32 = 0;

    loop {
        // Wait for either: mode change, link command, or tick
        match select3(
            MODE_CHANNEL.receive(),
            LINK_CHANNEL.receive(),
            TICK_SIGNAL.wait(),
        )
        .await
        {
            Either3::First(mode) => {
                if let Some(event) = controller.process_mode(mode) {
                    log_transition(event, controller.state());
                }
            }

            Either3::Second(cmd) => {
                let heading = HEADING.load(Ordering::Relaxed);
                if let Some(event) = controller.process_link(cmd, heading) {
                    log_transition(event, controller.state());
                }
            }

            Either3::Third(now_ms) => {
                let delta_ms = now_ms.wrapping_sub(last_ms);
                last_ms = now_ms;

                if HEARTBEAT_RECEIVED.try_take().is_some() {
                    controller.heartbeat();
                }

                let proximity = PROXIMITY.load(Ordering::Relaxed);
                let gyro_ok = GYRO_OK.load(Ordering::Relaxed);
                if let Some(event) = controller.on_tick(delta_ms, proximity, gyro_ok) {
                    log_transition(event, controller.state());
                }

                let heading = HEADING.load(Ordering::Relaxed);
                TELEMETRY.signal(controller.telemetry(heading, proximity));
            }
        }

        // Push the latest commands after every stimulus
        let heading = HEADING.load(Ordering::Relaxed);
        DRIVE_CMD.signal(controller.drive_command(heading));
        CLAW_CMD.signal(controller.claw_command());
        ARM_CMD.signal(controller.arm_command());
    }
}
