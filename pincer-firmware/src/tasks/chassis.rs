//! Chassis motor control task
//!
//! Receives drive commands from the controller and drives the two
//! H-bridge DC motors via one PWM slice (left on channel A, right on
//! channel B) plus IN-A/IN-B direction pins per side.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Duration, Ticker};

use pincer_core::traits::{ChassisMotorDriver, MotorDriver};
use pincer_drivers::motor::{HBridgeConfig, HBridgeMotor};

use crate::channels::DRIVE_CMD;

/// PWM top value for the motor slice (20 kHz at the default sys clock)
const MOTOR_PWM_TOP: u16 = 6249;

/// Driver update interval for smooth ramping
const UPDATE_MS: u32 = 5;

/// IN-A/IN-B pin pair for one bridge
type BridgePins = (Output<'static>, Output<'static>);

/// Chassis task - drives both motors with soft-start ramping
#[embassy_executor::task]
pub async fn chassis_task(
    mut pwm: Pwm<'static>,
    mut left_pins: BridgePins,
    mut right_pins: BridgePins,
    left_config: HBridgeConfig,
    right_config: HBridgeConfig,
) {
    info!("Chassis task started");

    let mut left = HBridgeMotor::new(left_config);
    let mut right = HBridgeMotor::new(right_config);
    left.enable(true);
    right.enable(true);

    // Configure PWM
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = MOTOR_PWM_TOP;
    pwm_config.compare_a = 0;
    pwm_config.compare_b = 0;
    pwm.set_config(&pwm_config);

    let mut ticker = Ticker::every(Duration::from_millis(UPDATE_MS as u64));

    loop {
        // Check for a new drive command (non-blocking)
        if let Some(cmd) = DRIVE_CMD.try_take() {
            trace!("Drive command: left={}% right={}%", cmd.left, cmd.right);

            if let Err(e) = left.set_power(cmd.left) {
                warn!("Left motor rejected {}%: {:?}", cmd.left, e);
            }
            if let Err(e) = right.set_power(cmd.right) {
                warn!("Right motor rejected {}%: {:?}", cmd.right, e);
            }
        }

        // Update the drivers (handles ramping)
        let left_duty = left.update_with_delta(UPDATE_MS);
        let right_duty = right.update_with_delta(UPDATE_MS);

        pwm_config.compare_a = duty_to_compare(left_duty);
        pwm_config.compare_b = duty_to_compare(right_duty);
        pwm.set_config(&pwm_config);

        apply_bridge(&mut left_pins, left.bridge_pins());
        apply_bridge(&mut right_pins, right.bridge_pins());

        ticker.next().await;
    }
}

/// Convert a 0-100 duty to a PWM compare value
fn duty_to_compare(duty: u8) -> u16 {
    (duty as u32 * MOTOR_PWM_TOP as u32 / 100) as u16
}

/// Apply IN-A/IN-B levels to a bridge
fn apply_bridge(pins: &mut BridgePins, levels: (bool, bool)) {
    if levels.0 {
        pins.0.set_high();
    } else {
        pins.0.set_low();
    }
    if levels.1 {
        pins.1.set_high();
    } else {
        pins.1.set_low();
    }
}
