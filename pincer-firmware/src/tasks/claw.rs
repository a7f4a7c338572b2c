//! Claw and arm servo task
//!
//! Receives actuator commands from the controller and generates the
//! 50 Hz servo pulses, claw on channel A and arm on channel B of one
//! PWM slice.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Duration, Ticker};

use pincer_drivers::actuator::{ArmServo, ArmServoConfig, ClawServo, ClawServoConfig};
use pincer_core::traits::{ArmDriver, ClawDriver};

use crate::channels::{ARM_CMD, CLAW_CMD};

/// Servo frame period in PWM ticks (20 ms at 1 µs per tick)
const SERVO_PWM_TOP: u16 = 19999;

/// Clock divider giving 1 µs PWM ticks at the default sys clock
const SERVO_PWM_DIVIDER: u8 = 125;

/// Update interval, one servo frame
const UPDATE_MS: u32 = 20;

/// Claw task - drives the gripper and arm servos
#[embassy_executor::task]
pub async fn claw_task(
    mut pwm: Pwm<'static>,
    claw_config: ClawServoConfig,
    arm_config: ArmServoConfig,
) {
    info!("Claw task started");

    let mut claw = ClawServo::new(claw_config);
    let mut arm = ArmServo::new(arm_config);

    // 50 Hz servo PWM; compare values are pulse widths in µs
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = SERVO_PWM_DIVIDER.into();
    pwm_config.top = SERVO_PWM_TOP;
    pwm_config.compare_a = claw.pulse_us();
    pwm_config.compare_b = arm.pulse_us();
    pwm.set_config(&pwm_config);

    let mut ticker = Ticker::every(Duration::from_millis(UPDATE_MS as u64));

    loop {
        // A Busy refusal is harmless: the controller re-signals the
        // latest command every tick, so it lands once the servo settles
        if let Some(state) = CLAW_CMD.try_take() {
            let changed = state != claw.state();
            match claw.set_state(state) {
                Ok(()) if changed => debug!("Claw command: {:?}", state),
                Ok(()) => {}
                Err(e) => warn!("Claw command {:?} deferred: {:?}", state, e),
            }
        }
        if let Some(position) = ARM_CMD.try_take() {
            let changed = position != arm.position();
            match arm.set_position(position) {
                Ok(()) if changed => debug!("Arm command: {:?}", position),
                Ok(()) => {}
                Err(e) => warn!("Arm command {:?} deferred: {:?}", position, e),
            }
        }

        pwm_config.compare_a = claw.update(UPDATE_MS);
        pwm_config.compare_b = arm.update(UPDATE_MS);
        pwm.set_config(&pwm_config);

        ticker.next().await;
    }
}
