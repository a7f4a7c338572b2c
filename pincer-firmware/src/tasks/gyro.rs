//! Gyro sampling task
//!
//! Reads the IMU's yaw-rate register over I2C and integrates it into a
//! heading estimate. Only the minimal wake + single-register read is
//! done here; the heading math lives in the driver crate.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};
use embedded_hal_async::i2c::I2c as _;
use portable_atomic::Ordering;

use pincer_core::traits::HeadingSensor;
use pincer_drivers::steering::GyroHeading;

use crate::channels::{GYRO_OK, HEADING};

/// MPU6050 I2C address (AD0 low)
const MPU_ADDR: u8 = 0x68;
/// Power management register
const REG_PWR_MGMT_1: u8 = 0x6B;
/// Gyro range configuration register
const REG_GYRO_CONFIG: u8 = 0x1B;
/// Gyro Z axis output, high byte
const REG_GYRO_ZOUT_H: u8 = 0x47;

/// Sensitivity at the ±250 °/s full scale range (LSB per °/s)
const LSB_PER_DPS: i32 = 131;

/// Sample interval
const SAMPLE_MS: u32 = 10;

/// Consecutive bus errors before the gyro is reported down
const MAX_ERRORS: u8 = 5;

/// Gyro task - samples yaw rate and publishes the integrated heading
#[embassy_executor::task]
pub async fn gyro_task(mut i2c: I2c<'static, I2C0, Async>) {
    info!("Gyro task started");

    // Wake the IMU and select the ±250 °/s range
    let awake = i2c.write(MPU_ADDR, &[REG_PWR_MGMT_1, 0x00]).await.is_ok()
        && i2c.write(MPU_ADDR, &[REG_GYRO_CONFIG, 0x00]).await.is_ok();
    GYRO_OK.store(awake, Ordering::Relaxed);
    if !awake {
        warn!("Gyro did not respond to init");
    }

    let mut heading = GyroHeading::new();
    let mut errors: u8 = 0;
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_MS as u64));

    loop {
        ticker.next().await;

        let mut raw = [0u8; 2];
        match i2c.write_read(MPU_ADDR, &[REG_GYRO_ZOUT_H], &mut raw).await {
            Ok(()) => {
                errors = 0;
                let rate_raw = i16::from_be_bytes(raw);
                let rate_dps_x10 = (rate_raw as i32 * 10 / LSB_PER_DPS) as i16;
                heading.ingest(rate_dps_x10, SAMPLE_MS);

                if let Ok(deg_x10) = heading.heading_deg_x10() {
                    HEADING.store(deg_x10, Ordering::Relaxed);
                }
                GYRO_OK.store(true, Ordering::Relaxed);
            }
            Err(e) => {
                errors = errors.saturating_add(1);
                if errors >= MAX_ERRORS {
                    warn!("Gyro read failing: {:?}", e);
                    GYRO_OK.store(false, Ordering::Relaxed);
                }
            }
        }
    }
}
