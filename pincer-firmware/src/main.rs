//! Pincer - Claw Cart Robot Firmware
//!
//! Main firmware binary for the RP2040-based claw cart: two H-bridge
//! drive motors, a claw/arm end-effector, mode tumblers, a capacitive
//! proximity sensor, a yaw gyro, and a UART command link to a
//! Raspberry Pi line follower.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod config;
mod controller;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pincer firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART0 for the Pi link (GPIO0 TX / GPIO1 RX)
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for Pi link");

    // Chassis H-bridges: IN-A/IN-B per side, one PWM slice for both
    // sides (left on GPIO4 = 2A, right on GPIO5 = 2B)
    let left_pins = (
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
    );
    let right_pins = (
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
    );
    let motor_pwm = Pwm::new_output_ab(p.PWM_SLICE2, p.PIN_4, p.PIN_5, PwmConfig::default());

    // Claw and arm servos on one slice (claw GPIO8 = 4A, arm GPIO9 = 4B)
    let servo_pwm = Pwm::new_output_ab(p.PWM_SLICE4, p.PIN_8, p.PIN_9, PwmConfig::default());

    info!("PWM initialized");

    // ADC: capacitive sensor on GPIO26, tumblers on GPIO27/GPIO28
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let cap_channel = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let grab_channel = AdcChannel::new_pin(p.PIN_27, Pull::Down);
    let remote_channel = AdcChannel::new_pin(p.PIN_28, Pull::Down);

    info!("ADC initialized");

    // I2C0 to the IMU (GPIO21 SCL / GPIO20 SDA)
    let gyro_i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c::Config::default());

    info!("I2C initialized for gyro");

    let robot_config = config::robot_config();

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::chassis_task(
            motor_pwm,
            left_pins,
            right_pins,
            config::motor_config(),
            config::right_motor_config(),
        ))
        .unwrap();
    spawner
        .spawn(tasks::claw_task(
            servo_pwm,
            config::claw_config(),
            config::arm_config(),
        ))
        .unwrap();
    spawner
        .spawn(tasks::switches_task(
            adc,
            cap_channel,
            grab_channel,
            remote_channel,
            config::capacitive_config(),
            robot_config.tumblers,
        ))
        .unwrap();
    spawner.spawn(tasks::gyro_task(gyro_i2c)).unwrap();
    spawner.spawn(tasks::controller_task(robot_config)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
