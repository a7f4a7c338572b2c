//! Tumbler and proximity sensor polling task
//!
//! Owns the ADC and its three channels: the capacitive proximity sensor
//! on the claw and the two mode tumblers. Debounced mode changes go to
//! the controller; the proximity state is published as a latest-value
//! atomic.

use core::cell::RefCell;

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use pincer_core::config::TumblerConfig;
use pincer_core::traits::ProximitySensor;
use pincer_drivers::sensor::{AdcReader, CapacitiveSensor, CapacitiveSensorConfig, TumblerReader};

use crate::channels::{MODE_CHANNEL, PROXIMITY};

/// Poll interval
const POLL_MS: u64 = 20;

/// One ADC channel behind the shared ADC peripheral
struct ChannelReader<'a> {
    adc: &'a RefCell<Adc<'static, Blocking>>,
    channel: Channel<'static>,
}

impl AdcReader for ChannelReader<'_> {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc
            .borrow_mut()
            .blocking_read(&mut self.channel)
            .map_err(|_| ())
    }
}

/// Switches task - polls tumblers and the capacitive sensor
#[embassy_executor::task]
pub async fn switches_task(
    adc: Adc<'static, Blocking>,
    cap_channel: Channel<'static>,
    grab_channel: Channel<'static>,
    remote_channel: Channel<'static>,
    cap_config: CapacitiveSensorConfig,
    tumbler_config: TumblerConfig,
) {
    info!("Switches task started");

    let adc = RefCell::new(adc);
    let mut proximity = CapacitiveSensor::new(
        ChannelReader {
            adc: &adc,
            channel: cap_channel,
        },
        cap_config,
    );
    let mut tumblers = TumblerReader::new(
        ChannelReader {
            adc: &adc,
            channel: grab_channel,
        },
        ChannelReader {
            adc: &adc,
            channel: remote_channel,
        },
        tumbler_config,
    );

    let mut ticker = Ticker::every(Duration::from_millis(POLL_MS));

    loop {
        match tumblers.poll() {
            Ok(Some(mode)) => {
                debug!("Tumbler mode: {:?}", mode);
                if MODE_CHANNEL.try_send(mode).is_err() {
                    warn!("Mode channel full, dropping change");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Tumbler read error: {:?}", e),
        }

        match proximity.is_triggered() {
            Ok(hit) => PROXIMITY.store(hit, Ordering::Relaxed),
            Err(e) => {
                warn!("Proximity read error: {:?}", e);
                PROXIMITY.store(false, Ordering::Relaxed);
            }
        }

        ticker.next().await;
    }
}
