//! Raspberry Pi link tasks
//!
//! RX parses incoming frames into link commands and heartbeats; TX
//! sends heartbeat responses and telemetry snapshots.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{Duration, Ticker};
use embedded_io_async::{Read, Write};

use pincer_protocol::{Frame, FrameError, FrameParser, LinkMessage, RobotMessage, MAX_FRAME_LEN};

use crate::channels::{HEARTBEAT_RECEIVED, LINK_CHANNEL, PONG_REQUEST, TELEMETRY};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the Pi
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx<'static>) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match LinkMessage::from_frame(&frame) {
                            Ok(msg) => handle_link_message(msg),
                            Err(e) => warn!("Bad link message: {:?}", e),
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a parsed link message
fn handle_link_message(msg: LinkMessage) {
    match msg {
        LinkMessage::Ping => {
            trace!("PING received");
            HEARTBEAT_RECEIVED.signal(());
            PONG_REQUEST.signal(());
        }
        LinkMessage::Command(cmd) => {
            debug!("Link command: {:?}", cmd);
            if LINK_CHANNEL.try_send(cmd).is_err() {
                warn!("Link channel full, dropping command");
            }
        }
    }
}

/// Link TX task - sends frames to the Pi
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx<'static>) {
    info!("Link TX task started");

    let mut ticker = Ticker::every(Duration::from_millis(50));

    loop {
        // Check for pending heartbeat response
        if PONG_REQUEST.try_take().is_some() {
            send_frame(&mut tx, RobotMessage::Pong.to_frame()).await;
        }

        // Check for a fresh telemetry snapshot
        if let Some(telemetry) = TELEMETRY.try_take() {
            send_frame(&mut tx, RobotMessage::Telemetry(telemetry).to_frame()).await;
        }

        ticker.next().await;
    }
}

/// Encode and send one frame
async fn send_frame(tx: &mut BufferedUartTx<'static>, frame: Result<Frame, FrameError>) {
    let Ok(frame) = frame else {
        warn!("Failed to encode frame");
        return;
    };

    let mut buf = [0u8; MAX_FRAME_LEN];
    if let Ok(len) = frame.encode(&mut buf) {
        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("UART write error: {:?}", e);
        }
    }
}
