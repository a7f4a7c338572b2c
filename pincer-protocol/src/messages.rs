//! Message types for the Pi link
//!
//! Message types are divided into two categories:
//! - Pi → Robot: drive and claw commands, heartbeat requests
//! - Robot → Pi: telemetry, heartbeat responses
//!
//! Structured payloads are postcard-encoded inside the frame payload.

use crate::frame::{Frame, FrameError, MAX_PAYLOAD};
use serde::{Deserialize, Serialize};

// Message type IDs: Pi → Robot
pub const MSG_COMMAND: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: Robot → Pi
pub const MSG_TELEMETRY: u8 = 0x10;
pub const MSG_PONG: u8 = 0x11;

/// Commands the Pi can send while the robot is in remote mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkCommand {
    /// Direct per-side drive powers (percent, -100..=100)
    Drive { left: i8, right: i8 },
    /// Steer at cruise power by an angle in degrees (-90..=90)
    Steer { angle_deg: i16 },
    /// Open or close the claw
    SetClaw { closed: bool },
    /// Stow or raise the arm
    SetArm { raised: bool },
    /// Engage heading hold at the current heading
    EngageAutopilot { base_power: i8 },
    /// Disengage heading hold and return to direct control
    DisengageAutopilot,
    /// Run the proximity-guided grab
    StartGrab,
    /// Stop all motion immediately
    Abort,
}

/// Robot mode as reported over the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportedMode {
    Boot,
    Idle,
    Grabbing,
    Remote,
    Autopilot,
    SequenceComplete,
    Error,
}

/// Periodic status snapshot sent to the Pi
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telemetry {
    /// Current robot mode
    pub mode: ReportedMode,
    /// Integrated heading (0.1 degree units, -1800..=1800)
    pub heading_deg_x10: i16,
    /// Whether the claw proximity sensor is triggered
    pub proximity: bool,
}

/// Messages parsed from Pi-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkMessage {
    /// A remote control command
    Command(LinkCommand),
    /// Heartbeat request
    Ping,
}

impl LinkMessage {
    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_COMMAND => {
                let cmd = postcard::from_bytes(&frame.payload)
                    .map_err(|_| FrameError::BadMessage)?;
                Ok(LinkMessage::Command(cmd))
            }
            MSG_PING => Ok(LinkMessage::Ping),
            _ => Err(FrameError::BadMessage),
        }
    }

    /// Encode this message into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            LinkMessage::Command(cmd) => {
                let mut buffer = [0u8; MAX_PAYLOAD];
                let payload = postcard::to_slice(cmd, &mut buffer)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_COMMAND, payload)
            }
            LinkMessage::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}

/// Messages from the robot to the Pi
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RobotMessage {
    /// Status snapshot
    Telemetry(Telemetry),
    /// Heartbeat response
    Pong,
}

impl RobotMessage {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            RobotMessage::Telemetry(telemetry) => {
                let mut buffer = [0u8; MAX_PAYLOAD];
                let payload = postcard::to_slice(telemetry, &mut buffer)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_TELEMETRY, payload)
            }
            RobotMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }

    /// Parse a message from a frame (for testing or simulation)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_TELEMETRY => {
                let telemetry = postcard::from_bytes(&frame.payload)
                    .map_err(|_| FrameError::BadMessage)?;
                Ok(RobotMessage::Telemetry(telemetry))
            }
            MSG_PONG => Ok(RobotMessage::Pong),
            _ => Err(FrameError::BadMessage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_roundtrip() {
        let original = LinkMessage::Command(LinkCommand::Drive {
            left: 30,
            right: -30,
        });
        let frame = original.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_COMMAND);

        let parsed = LinkMessage::from_frame(&frame).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_steer_roundtrip() {
        let original = LinkMessage::Command(LinkCommand::Steer { angle_deg: -45 });
        let frame = original.to_frame().unwrap();
        let parsed = LinkMessage::from_frame(&frame).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_ping_is_empty_frame() {
        let frame = LinkMessage::Ping.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_PING);
        assert!(frame.payload.is_empty());

        let parsed = LinkMessage::from_frame(&frame).unwrap();
        assert_eq!(parsed, LinkMessage::Ping);
    }

    #[test]
    fn test_telemetry_roundtrip() {
        let original = RobotMessage::Telemetry(Telemetry {
            mode: ReportedMode::Autopilot,
            heading_deg_x10: -873,
            proximity: true,
        });
        let frame = original.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_TELEMETRY);

        let parsed = RobotMessage::from_frame(&frame).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let frame = Frame::empty(0x7F);
        assert_eq!(
            LinkMessage::from_frame(&frame),
            Err(FrameError::BadMessage)
        );
        assert_eq!(
            RobotMessage::from_frame(&frame),
            Err(FrameError::BadMessage)
        );
    }

    #[test]
    fn test_truncated_command_rejected() {
        let good = LinkMessage::Command(LinkCommand::Drive { left: 10, right: 10 })
            .to_frame()
            .unwrap();
        let truncated = Frame::new(MSG_COMMAND, &good.payload[..1]).unwrap();
        assert_eq!(
            LinkMessage::from_frame(&truncated),
            Err(FrameError::BadMessage)
        );
    }
}
