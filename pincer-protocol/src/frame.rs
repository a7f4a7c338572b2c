//! Framing for the Pi UART link.
//!
//! Every message travels as a sync byte followed by a body:
//!
//! ```text
//! 0xC5 | length | type | payload (length bytes) | checksum
//! ```
//!
//! The checksum is the XOR of the body bytes before it (length, type,
//! payload), so a receiver can verify a frame without reparsing the
//! fields. Payloads are capped at 64 bytes; the largest link message
//! (telemetry) postcard-encodes well under that.

use heapless::Vec;

/// Synchronization byte opening every frame
pub const FRAME_SYNC: u8 = 0xC5;

/// Maximum payload length in bytes
pub const MAX_PAYLOAD: usize = 64;

/// Body bytes besides the payload: length, type, checksum
const BODY_OVERHEAD: usize = 3;

/// Longest possible frame on the wire, sync byte included
pub const MAX_FRAME_LEN: usize = 1 + BODY_OVERHEAD + MAX_PAYLOAD;

/// Framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD`]
    PayloadTooLarge,
    /// Received length byte exceeds [`MAX_PAYLOAD`]
    BadLength,
    /// Received checksum does not match the body
    BadChecksum,
    /// Frame is well-formed but the content is not a known message
    BadMessage,
    /// Output buffer too small for the encoded frame
    BufferTooSmall,
}

/// XOR of all bytes in a slice
fn xor_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// One link frame: a message type tag and its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type tag
    pub msg_type: u8,
    /// Payload bytes
    pub payload: Vec<u8, MAX_PAYLOAD>,
}

impl Frame {
    /// Build a frame, rejecting oversized payloads
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload =
            Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Build a payload-less frame
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Length of this frame on the wire
    pub fn wire_len(&self) -> usize {
        1 + BODY_OVERHEAD + self.payload.len()
    }

    /// Write the frame into `out`, returning the bytes written
    ///
    /// The checksum is computed over the body as written, so the wire
    /// bytes are their own proof of integrity.
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.wire_len();
        if out.len() < len {
            return Err(FrameError::BufferTooSmall);
        }

        out[0] = FRAME_SYNC;
        out[1] = self.payload.len() as u8;
        out[2] = self.msg_type;
        out[3..len - 1].copy_from_slice(&self.payload);
        out[len - 1] = xor_sum(&out[1..len - 1]);

        Ok(len)
    }
}

/// Incremental frame parser
///
/// Hunts for the sync byte, then buffers the body until the length
/// implied by its first byte is in. Bad frames drop the buffer and
/// return to hunting, so a corrupted stream costs at most one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameParser {
    /// Body bytes buffered since the last sync (length, type, payload,
    /// checksum)
    body: Vec<u8, { BODY_OVERHEAD + MAX_PAYLOAD }>,
    /// Sync byte seen, body accumulating
    synced: bool,
}

impl FrameParser {
    /// Create a parser hunting for sync
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any partial frame and return to hunting for sync
    pub fn reset(&mut self) {
        self.body.clear();
        self.synced = false;
    }

    /// Feed one received byte
    ///
    /// Returns `Ok(Some(frame))` when the byte completes a valid
    /// frame, `Ok(None)` when more bytes are needed. On error the
    /// parser has already reset and will resync on the next sync byte.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        if !self.synced {
            if byte == FRAME_SYNC {
                self.synced = true;
            }
            return Ok(None);
        }

        // First body byte is the payload length; vet it before
        // committing a buffer to it
        if self.body.is_empty() && byte as usize > MAX_PAYLOAD {
            self.reset();
            return Err(FrameError::BadLength);
        }

        // Capacity covers every vetted length
        let _ = self.body.push(byte);

        let Some(&length) = self.body.first() else {
            return Ok(None);
        };
        if self.body.len() < BODY_OVERHEAD + length as usize {
            return Ok(None);
        }

        // Body complete: last byte is the checksum of everything
        // before it
        let (checked, checksum) = self.body.split_at(self.body.len() - 1);
        if xor_sum(checked) != checksum[0] {
            self.reset();
            return Err(FrameError::BadChecksum);
        }

        let frame = Frame::new(checked[1], &checked[2..])?;
        self.reset();
        Ok(Some(frame))
    }

    /// Feed a received chunk, returning the first completed frame
    ///
    /// Bytes after that frame are not consumed; feed them again on the
    /// next call.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
