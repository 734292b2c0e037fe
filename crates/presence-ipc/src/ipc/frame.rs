//! Wire framing for the presence IPC protocol.
//!
//! Every frame is a fixed 8-byte little-endian header followed by a UTF-8
//! JSON payload:
//!
//! ```text
//! [u32 LE opcode][u32 LE payload length][UTF-8 JSON bytes of length]
//! ```
//!
//! Decoding loops over [`Transport::read`] until the exact byte count is
//! satisfied; the peer may fragment delivery arbitrarily and a short buffer
//! is never returned silently.

use crate::config::IpcConfig;
use crate::error::{PresenceError, Result};
use crate::ipc::transport::Transport;
use serde_json::Value;

/// Fixed header size: opcode plus payload length, both `u32`.
pub const HEADER_LEN: usize = 8;

/// Frame purpose tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Opcode {
    /// Versioned hello, first frame on every connection.
    Handshake = 0,
    /// Command/event envelope (the peer's READY dispatch, SET_ACTIVITY).
    Message = 1,
    /// Graceful teardown notice.
    Close = 2,
    Ping = 3,
    Pong = 4,
}

impl Opcode {
    pub fn from_u32(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Opcode::Handshake),
            1 => Some(Opcode::Message),
            2 => Some(Opcode::Close),
            3 => Some(Opcode::Ping),
            4 => Some(Opcode::Pong),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// A decoded frame: opcode tag plus JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub opcode: Opcode,
    pub payload: Value,
}

impl Frame {
    pub fn new(opcode: Opcode, payload: Value) -> Self {
        Self { opcode, payload }
    }

    /// Encode this frame into wire-format bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let payload = serde_json::to_vec(&self.payload)?;
        let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
        buf.extend_from_slice(&self.opcode.as_u32().to_le_bytes());
        buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }
}

/// Fill `buf` completely, looping over short reads.
///
/// EOF before the buffer is full is a transport failure, not a short result.
async fn read_exact<T: Transport + ?Sized>(transport: &mut T, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = transport.read(&mut buf[filled..]).await?;
        if n == 0 {
            return Err(PresenceError::Io {
                message: "peer closed the connection mid-frame".into(),
                source: None,
            });
        }
        filled += n;
    }
    Ok(())
}

/// Read and decode one frame from the transport.
pub async fn read_frame<T: Transport + ?Sized>(transport: &mut T) -> Result<Frame> {
    let mut header = [0u8; HEADER_LEN];
    read_exact(transport, &mut header).await?;

    let raw_opcode = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let length = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;

    let opcode = Opcode::from_u32(raw_opcode).ok_or_else(|| PresenceError::Protocol {
        message: format!("unknown opcode {raw_opcode}"),
    })?;
    if length > IpcConfig::MAX_FRAME_PAYLOAD {
        return Err(PresenceError::Protocol {
            message: format!(
                "declared payload length {length} exceeds maximum {}",
                IpcConfig::MAX_FRAME_PAYLOAD
            ),
        });
    }

    let mut payload = vec![0u8; length];
    read_exact(transport, &mut payload).await?;

    let value = serde_json::from_slice(&payload).map_err(|e| PresenceError::Protocol {
        message: format!("frame payload is not valid JSON: {e}"),
    })?;

    Ok(Frame::new(opcode, value))
}

/// Encode and write one frame to the transport.
pub async fn write_frame<T: Transport + ?Sized>(transport: &mut T, frame: &Frame) -> Result<()> {
    transport.write_all(&frame.encode()?).await
}
