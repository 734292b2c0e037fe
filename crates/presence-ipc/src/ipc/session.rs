//! Handshake and messaging state machine.
//!
//! A [`Session`] owns one [`Transport`] at a time and drives the lifecycle
//! `Disconnected → Connecting → AwaitingHandshakeAck → Connected`, returning
//! to `Disconnected` on close or fatal I/O error.
//!
//! All operations take `&mut self`: at most one connect/handshake/send/close
//! is ever in flight, the session performs no internal locking, and all
//! reconnection is caller-driven and synchronous with respect to the call
//! sequence.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::IpcConfig;
use crate::error::{PresenceError, Result};
use crate::ipc::frame::{self, Frame, Opcode};
use crate::ipc::transport::{Connector, Transport};

/// Lifecycle state of a presence session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    AwaitingHandshakeAck,
    Connected,
    Closing,
}

/// One handshake-to-close lifecycle over one transport instance.
pub struct Session {
    connector: Box<dyn Connector>,
    transport: Option<Box<dyn Transport>>,
    state: SessionState,
    client_id: String,
    pid: u32,
}

impl Session {
    /// Create a session in the `Disconnected` state.
    ///
    /// `client_id` is the stable identifier the peer expects in the
    /// handshake; `pid` is stamped into every activity envelope.
    pub fn new(connector: Box<dyn Connector>, client_id: impl Into<String>, pid: u32) -> Self {
        Self {
            connector,
            transport: None,
            state: SessionState::Disconnected,
            client_id: client_id.into(),
            pid,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Discover the peer endpoint and perform the versioned handshake.
    ///
    /// On any failure the transport is released and the session ends
    /// `Disconnected`; a peer reply other than a READY dispatch is reported
    /// as [`PresenceError::HandshakeRejected`].
    pub async fn connect(&mut self) -> Result<()> {
        self.state = SessionState::Connecting;
        let transport = match self.connector.connect().await {
            Ok(transport) => transport,
            Err(e) => {
                self.state = SessionState::Disconnected;
                return Err(e);
            }
        };
        self.transport = Some(transport);

        match self.handshake().await {
            Ok(()) => {
                self.state = SessionState::Connected;
                debug!(client_id = %self.client_id, "presence session connected");
                Ok(())
            }
            Err(e) => {
                self.release_transport().await;
                self.state = SessionState::Disconnected;
                Err(e)
            }
        }
    }

    async fn handshake(&mut self) -> Result<()> {
        self.state = SessionState::AwaitingHandshakeAck;
        let hello = Frame::new(
            Opcode::Handshake,
            json!({
                "v": IpcConfig::HANDSHAKE_VERSION,
                "client_id": self.client_id,
            }),
        );
        self.write(&hello).await?;

        let reply = self.read().await?;
        match reply.opcode {
            Opcode::Message
                if reply.payload["cmd"] == "DISPATCH" && reply.payload["evt"] == "READY" =>
            {
                Ok(())
            }
            Opcode::Close => Err(PresenceError::HandshakeRejected {
                reason: "peer sent CLOSE during handshake".into(),
            }),
            other => Err(PresenceError::HandshakeRejected {
                reason: format!("unexpected {other:?} frame during handshake"),
            }),
        }
    }

    /// Send one SET_ACTIVITY envelope. Connected sessions only.
    ///
    /// Each call stamps a fresh nonce; a fatal I/O error drops the transport
    /// and leaves the session `Disconnected` for the caller to `reconnect`.
    pub async fn send_payload(&mut self, activity: Value) -> Result<()> {
        if self.state != SessionState::Connected {
            return Err(PresenceError::NotConnected);
        }
        let envelope = json!({
            "cmd": "SET_ACTIVITY",
            "args": {
                "pid": self.pid,
                "activity": activity,
            },
            "nonce": uuid::Uuid::new_v4().to_string(),
        });
        self.write(&Frame::new(Opcode::Message, envelope)).await
    }

    /// Receive one frame from the peer.
    pub async fn recv(&mut self) -> Result<Frame> {
        self.read().await
    }

    /// Send a best-effort CLOSE notice, then unconditionally release the
    /// transport and return to `Disconnected`.
    ///
    /// The write may fail (the peer may already be gone); the handle is
    /// released either way so nothing leaks across reconnect cycles.
    pub async fn close(&mut self) {
        self.state = SessionState::Closing;
        if let Some(transport) = self.transport.as_mut() {
            let goodbye = Frame::new(Opcode::Close, json!({}));
            if let Err(e) = frame::write_frame(transport.as_mut(), &goodbye).await {
                debug!("CLOSE frame not delivered: {e}");
            }
        }
        self.release_transport().await;
        self.state = SessionState::Disconnected;
    }

    /// Tear down and dial again, discarding inner errors.
    ///
    /// Returns whether the session ended `Connected`. The terminal state is
    /// always `Connected` or `Disconnected`, with no partially open transport
    /// retained.
    pub async fn reconnect(&mut self) -> bool {
        self.close().await;
        if let Err(e) = self.connect().await {
            debug!("reconnect failed: {e}");
        }
        self.is_connected()
    }

    async fn write(&mut self, frame: &Frame) -> Result<()> {
        let transport = self
            .transport
            .as_mut()
            .ok_or(PresenceError::NotConnected)?;
        match frame::write_frame(transport.as_mut(), frame).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    async fn read(&mut self) -> Result<Frame> {
        let transport = self
            .transport
            .as_mut()
            .ok_or(PresenceError::NotConnected)?;
        match frame::read_frame(transport.as_mut()).await {
            Ok(frame) => Ok(frame),
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Drop the transport on fatal I/O so the next liveness check reports
    /// disconnected. Protocol-level errors keep the stream; the handshake
    /// path tears down separately.
    async fn fail(&mut self, err: &PresenceError) {
        if matches!(err, PresenceError::Io { .. }) {
            warn!("presence transport failed: {err}");
            self.release_transport().await;
            self.state = SessionState::Disconnected;
        }
    }

    async fn release_transport(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close().await;
        }
    }
}
