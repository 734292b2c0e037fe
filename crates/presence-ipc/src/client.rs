//! Client facade: platform selection and the outward-facing surface.
//!
//! [`PresenceClient`] is the one object the surrounding application holds.
//! It binds exactly one concrete transport per process at construction and
//! exposes connect, update-presence, close, reconnect and a liveness flag —
//! nothing else.

use serde_json::Value;

use crate::error::{PresenceError, Result};
use crate::ipc::session::Session;
use crate::ipc::transport::{platform_connector, Connector};

/// Handle to a presence session with the local peer application.
pub struct PresenceClient {
    session: Session,
}

impl PresenceClient {
    /// Create a client bound to the platform transport (Unix domain socket,
    /// or a named pipe on Windows), stamped with this process's id.
    ///
    /// `client_id` is the stable application identifier the peer expects in
    /// the handshake.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self::with_connector(platform_connector(), client_id, std::process::id())
    }

    /// Create a client over an explicit connector.
    pub fn with_connector(
        connector: Box<dyn Connector>,
        client_id: impl Into<String>,
        pid: u32,
    ) -> Self {
        Self {
            session: Session::new(connector, client_id, pid),
        }
    }

    /// Connect to the peer and complete the handshake.
    pub async fn connect(&mut self) -> Result<()> {
        self.session.connect().await
    }

    /// Send one activity update.
    ///
    /// If the session is down, one reconnect is attempted before giving up
    /// with [`PresenceError::NotConnected`]; the update is dropped rather
    /// than queued or retried.
    pub async fn update_presence(&mut self, activity: Value) -> Result<()> {
        if !self.session.is_connected() && !self.session.reconnect().await {
            return Err(PresenceError::NotConnected);
        }
        self.session.send_payload(activity).await
    }

    /// Notify the peer and release the transport. Never fails.
    pub async fn close(&mut self) {
        self.session.close().await;
    }

    /// Tear down and dial again, discarding inner errors. Returns the
    /// resulting liveness.
    pub async fn reconnect(&mut self) -> bool {
        self.session.reconnect().await
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::frame::{Frame, Opcode};
    use crate::ipc::transport::mock::{MockConnector, MockTransport};
    use serde_json::json;

    fn ready_transport() -> MockTransport {
        let transport = MockTransport::new();
        transport.push_frame(&Frame::new(
            Opcode::Message,
            json!({"cmd": "DISPATCH", "evt": "READY"}),
        ));
        transport
    }

    fn client_with(transports: impl IntoIterator<Item = MockTransport>) -> PresenceClient {
        PresenceClient::with_connector(
            Box::new(MockConnector::new(transports)),
            "831641858643460106",
            1234,
        )
    }

    #[tokio::test]
    async fn test_client_starts_disconnected() {
        let client = client_with([]);
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_update_presence_reconnects_once_when_down() {
        // Never explicitly connected: update_presence dials on demand.
        let mut client = client_with([ready_transport()]);
        client
            .update_presence(json!({"details": "Song"}))
            .await
            .unwrap();
        assert!(client.is_connected());
    }

    #[tokio::test]
    async fn test_update_presence_gives_up_when_peer_absent() {
        let mut client = client_with([]);
        match client.update_presence(json!({})).await {
            Err(PresenceError::NotConnected) => {}
            other => panic!("Expected NotConnected, got: {:?}", other),
        }
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_close_clears_liveness() {
        let mut client = client_with([ready_transport()]);
        client.connect().await.unwrap();
        assert!(client.is_connected());

        client.close().await;
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_reconnect_recovers_after_peer_restart() {
        let first = ready_transport();
        let second = ready_transport();

        let mut client = client_with([first.clone(), second]);
        client.connect().await.unwrap();

        first.set_fail_writes(true);
        assert!(client.update_presence(json!({"state": "x"})).await.is_err());
        assert!(!client.is_connected());

        // The next update dials the restarted peer and succeeds.
        client
            .update_presence(json!({"state": "x"}))
            .await
            .unwrap();
        assert!(client.is_connected());
    }
}
