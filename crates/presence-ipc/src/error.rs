//! Error types for the presence IPC client.
//!
//! Connection and send failures are surfaced to the caller as distinct
//! variants; `close()` and `reconnect()` deliberately discard inner errors to
//! guarantee they terminate in a known state.

use thiserror::Error;

/// Main error type for presence IPC operations.
#[derive(Debug, Error)]
pub enum PresenceError {
    /// No endpoint candidate accepted a connection during discovery.
    #[error("no presence IPC endpoint accepted a connection")]
    EndpointNotFound,

    /// Read/write failure on an established connection (e.g. broken pipe
    /// after the peer process exited).
    #[error("transport I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed header, oversized or unknown frame, or a payload that is not
    /// valid UTF-8 JSON.
    #[error("protocol error: {message}")]
    Protocol { message: String },

    /// The peer replied to the handshake with CLOSE or an unexpected frame.
    #[error("handshake rejected: {reason}")]
    HandshakeRejected { reason: String },

    /// A send was attempted without a live session.
    #[error("not connected to the presence peer")]
    NotConnected,

    /// Payload encoding failure.
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Result type alias for presence IPC operations.
pub type Result<T> = std::result::Result<T, PresenceError>;

impl From<std::io::Error> for PresenceError {
    fn from(err: std::io::Error) -> Self {
        PresenceError::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for PresenceError {
    fn from(err: serde_json::Error) -> Self {
        PresenceError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl PresenceError {
    /// True for failures that a caller-driven `reconnect()` can recover from.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PresenceError::EndpointNotFound
                | PresenceError::Io { .. }
                | PresenceError::NotConnected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PresenceError::HandshakeRejected {
            reason: "peer sent CLOSE".into(),
        };
        assert_eq!(err.to_string(), "handshake rejected: peer sent CLOSE");
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err: PresenceError = io.into();
        match err {
            PresenceError::Io { source, .. } => assert!(source.is_some()),
            other => panic!("Expected Io, got: {:?}", other),
        }
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(PresenceError::EndpointNotFound.is_recoverable());
        assert!(PresenceError::NotConnected.is_recoverable());
        assert!(!PresenceError::Protocol {
            message: "bad header".into()
        }
        .is_recoverable());
    }
}
