//! Transport abstraction over the platform byte stream.
//!
//! The session never branches on platform identity: it talks to a boxed
//! [`Transport`] produced by a [`Connector`], and exactly one concrete
//! connector is bound per process by [`platform_connector`].

use async_trait::async_trait;

use crate::error::Result;

/// Ordered, reliable byte stream to the presence peer.
///
/// `read` may return fewer bytes than requested per call; callers needing an
/// exact size must loop (see the framing codec). A return of `Ok(0)` means
/// the peer closed the stream.
#[async_trait]
pub trait Transport: Send {
    /// Read up to `buf.len()` bytes into `buf`, returning the count read.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write all of `buf` to the peer.
    async fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    /// Release the underlying handle. Infallible; safe to call twice.
    async fn close(&mut self);
}

/// Locates the peer's listening endpoint and opens a [`Transport`].
///
/// Discovery probes up to ten candidate endpoints in index order and selects
/// the first that accepts; with none accepting it reports
/// [`PresenceError::EndpointNotFound`](crate::PresenceError::EndpointNotFound).
#[async_trait]
pub trait Connector: Send {
    async fn connect(&self) -> Result<Box<dyn Transport>>;
}

/// Bind the transport implementation for the running platform.
pub fn platform_connector() -> Box<dyn Connector> {
    #[cfg(unix)]
    {
        Box::new(super::unix::SocketConnector::new())
    }

    #[cfg(windows)]
    {
        Box::new(super::windows::PipeConnector::new())
    }
}
