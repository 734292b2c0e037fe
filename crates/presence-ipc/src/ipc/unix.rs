//! Unix domain socket transport.
//!
//! The presence peer listens on `discord-ipc-{0..9}` inside the first
//! non-empty directory named by `XDG_RUNTIME_DIR`, `TMPDIR`, `TMP` or `TEMP`,
//! falling back to `/tmp`. Discovery probes the candidates in index order,
//! skipping paths that do not exist, and connects with a bounded timeout.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::debug;

use crate::config::IpcConfig;
use crate::error::{PresenceError, Result};
use crate::ipc::transport::{Connector, Transport};

/// Connector for the Unix domain socket endpoint.
pub struct SocketConnector {
    base_dir: Option<PathBuf>,
}

impl SocketConnector {
    /// Connector resolving the base directory from the environment at each
    /// connect attempt.
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Connector probing a fixed base directory instead of the environment.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

impl Default for SocketConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for SocketConnector {
    async fn connect(&self) -> Result<Box<dyn Transport>> {
        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => base_dir_from(|key| std::env::var(key).ok()),
        };
        let stream = discover(&base).await?;
        Ok(Box::new(SocketTransport {
            stream: Some(stream),
        }))
    }
}

/// Resolve the socket base directory from an environment lookup.
fn base_dir_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    for key in IpcConfig::BASE_DIR_ENV_VARS {
        if let Some(value) = lookup(key) {
            if !value.is_empty() {
                return PathBuf::from(value);
            }
        }
    }
    PathBuf::from(IpcConfig::BASE_DIR_FALLBACK)
}

/// Candidate socket paths in probe order.
fn candidate_paths(base: &Path) -> Vec<PathBuf> {
    (0..IpcConfig::ENDPOINT_CANDIDATES)
        .map(|index| base.join(format!("{}{}", IpcConfig::ENDPOINT_PREFIX, index)))
        .collect()
}

/// Probe candidates in order and connect to the first that accepts.
async fn discover(base: &Path) -> Result<UnixStream> {
    for path in candidate_paths(base) {
        if !path.exists() {
            continue;
        }
        match tokio::time::timeout(IpcConfig::CONNECT_TIMEOUT, UnixStream::connect(&path)).await {
            Ok(Ok(stream)) => {
                debug!("connected to presence socket {}", path.display());
                return Ok(stream);
            }
            Ok(Err(e)) => {
                debug!("candidate {} refused: {}", path.display(), e);
            }
            Err(_) => {
                debug!("candidate {} timed out", path.display());
            }
        }
    }
    Err(PresenceError::EndpointNotFound)
}

/// Established socket connection to the peer.
pub struct SocketTransport {
    stream: Option<UnixStream>,
}

#[async_trait]
impl Transport for SocketTransport {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or(PresenceError::NotConnected)?;
        let n = stream.read(buf).await?;
        Ok(n)
    }

    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(PresenceError::NotConnected)?;
        stream.write_all(buf).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn close(&mut self) {
        self.stream = None;
    }
}
