//! Centralized configuration for the presence IPC client.
//!
//! Connection, discovery and framing parameters live here so the transport
//! and session layers share one source of truth.

use std::time::Duration;

/// IPC connection and framing parameters.
pub struct IpcConfig;

impl IpcConfig {
    /// Protocol version sent in the handshake payload.
    pub const HANDSHAKE_VERSION: u32 = 1;

    /// Number of endpoint candidates probed during discovery (indices 0..N).
    pub const ENDPOINT_CANDIDATES: u32 = 10;

    /// Bounded connect timeout for the socket transport. The named pipe
    /// transport relies on the OS open call instead.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

    /// Upper bound on a declared frame payload length. Presence payloads are
    /// small; anything near this size is a corrupt or hostile header.
    pub const MAX_FRAME_PAYLOAD: usize = 1024 * 1024;

    /// Environment variables consulted, in order, for the socket base
    /// directory. First non-empty value wins.
    pub const BASE_DIR_ENV_VARS: [&'static str; 4] =
        ["XDG_RUNTIME_DIR", "TMPDIR", "TMP", "TEMP"];

    /// Fallback base directory when no environment variable is set.
    pub const BASE_DIR_FALLBACK: &'static str = "/tmp";

    /// Socket file name prefix; the candidate index is appended.
    pub const ENDPOINT_PREFIX: &'static str = "discord-ipc-";

    /// Named pipe name prefix on Windows; the candidate index is appended.
    pub const PIPE_PREFIX: &'static str = r"\\?\pipe\discord-ipc-";
}
