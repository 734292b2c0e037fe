//! IPC session layer for the local presence peer.
//!
//! Layered bottom-up: a platform [`Transport`] provides the raw byte stream,
//! the framing codec in [`frame`] maps it to opcode-tagged JSON frames, and
//! the [`Session`] drives the handshake and messaging state machine over one
//! transport at a time.
//!
//! ```text
//! [u32 LE opcode][u32 LE length][UTF-8 JSON payload]
//! ```

pub mod frame;
pub mod session;
pub mod transport;

#[cfg(unix)]
pub mod unix;
#[cfg(windows)]
pub mod windows;

pub use frame::{Frame, Opcode};
pub use session::{Session, SessionState};
pub use transport::{platform_connector, Connector, Transport};
