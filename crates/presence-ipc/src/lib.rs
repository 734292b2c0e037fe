//! presence-ipc — IPC client core for Discord-style rich presence.
//!
//! Connects to a locally running presence peer over a Unix domain socket (or
//! a named pipe on Windows), performs the versioned handshake, and exchanges
//! length-prefixed, opcode-tagged JSON frames. At most one logical session is
//! open at a time; all reconnection is caller-driven.
//!
//! What the caller supplies: a stable client identifier at construction and a
//! JSON-encodable activity object per update. What this crate does *not* do:
//! media metadata extraction, player selection, queuing or automatic retry —
//! those belong to the surrounding application.
//!
//! # Example
//!
//! ```rust,ignore
//! use presence_ipc::{Activity, PresenceClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> presence_ipc::Result<()> {
//!     let mut client = PresenceClient::new("831641858643460106");
//!     client.connect().await?;
//!
//!     let activity = Activity::new()
//!         .with_state("Unknown Artist - Unknown Album")
//!         .with_details("Song");
//!     client.update_presence(activity.into_value()?).await?;
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod client;
pub mod config;
pub mod error;
pub mod ipc;

// Re-export commonly used types
pub use activity::{Activity, Assets, Timestamps};
pub use client::PresenceClient;
pub use error::{PresenceError, Result};
pub use ipc::{Connector, Frame, Opcode, Session, SessionState, Transport};
