//! # jbodnet
//!
//! Blocking client for the JBOD network protocol: block-device style
//! operations (mount, unmount, seek, read block, write block) sent to a
//! remote JBOD server over TCP.
//!
//! - Reliable whole-buffer I/O over any byte stream
//! - Fixed-size packet codec (5-byte header + optional 256-byte block)
//! - Explicit connection objects, one outstanding request per connection
//! - `connect` / `disconnect` / `client_operation` facade with 0 / -1 results
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │          JbodClient (connect / disconnect / 0 | -1)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │              Connection::perform (round trip)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │  Transport  │
//!   │  (codec)    │─────────▶│ (full I/O)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  TcpStream  │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod transport;
pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, JbodError, Result};
pub use config::Config;
pub use network::{Connection, JbodClient, SharedConnection};
pub use protocol::{Block, Command, Opcode, Response, BLOCK_SIZE, HEADER_LEN};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of jbodnet
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
