//! Error types for jbodnet
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using JbodError
pub type Result<T> = std::result::Result<T, JbodError>;

/// Unified error type for jbodnet operations
#[derive(Debug, Error)]
pub enum JbodError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Server reported failure for opcode 0x{opcode:08x} (status 0x{status:02x})")]
    ServerError { opcode: u32, status: u8 },

    #[error("Write-block request without a data block")]
    MissingBlock,

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Not connected to server")]
    NotConnected,

    #[error("Already connected to {0}")]
    AlreadyConnected(String),
}

/// Coarse classification of a [`JbodError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Read/write on the stream failed
    Transport,
    /// Server reported an error, or a message was malformed
    Protocol,
    /// Address resolution, connect, or disconnect failed
    Connection,
    /// Operation invoked in the wrong connection state
    Usage,
}

impl JbodError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            JbodError::Io(_) | JbodError::Transport(_) => ErrorKind::Transport,
            JbodError::Protocol(_) | JbodError::ServerError { .. } | JbodError::MissingBlock => {
                ErrorKind::Protocol
            }
            JbodError::Connection(_) => ErrorKind::Connection,
            JbodError::NotConnected | JbodError::AlreadyConnected(_) => ErrorKind::Usage,
        }
    }

    /// True if the server answered with its error flag set
    pub fn is_server_error(&self) -> bool {
        matches!(self, JbodError::ServerError { .. })
    }
}
