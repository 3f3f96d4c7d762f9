//! JBOD client facade
//!
//! The `connect` / `disconnect` / `client_operation` contract used by the
//! storage layer. Holds at most one connection. Every failure of an
//! operation collapses to `-1`; callers only ever learn success or failure.

use crate::config::{join_host_port, Config};
use crate::error::{JbodError, Result};
use crate::protocol::{Block, Opcode, Response};

use super::Connection;

/// Result code of a successful operation
pub const OP_SUCCESS: i32 = 0;

/// Result code of a failed operation
pub const OP_FAILURE: i32 = -1;

/// Single-slot JBOD client
#[derive(Default)]
pub struct JbodClient {
    /// Socket settings applied on connect
    config: Config,

    /// Active connection, if any
    connection: Option<Connection>,
}

impl JbodClient {
    /// Create a disconnected client with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a disconnected client with the given socket settings
    ///
    /// `config.server_addr` is ignored; the address comes from `connect`.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    /// Connect to the server at `ip:port`. Returns false on failure.
    ///
    /// Connecting while already connected is refused and the existing
    /// connection is kept.
    pub fn connect(&mut self, ip: &str, port: u16) -> bool {
        match self.try_connect(ip, port) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Connect to {}:{} failed: {}", ip, port, e);
                false
            }
        }
    }

    /// Connect, reporting why it failed
    pub fn try_connect(&mut self, ip: &str, port: u16) -> Result<()> {
        if let Some(existing) = &self.connection {
            return Err(JbodError::AlreadyConnected(existing.peer_addr().to_string()));
        }

        let config = Config {
            server_addr: join_host_port(ip, port),
            ..self.config.clone()
        };
        self.connection = Some(Connection::connect_with_config(&config)?);

        Ok(())
    }

    /// Close the active connection. Does nothing when not connected.
    pub fn disconnect(&mut self) {
        match self.connection.take() {
            Some(connection) => {
                if let Err(e) = connection.disconnect() {
                    tracing::warn!("Disconnect failed: {}", e);
                }
            }
            None => tracing::debug!("Disconnect requested while not connected"),
        }
    }

    /// Whether a connection is open
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Send one JBOD operation and wait for its response
    ///
    /// Returns [`OP_SUCCESS`] or [`OP_FAILURE`]. Transport failures, server
    /// errors and usage errors are indistinguishable here; use
    /// [`JbodClient::try_operation`] to see the cause.
    pub fn client_operation(&mut self, op: u32, block: Option<&mut Block>) -> i32 {
        match self.try_operation(Opcode::from_raw(op), block) {
            Ok(_) => OP_SUCCESS,
            Err(e) => {
                tracing::warn!("JBOD operation 0x{:08x} failed: {}", op, e);
                OP_FAILURE
            }
        }
    }

    /// Send one JBOD operation, keeping the error detail
    ///
    /// After a transport failure the connection stays in the slot but is
    /// broken; every call fails until `disconnect` and a fresh `connect`.
    pub fn try_operation(&mut self, opcode: Opcode, block: Option<&mut Block>) -> Result<Response> {
        let connection = self.connection.as_mut().ok_or(JbodError::NotConnected)?;
        connection.perform(opcode, block)
    }

    /// The active connection, if any
    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }
}
