//! Connection
//!
//! One client-to-server stream and the request/response round trip on it.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::error::{ErrorKind, JbodError, Result};
use crate::protocol::{read_response, write_request, Block, Opcode, Response, BLOCK_SIZE};

/// An open connection to a JBOD server
///
/// Owns its stream exclusively. `perform` takes `&mut self`, so at most one
/// request is ever outstanding; the protocol has no request id to match
/// interleaved responses.
///
/// Messages carry no length field, so a transport failure in the middle of
/// a round trip leaves the stream out of step with message boundaries. The
/// connection is then marked broken and refuses further round trips.
#[derive(Debug)]
pub struct Connection<S = TcpStream> {
    /// Underlying byte stream
    stream: S,

    /// Peer address for logging
    peer_addr: String,

    /// Requests fully sent, whatever the response
    round_trips: u64,

    /// Set after a transport failure; framing can no longer be trusted
    broken: bool,
}

impl Connection<TcpStream> {
    /// Connect to `host:port` with default socket settings
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let config = Config::builder().host_port(host, port).build();
        Self::connect_with_config(&config)
    }

    /// Connect to `config.server_addr`
    ///
    /// Resolution, socket creation and connect failures are all reported as
    /// [`JbodError::Connection`].
    pub fn connect_with_config(config: &Config) -> Result<Self> {
        let addrs: Vec<SocketAddr> = config
            .server_addr
            .to_socket_addrs()
            .map_err(|e| {
                JbodError::Connection(format!("invalid address {}: {}", config.server_addr, e))
            })?
            .collect();

        if addrs.is_empty() {
            return Err(JbodError::Connection(format!(
                "address {} resolved to nothing",
                config.server_addr
            )));
        }

        let stream = TcpStream::connect(&addrs[..]).map_err(|e| {
            JbodError::Connection(format!("connect to {} failed: {}", config.server_addr, e))
        })?;

        let socket_err =
            |e: std::io::Error| JbodError::Connection(format!("socket setup failed: {}", e));
        stream.set_nodelay(config.nodelay).map_err(socket_err)?;
        stream.set_read_timeout(config.read_timeout()).map_err(socket_err)?;
        stream.set_write_timeout(config.write_timeout()).map_err(socket_err)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| config.server_addr.clone());

        tracing::debug!("Connected to JBOD server {}", peer_addr);

        Ok(Self::from_stream(stream, peer_addr))
    }

    /// Close the connection
    ///
    /// Consumes the connection, so it cannot be used afterwards. A peer
    /// that already went away is not an error.
    pub fn disconnect(self) -> Result<()> {
        tracing::debug!(
            "Disconnecting from {} after {} round trips",
            self.peer_addr,
            self.round_trips
        );

        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(JbodError::Connection(format!(
                "shutdown of {} failed: {}",
                self.peer_addr, e
            ))),
        }
    }
}

impl<S: Read + Write> Connection<S> {
    /// Wrap an already-connected stream
    pub fn from_stream(stream: S, peer_addr: impl Into<String>) -> Self {
        Self {
            stream,
            peer_addr: peer_addr.into(),
            round_trips: 0,
            broken: false,
        }
    }

    /// Perform one request/response round trip
    ///
    /// For write-block, `block` is the data sent and must be present. For
    /// any response carrying a block, the block is copied into `block`
    /// (or read and dropped when `block` is `None`).
    ///
    /// A failed send returns immediately without waiting for a response.
    /// After any transport failure the connection is broken: later calls
    /// fail without touching the stream.
    pub fn perform(&mut self, opcode: Opcode, block: Option<&mut Block>) -> Result<Response> {
        if self.broken {
            return Err(JbodError::Transport(format!(
                "connection to {} unusable after transport failure",
                self.peer_addr
            )));
        }

        tracing::trace!("-> {} [{}]", opcode, self.peer_addr);

        write_request(&mut self.stream, opcode, block.as_deref())
            .map_err(|e| self.poison(e))?;
        self.round_trips += 1;

        let mut scratch = [0u8; BLOCK_SIZE];
        let sink = match block {
            Some(block) => block,
            None => &mut scratch,
        };

        let response = read_response(&mut self.stream, sink).map_err(|e| self.poison(e))?;
        tracing::trace!(
            "<- {} status=0x{:02x} [{}]",
            response.opcode,
            response.status.bits(),
            self.peer_addr
        );

        Ok(response)
    }

    /// Mark the connection broken if `err` happened on the stream itself
    fn poison(&mut self, err: JbodError) -> JbodError {
        if err.kind() == ErrorKind::Transport {
            tracing::warn!("Connection to {} broken: {}", self.peer_addr, err);
            self.broken = true;
        }
        err
    }

    /// Whether a transport failure has made this connection unusable
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Number of requests fully sent on this connection
    pub fn round_trips(&self) -> u64 {
        self.round_trips
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Unwrap the underlying stream
    pub fn into_inner(self) -> S {
        self.stream
    }
}
