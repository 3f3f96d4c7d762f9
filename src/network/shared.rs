//! Shared connection handle
//!
//! Lets several threads issue operations over one connection. The lock is
//! held for the whole round trip, which keeps requests strictly sequential.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::protocol::{Block, Opcode, Response};

use super::Connection;

/// Cloneable, thread-safe handle to a [`Connection`]
pub struct SharedConnection<S = TcpStream> {
    inner: Arc<Mutex<Connection<S>>>,
}

impl<S> Clone for SharedConnection<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Read + Write> SharedConnection<S> {
    pub fn new(connection: Connection<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(connection)),
        }
    }

    /// Perform one round trip while holding the connection lock
    pub fn perform(&self, opcode: Opcode, block: Option<&mut Block>) -> Result<Response> {
        self.inner.lock().perform(opcode, block)
    }

    pub fn peer_addr(&self) -> String {
        self.inner.lock().peer_addr().to_string()
    }

    pub fn round_trips(&self) -> u64 {
        self.inner.lock().round_trips()
    }

    /// Take the connection back once this is the last handle
    pub fn try_unwrap(self) -> std::result::Result<Connection<S>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}
