//! Network Module
//!
//! Client connections to a JBOD server.
//!
//! ## Architecture
//! - `Connection`: owns one stream, performs sequential round trips
//! - `JbodClient`: single-slot facade returning 0 / -1
//! - `SharedConnection`: mutex-guarded handle for multi-threaded callers

mod connection;
mod client;
mod shared;

pub use connection::Connection;
pub use client::{JbodClient, OP_FAILURE, OP_SUCCESS};
pub use shared::SharedConnection;
