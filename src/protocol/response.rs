//! Header, status and message definitions
//!
//! Every message starts with the same 5-byte header. The status byte is a
//! set of flags whose meaning is the same in both directions.

use super::command::Opcode;
use super::codec::Block;

/// Status flags byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status(u8);

impl Status {
    /// Bit 0: the operation failed on the server
    pub const ERROR_FLAG: u8 = 0x01;

    /// Bit 1: a data block follows the header
    pub const PAYLOAD_FLAG: u8 = 0x02;

    /// No flags set
    pub const OK: Status = Status(0x00);

    /// Status announcing a trailing block
    pub const WITH_PAYLOAD: Status = Status(Self::PAYLOAD_FLAG);

    /// Server failure status
    pub const FAILED: Status = Status(Self::ERROR_FLAG);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_error(self) -> bool {
        self.0 & Self::ERROR_FLAG != 0
    }

    /// Payload flag as written, regardless of the error flag
    pub const fn has_payload(self) -> bool {
        self.0 & Self::PAYLOAD_FLAG != 0
    }

    /// Whether a block actually follows a response with this status.
    ///
    /// The error flag wins: error responses never carry a block.
    pub const fn response_has_block(self) -> bool {
        !self.is_error() && self.has_payload()
    }
}

/// Fixed message header: opcode + status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub opcode: Opcode,
    pub status: Status,
}

impl Header {
    pub fn new(opcode: Opcode, status: Status) -> Self {
        Self { opcode, status }
    }
}

/// Outcome of a successful round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    /// Opcode echoed by the server
    pub opcode: Opcode,

    /// Status flags from the response header
    pub status: Status,
}

impl Response {
    /// True if the server sent a block (now in the caller's buffer)
    pub fn has_block(&self) -> bool {
        self.status.response_has_block()
    }
}

impl From<Header> for Response {
    fn from(header: Header) -> Self {
        Self {
            opcode: header.opcode,
            status: header.status,
        }
    }
}

/// A request as seen by the server side of the protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub header: Header,

    /// Present only for write-block requests
    pub block: Option<Block>,
}
