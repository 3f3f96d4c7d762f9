//! Protocol Module
//!
//! Defines the JBOD wire protocol.
//!
//! ## Message Format
//! ```text
//! ┌──────────────┬────────────┬─────────────────────────────┐
//! │ Opcode (4)   │ Status (1) │   Block (256, optional)     │
//! └──────────────┴────────────┴─────────────────────────────┘
//! ```
//!
//! ### Opcode
//! Bits 12-17 select the command; all other bits are operands owned by the
//! storage layer.
//! - 0: MOUNT
//! - 1: UNMOUNT
//! - 2: SEEK_TO_DISK
//! - 3: SEEK_TO_BLOCK
//! - 4: READ_BLOCK
//! - 5: WRITE_BLOCK  - request carries a block
//!
//! ### Status Flags
//! - bit 0: ERROR   - operation failed on the server
//! - bit 1: PAYLOAD - a 256-byte block follows the header

mod command;
mod response;
mod codec;

pub use command::{Command, Opcode, COMMAND_MASK, COMMAND_SHIFT};
pub use response::{Header, Request, Response, Status};
pub use codec::{
    block_from_slice, decode_header, decode_response_header, encode_header, encode_request,
    encode_response, read_request, read_response, request_len, write_request, Block, BLOCK_SIZE,
    HEADER_LEN,
};
