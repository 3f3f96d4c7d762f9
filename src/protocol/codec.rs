//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────────┬────────────┬─────────────────────────────┐
//! │ Opcode (4)   │ Status (1) │   Block (256, optional)     │
//! └──────────────┴────────────┴─────────────────────────────┘
//! ```
//!
//! All integers are big-endian. There is no length field: a request
//! carries a block iff its command is write-block, a response carries one
//! iff its status has the payload flag set and the error flag clear.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{JbodError, Result};
use crate::transport::{reliable_read_into, reliable_write};
use super::{Command, Header, Opcode, Request, Response, Status};

/// Header size: 4 bytes opcode + 1 byte status
pub const HEADER_LEN: usize = 5;

/// Size of a JBOD data block
pub const BLOCK_SIZE: usize = 256;

/// One JBOD data block
pub type Block = [u8; BLOCK_SIZE];

// =============================================================================
// Header Encoding/Decoding
// =============================================================================

/// Append a header to `buf`
pub fn encode_header(header: &Header, buf: &mut BytesMut) {
    buf.put_u32(header.opcode.raw());
    buf.put_u8(header.status.bits());
}

/// Decode a header from the first `HEADER_LEN` bytes
pub fn decode_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < HEADER_LEN {
        return Err(JbodError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_LEN,
            bytes.len()
        )));
    }

    let mut buf = &bytes[..HEADER_LEN];
    let opcode = Opcode::from_raw(buf.get_u32());
    let status = Status::from_bits(buf.get_u8());

    Ok(Header::new(opcode, status))
}

// =============================================================================
// Request Encoding (client side)
// =============================================================================

/// Encode a request to bytes
///
/// Write-block requests set the payload flag and append the block; a
/// write-block without a block is rejected. Every other command is
/// header-only with a zero status, and any block passed in is ignored.
pub fn encode_request(opcode: Opcode, block: Option<&Block>) -> Result<Bytes> {
    if !opcode.command().carries_request_block() {
        let mut message = BytesMut::with_capacity(HEADER_LEN);
        encode_header(&Header::new(opcode, Status::OK), &mut message);
        return Ok(message.freeze());
    }

    let block = block.ok_or(JbodError::MissingBlock)?;
    let mut message = BytesMut::with_capacity(HEADER_LEN + BLOCK_SIZE);
    encode_header(&Header::new(opcode, Status::WITH_PAYLOAD), &mut message);
    message.put_slice(block);

    Ok(message.freeze())
}

/// Encode a request and write it to a stream
pub fn write_request<W: Write + ?Sized>(
    writer: &mut W,
    opcode: Opcode,
    block: Option<&Block>,
) -> Result<()> {
    let message = encode_request(opcode, block)?;
    reliable_write(writer, &message)
}

// =============================================================================
// Response Decoding (client side)
// =============================================================================

/// Decode a response header
///
/// Fails with [`JbodError::ServerError`] when the error flag is set. The
/// payload flag is not looked at in that case.
pub fn decode_response_header(bytes: &[u8]) -> Result<Header> {
    let header = decode_header(bytes)?;

    if header.status.is_error() {
        return Err(JbodError::ServerError {
            opcode: header.opcode.raw(),
            status: header.status.bits(),
        });
    }

    Ok(header)
}

/// Read a complete response from a stream
///
/// Reads the header, then exactly one block into `block` when the payload
/// flag says one follows. Nothing beyond the header is read for error
/// responses.
pub fn read_response<R: Read + ?Sized>(reader: &mut R, block: &mut Block) -> Result<Response> {
    let mut raw = [0u8; HEADER_LEN];
    reliable_read_into(reader, &mut raw)?;

    let header = decode_response_header(&raw)?;

    if header.status.response_has_block() {
        reliable_read_into(reader, block)?;
    }

    Ok(Response::from(header))
}

// =============================================================================
// Server-side mirror
// =============================================================================

/// Encode a response to bytes
///
/// The block is appended only when the status announces one (payload flag
/// set, error flag clear).
pub fn encode_response(header: &Header, block: Option<&Block>) -> Result<Bytes> {
    if !header.status.response_has_block() {
        let mut message = BytesMut::with_capacity(HEADER_LEN);
        encode_header(header, &mut message);
        return Ok(message.freeze());
    }

    let block = block.ok_or_else(|| {
        JbodError::Protocol(format!(
            "status 0x{:02x} announces a block but none was given",
            header.status.bits()
        ))
    })?;

    let mut message = BytesMut::with_capacity(HEADER_LEN + BLOCK_SIZE);
    encode_header(header, &mut message);
    message.put_slice(block);

    Ok(message.freeze())
}

/// Read a complete request from a stream
pub fn read_request<R: Read + ?Sized>(reader: &mut R) -> Result<Request> {
    let mut raw = [0u8; HEADER_LEN];
    reliable_read_into(reader, &mut raw)?;
    let header = decode_header(&raw)?;

    let block = if header.opcode.command() == Command::WriteBlock {
        let mut block = [0u8; BLOCK_SIZE];
        reliable_read_into(reader, &mut block)?;
        Some(block)
    } else {
        None
    };

    Ok(Request { header, block })
}

/// Total encoded size of a request for `opcode`
pub fn request_len(opcode: Opcode) -> usize {
    if opcode.command().carries_request_block() {
        HEADER_LEN + BLOCK_SIZE
    } else {
        HEADER_LEN
    }
}

/// Copy a block out of a byte slice
///
/// Fails unless `bytes` is exactly `BLOCK_SIZE` long.
pub fn block_from_slice(bytes: &[u8]) -> Result<Block> {
    Block::try_from(bytes).map_err(|_| {
        JbodError::Protocol(format!(
            "Block must be {} bytes, got {}",
            BLOCK_SIZE,
            bytes.len()
        ))
    })
}
