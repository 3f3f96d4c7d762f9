//! Transport Module
//!
//! Whole-buffer reads and writes over a byte stream.
//!
//! `Read::read` and `Write::write` may move fewer bytes than asked for.
//! These helpers loop until the full length has been transferred, so the
//! codec can treat every header and block as a single unit.
//!
//! ## Failure Rules
//! - Short transfer: keep looping
//! - `ErrorKind::Interrupted`: retry the same call
//! - Zero-length transfer: peer closed the stream, reported as
//!   [`JbodError::Transport`] instead of spinning
//! - Any other I/O error: [`JbodError::Io`]

use std::io::{self, Read, Write};

use crate::error::{JbodError, Result};

/// Read exactly `len` bytes from the stream
pub fn reliable_read<R: Read + ?Sized>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reliable_read_into(reader, &mut buf)?;
    Ok(buf)
}

/// Fill `buf` completely from the stream
pub fn reliable_read_into<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let len = buf.len();
    let mut filled = 0;

    while filled < len {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(JbodError::Transport(format!(
                    "connection closed after {} of {} bytes read",
                    filled, len
                )));
            }
            Ok(n) => {
                filled += n;
                if filled < len {
                    tracing::trace!("Short read: {} of {} bytes", filled, len);
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(JbodError::Io(e)),
        }
    }

    Ok(())
}

/// Write all of `buf` to the stream and flush it
pub fn reliable_write<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> Result<()> {
    let len = buf.len();
    let mut written = 0;

    while written < len {
        match writer.write(&buf[written..]) {
            Ok(0) => {
                return Err(JbodError::Transport(format!(
                    "connection closed after {} of {} bytes written",
                    written, len
                )));
            }
            Ok(n) => {
                written += n;
                if written < len {
                    tracing::trace!("Short write: {} of {} bytes", written, len);
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(JbodError::Io(e)),
        }
    }

    writer.flush()?;
    Ok(())
}
