//! Tests for reliable stream I/O
//!
//! These tests verify:
//! - Full-length reads/writes despite short transfers
//! - Interrupted calls are retried
//! - Closed streams and hard errors are reported, not spun on

#[path = "../common/mod.rs"]
mod common;

use std::io::{self, Cursor};

use common::{BrokenStream, ChunkedStream, InterruptingStream};
use jbodnet::transport::{reliable_read, reliable_read_into, reliable_write};
use jbodnet::{ErrorKind, JbodError, BLOCK_SIZE, HEADER_LEN};

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

// =============================================================================
// Partial Transfer Tests
// =============================================================================

#[test]
fn test_read_in_small_chunks() {
    for chunk in [1, 3, 17] {
        for len in [1, HEADER_LEN, BLOCK_SIZE, HEADER_LEN + BLOCK_SIZE, 1000] {
            let data = pattern(len);
            let mut stream = ChunkedStream::new(data.clone(), chunk);

            let read = reliable_read(&mut stream, len).unwrap();

            assert_eq!(read, data, "chunk={} len={}", chunk, len);
            assert_eq!(stream.read_calls, (len + chunk - 1) / chunk);
        }
    }
}

#[test]
fn test_write_in_small_chunks() {
    for chunk in [1, 3, 17] {
        for len in [1, HEADER_LEN, BLOCK_SIZE, HEADER_LEN + BLOCK_SIZE, 1000] {
            let data = pattern(len);
            let mut stream = ChunkedStream::new(Vec::new(), chunk);

            reliable_write(&mut stream, &data).unwrap();

            assert_eq!(stream.output, data, "chunk={} len={}", chunk, len);
            assert_eq!(stream.write_calls, (len + chunk - 1) / chunk);
        }
    }
}

#[test]
fn test_read_stops_at_requested_length() {
    let mut stream = ChunkedStream::new(pattern(100), 3);

    let first = reliable_read(&mut stream, HEADER_LEN).unwrap();

    assert_eq!(first, &pattern(100)[..HEADER_LEN]);
    assert_eq!(stream.bytes_read(), HEADER_LEN);
}

#[test]
fn test_read_into_fills_buffer() {
    let data = pattern(BLOCK_SIZE);
    let mut stream = ChunkedStream::new(data.clone(), 17);
    let mut block = [0u8; BLOCK_SIZE];

    reliable_read_into(&mut stream, &mut block).unwrap();

    assert_eq!(block.to_vec(), data);
}

#[test]
fn test_zero_length_is_noop() {
    let mut stream = ChunkedStream::new(Vec::new(), 1);

    assert!(reliable_read(&mut stream, 0).unwrap().is_empty());
    reliable_write(&mut stream, &[]).unwrap();

    assert_eq!(stream.read_calls, 0);
    assert_eq!(stream.write_calls, 0);
}

#[test]
fn test_read_from_cursor() {
    let data = pattern(HEADER_LEN + BLOCK_SIZE);
    let mut cursor = Cursor::new(data.clone());

    let read = reliable_read(&mut cursor, data.len()).unwrap();

    assert_eq!(read, data);
}

// =============================================================================
// Interruption Tests
// =============================================================================

#[test]
fn test_interrupted_read_is_retried() {
    let data = pattern(HEADER_LEN);
    let mut stream = InterruptingStream::new(ChunkedStream::new(data.clone(), 1));

    let read = reliable_read(&mut stream, HEADER_LEN).unwrap();

    assert_eq!(read, data);
    assert_eq!(stream.interruptions, HEADER_LEN);
}

#[test]
fn test_interrupted_write_is_retried() {
    let data = pattern(HEADER_LEN + BLOCK_SIZE);
    let mut stream = InterruptingStream::new(ChunkedStream::new(Vec::new(), 17));

    reliable_write(&mut stream, &data).unwrap();

    assert!(stream.interruptions > 0);
    assert_eq!(stream.into_inner().output, data);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_read_reports_closed_stream() {
    let mut stream = ChunkedStream::new(pattern(3), 1);

    let err = reliable_read(&mut stream, HEADER_LEN).unwrap_err();

    assert!(matches!(err, JbodError::Transport(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("3 of 5"));
    // One extra call observes end of stream, then it stops
    assert_eq!(stream.read_calls, 4);
}

#[test]
fn test_read_reports_io_error() {
    let mut stream = BrokenStream::new(io::ErrorKind::ConnectionReset);

    let err = reliable_read(&mut stream, HEADER_LEN).unwrap_err();

    match err {
        JbodError::Io(ref e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
        ref other => panic!("Expected Io error, got {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(stream.read_calls, 1);
}

#[test]
fn test_write_reports_io_error() {
    let mut stream = BrokenStream::new(io::ErrorKind::BrokenPipe);

    let err = reliable_write(&mut stream, &pattern(HEADER_LEN)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(stream.write_calls, 1);
}

#[test]
fn test_write_reports_zero_length_write() {
    let mut sink: &mut [u8] = &mut [0u8; 2];

    let err = reliable_write(&mut sink, &pattern(HEADER_LEN)).unwrap_err();

    assert!(matches!(err, JbodError::Transport(_)));
}
