//! Opcode Tests
//!
//! Tests for command field extraction and opcode construction.

use jbodnet::protocol::{Command, Opcode, COMMAND_MASK, COMMAND_SHIFT};

#[test]
fn test_command_codes() {
    let expected = [
        (Command::Mount, 0),
        (Command::Unmount, 1),
        (Command::SeekToDisk, 2),
        (Command::SeekToBlock, 3),
        (Command::ReadBlock, 4),
        (Command::WriteBlock, 5),
    ];

    for (command, code) in expected {
        assert_eq!(command.code(), code);
        assert_eq!(Command::from_code(code), command);
    }
}

#[test]
fn test_unknown_command_is_preserved() {
    assert_eq!(Command::from_code(6), Command::Other(6));
    assert_eq!(Command::from_code(63), Command::Other(63));
    assert_eq!(Command::Other(42).code(), 42);
}

#[test]
fn test_from_code_ignores_bits_above_field() {
    // 0x44 = 0b0100_0100 -> low 6 bits are 4
    assert_eq!(Command::from_code(0x44), Command::ReadBlock);
}

#[test]
fn test_command_extracted_from_bits_12_to_17() {
    let raw = (Command::WriteBlock.code() as u32) << COMMAND_SHIFT;
    assert_eq!(Opcode::from_raw(raw).command(), Command::WriteBlock);

    // Operand bits on both sides of the field do not leak into the command
    let noisy = raw | 0xFFFC_0FFF;
    assert_eq!(Opcode::from_raw(noisy).command(), Command::WriteBlock);

    assert_eq!(Opcode::from_raw(0xFFFC_0FFF).command(), Command::Mount);
}

#[test]
fn test_new_places_command_and_keeps_operands() {
    let opcode = Opcode::new(Command::SeekToBlock, 0x0000_00AB);

    assert_eq!(opcode.raw(), (3 << 12) | 0xAB);
    assert_eq!(opcode.command(), Command::SeekToBlock);
    assert_eq!(opcode.operands(), 0xAB);
}

#[test]
fn test_new_clears_operand_bits_in_command_field() {
    let field = COMMAND_MASK << COMMAND_SHIFT;
    let opcode = Opcode::new(Command::Mount, field | 0x1);

    assert_eq!(opcode.command(), Command::Mount);
    assert_eq!(opcode.raw(), 0x1);
}

#[test]
fn test_operands_excludes_command_field() {
    let opcode = Opcode::from_raw(0xFFFF_FFFF);

    assert_eq!(opcode.command(), Command::Other(63));
    assert_eq!(opcode.operands(), 0xFFFC_0FFF);
}

#[test]
fn test_carries_request_block() {
    assert!(Command::WriteBlock.carries_request_block());
    assert!(!Command::ReadBlock.carries_request_block());
    assert!(!Command::Mount.carries_request_block());
    assert!(!Command::Other(5 + 1).carries_request_block());
}

#[test]
fn test_u32_conversions() {
    let opcode: Opcode = 0x0000_5001.into();
    assert_eq!(opcode.command(), Command::WriteBlock);

    let raw: u32 = opcode.into();
    assert_eq!(raw, 0x0000_5001);
}

#[test]
fn test_display() {
    let opcode = Opcode::new(Command::ReadBlock, 0x12);
    assert_eq!(opcode.to_string(), "0x00004012 (ReadBlock)");
}
