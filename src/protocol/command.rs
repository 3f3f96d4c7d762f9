//! Command definitions
//!
//! The 32-bit opcode and the command selector packed inside it.

use std::fmt;

/// Bit position of the command field inside an opcode
pub const COMMAND_SHIFT: u32 = 12;

/// Width mask of the command field (6 bits)
pub const COMMAND_MASK: u32 = 0x3f;

/// JBOD command selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Mount,
    Unmount,
    SeekToDisk,
    SeekToBlock,
    ReadBlock,
    WriteBlock,

    /// Selector this client has no name for; passed through header-only
    Other(u8),
}

impl Command {
    /// Decode a 6-bit selector. Bits above the field are ignored.
    pub fn from_code(code: u8) -> Self {
        match code & COMMAND_MASK as u8 {
            0 => Command::Mount,
            1 => Command::Unmount,
            2 => Command::SeekToDisk,
            3 => Command::SeekToBlock,
            4 => Command::ReadBlock,
            5 => Command::WriteBlock,
            other => Command::Other(other),
        }
    }

    /// The 6-bit selector value
    pub fn code(self) -> u8 {
        match self {
            Command::Mount => 0,
            Command::Unmount => 1,
            Command::SeekToDisk => 2,
            Command::SeekToBlock => 3,
            Command::ReadBlock => 4,
            Command::WriteBlock => 5,
            Command::Other(code) => code & COMMAND_MASK as u8,
        }
    }

    /// Whether a request for this command carries a data block
    pub fn carries_request_block(self) -> bool {
        self == Command::WriteBlock
    }
}

/// A 32-bit JBOD opcode: command field plus command-specific operands
///
/// Operand packing (disk id, block id) belongs to the storage layer; this
/// type only knows where the command field lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Opcode(u32);

impl Opcode {
    /// Wrap a raw opcode value
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Build an opcode from a command and operand bits.
    ///
    /// Operand bits overlapping the command field are cleared.
    pub fn new(command: Command, operands: u32) -> Self {
        let field = COMMAND_MASK << COMMAND_SHIFT;
        let cmd = (command.code() as u32 & COMMAND_MASK) << COMMAND_SHIFT;
        Self((operands & !field) | cmd)
    }

    /// Raw 32-bit value (host order)
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Decode the command field
    pub fn command(self) -> Command {
        Command::from_code(((self.0 >> COMMAND_SHIFT) & COMMAND_MASK) as u8)
    }

    /// Every bit outside the command field
    pub fn operands(self) -> u32 {
        self.0 & !(COMMAND_MASK << COMMAND_SHIFT)
    }
}

impl From<u32> for Opcode {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<Opcode> for u32 {
    fn from(opcode: Opcode) -> Self {
        opcode.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x} ({:?})", self.0, self.command())
    }
}
