//! jbod-cli
//!
//! Issues a single JBOD operation against a server and prints the result.

use clap::{Parser, Subcommand};
use jbodnet::protocol::{Command, Opcode, BLOCK_SIZE};
use jbodnet::{Config, Connection};
use tracing_subscriber::{fmt, EnvFilter};

/// JBOD CLI
#[derive(Parser, Debug)]
#[command(name = "jbod-cli")]
#[command(about = "Send one operation to a JBOD server")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:3333")]
    server: String,

    /// Operand bits merged into the opcode outside the command field
    #[arg(short, long, default_value = "0", global = true)]
    operands: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mount the disks
    Mount,

    /// Unmount the disks
    Unmount,

    /// Seek to the disk given in the operands
    SeekDisk,

    /// Seek to the block given in the operands
    SeekBlock,

    /// Read the current block
    Read,

    /// Fill the current block with one byte value
    Write {
        /// Byte value to write into every position of the block
        byte: u8,
    },

    /// Send a raw opcode as-is (decimal or 0x-prefixed hex)
    Raw {
        #[arg(value_parser = parse_opcode)]
        opcode: u32,
    },
}

fn parse_opcode(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid opcode {:?}: {}", s, e))
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,jbodnet=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let mut block = [0u8; BLOCK_SIZE];
    let opcode = match args.command {
        Commands::Mount => Opcode::new(Command::Mount, args.operands),
        Commands::Unmount => Opcode::new(Command::Unmount, args.operands),
        Commands::SeekDisk => Opcode::new(Command::SeekToDisk, args.operands),
        Commands::SeekBlock => Opcode::new(Command::SeekToBlock, args.operands),
        Commands::Read => Opcode::new(Command::ReadBlock, args.operands),
        Commands::Write { byte } => {
            block = [byte; BLOCK_SIZE];
            Opcode::new(Command::WriteBlock, args.operands)
        }
        Commands::Raw { opcode } => Opcode::from_raw(opcode),
    };

    let config = Config::builder().server_addr(&args.server).build();
    let mut connection = match Connection::connect_with_config(&config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let result = connection.perform(opcode, Some(&mut block));

    if let Err(e) = connection.disconnect() {
        tracing::warn!("{}", e);
    }

    match result {
        Ok(response) => {
            println!("{} -> status 0x{:02x}", response.opcode, response.status.bits());
            if response.has_block() {
                print_block(&block);
            }
        }
        Err(e) => {
            println!("{} -> failed: {}", opcode, e);
            std::process::exit(1);
        }
    }
}

fn print_block(block: &[u8]) {
    for (row, chunk) in block.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        println!("{:04x}  {}", row * 16, hex.join(" "));
    }
}
