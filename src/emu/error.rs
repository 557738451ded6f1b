//
// error.rs --- Emulator error type.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

use std::io;
use std::result;

use thiserror::Error;

/// Errors raised by the memory bus and the CPU core.
///
/// Every variant is fatal to the `run` or `step` call that produced
/// it. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// No instruction is defined for the opcode fetched at `pc`.
    /// Prefixed opcodes are reported as `0x10xx` or `0x11xx`.
    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode { pc: u16, opcode: u16 },

    /// The indexed addressing postbyte does not name a valid mode.
    #[error("illegal indexed postbyte ${postbyte:02X} for opcode ${opcode:02X} at ${pc:04X}")]
    IllegalPostbyte { pc: u16, opcode: u16, postbyte: u8 },

    /// A memory access fell outside the address space. `pc` is the
    /// address of the instruction that made the access, if any.
    #[error("address ${address:X} out of range{}", pc_suffix(.pc))]
    OutOfRange { address: u32, pc: Option<u16> },

    /// A TFR or EXG postbyte named an undefined register or paired
    /// registers of different widths.
    #[error("invalid register transfer postbyte ${postbyte:02X} at ${pc:04X}")]
    InvalidRegisterTransfer { pc: u16, postbyte: u8 },

    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    #[error("invalid Intel HEX data: {0}")]
    Ihex(#[from] ihex::ReaderError),

    /// An Intel HEX record that this loader cannot place in a 16-bit
    /// address space (extended address records, mostly).
    #[error("unsupported Intel HEX record: {0}")]
    BadIhexRecord(String),
}

pub type Result<T> = result::Result<T, Error>;

fn pc_suffix(pc: &Option<u16>) -> String {
    match *pc {
        Some(pc) => format!(" at ${:04X}", pc),
        None => String::new(),
    }
}

impl Error {
    /// Attach the address of the executing instruction to a bus error
    /// that does not carry one yet.
    pub fn at(self, at_pc: u16) -> Error {
        match self {
            Error::OutOfRange { address, pc: None } => {
                Error::OutOfRange { address, pc: Some(at_pc) }
            }
            other => other,
        }
    }
}
