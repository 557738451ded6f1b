//
// indexed.rs --- Indexed addressing postbytes.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

//! Decoding of indexed addressing mode postbytes.
//!
//! The postbyte layout is:
//!
//! ```text
//!   0RRnnnnn          n,R with a 5-bit signed offset
//!   1RRi0000          ,R+            (i must be 0)
//!   1RRi0001          ,R++
//!   1RRi0010          ,-R            (i must be 0)
//!   1RRi0011          ,--R
//!   1RRi0100          ,R
//!   1RRi0101          B,R
//!   1RRi0110          A,R
//!   1RRi1000          n,R  8-bit offset
//!   1RRi1001          n,R  16-bit offset
//!   1RRi1011          D,R
//!   1xxi1100          n,PCR  8-bit offset
//!   1xxi1101          n,PCR  16-bit offset
//!   1xx11111          [n]  extended indirect
//! ```
//!
//! `RR` selects X, Y, U or S and `i` requests one level of indirection.
//! The CPU resolves the decoded form in `CPU::indexed`.

/// The base register of an indexed operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexReg {
    X,
    Y,
    U,
    S,
}

/// The address calculation an indexed postbyte selects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexMode {
    /// `n,R` with the offset taken from the postbyte itself.
    Offset5(i8),
    PostInc1,
    PostInc2,
    PreDec1,
    PreDec2,
    NoOffset,
    AccB,
    AccA,
    Offset8,
    Offset16,
    AccD,
    Pc8,
    Pc16,
    ExtendedIndirect,
}

/// A decoded indexed postbyte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Postbyte {
    pub reg: IndexReg,
    pub mode: IndexMode,
    pub indirect: bool,
}

impl Postbyte {
    /// Decode an indexed postbyte. Returns `None` for the undefined
    /// encodings.
    pub fn decode(postbyte: u8) -> Option<Postbyte> {
        let reg = match (postbyte >> 5) & 0x03 {
            0b00 => IndexReg::X,
            0b01 => IndexReg::Y,
            0b10 => IndexReg::U,
            _ => IndexReg::S,
        };

        // If the top bit is clear, it's `EA = ,R + 5-bit offset`.
        if postbyte & 0x80 == 0 {
            // Mask out 5-bit signed offset and sign extend.
            let offset = ((postbyte & 0x1f) ^ 0x10).wrapping_sub(0x10) as i8;
            return Some(Postbyte {
                reg: reg,
                mode: IndexMode::Offset5(offset),
                indirect: false,
            });
        }

        let indirect = postbyte & 0x10 != 0;
        let mode = match postbyte & 0x0f {
            0b0000 if !indirect => IndexMode::PostInc1,
            0b0001 => IndexMode::PostInc2,
            0b0010 if !indirect => IndexMode::PreDec1,
            0b0011 => IndexMode::PreDec2,
            0b0100 => IndexMode::NoOffset,
            0b0101 => IndexMode::AccB,
            0b0110 => IndexMode::AccA,
            0b1000 => IndexMode::Offset8,
            0b1001 => IndexMode::Offset16,
            0b1011 => IndexMode::AccD,
            0b1100 => IndexMode::Pc8,
            0b1101 => IndexMode::Pc16,
            0b1111 if indirect => IndexMode::ExtendedIndirect,
            _ => return None,
        };

        Some(Postbyte {
            reg: reg,
            mode: mode,
            indirect: indirect,
        })
    }

    /// Offset bytes that follow the postbyte.
    pub fn extra_bytes(&self) -> u8 {
        match self.mode {
            IndexMode::Offset8 | IndexMode::Pc8 => 1,
            IndexMode::Offset16 | IndexMode::Pc16 | IndexMode::ExtendedIndirect => 2,
            _ => 0,
        }
    }

    /// Cycles added to the instruction's base count.
    pub fn extra_cycles(&self) -> u8 {
        let direct = match self.mode {
            IndexMode::Offset5(_) => 1,
            IndexMode::PostInc1 | IndexMode::PreDec1 => 2,
            IndexMode::PostInc2 | IndexMode::PreDec2 => 3,
            IndexMode::NoOffset => 0,
            IndexMode::AccB | IndexMode::AccA => 1,
            IndexMode::Offset8 | IndexMode::Pc8 => 1,
            IndexMode::Offset16 | IndexMode::AccD => 4,
            IndexMode::Pc16 => 5,
            IndexMode::ExtendedIndirect => 2,
        };

        if self.indirect { direct + 3 } else { direct }
    }
}
