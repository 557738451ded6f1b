//
// decode.rs --- 6809 opcode table.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

//! Opcode decoding.
//!
//! Every documented opcode maps to an `Op`: the instruction it
//! performs, the addressing mode of its operand, its length in bytes
//! (prefix included, indexed offset bytes excluded) and its base cycle
//! count. Prefixed opcodes are looked up as `0x10xx` and `0x11xx`.

use std::fmt;

macro_rules! instructions {
    ($($name:ident),* $(,)*) => {
        /// The operation an opcode performs, independent of its
        /// addressing mode.
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Inst {
            $($name),*
        }

        impl Inst {
            /// The assembler mnemonic.
            pub fn mnemonic(self) -> &'static str {
                match self {
                    $(Inst::$name => stringify!($name)),*
                }
            }
        }
    }
}

instructions! {
    // Read-modify-write on memory and accumulators.
    NEG, COM, LSR, ROR, ASR, LSL, ROL, DEC, INC, TST, JMP, CLR,
    NEGA, COMA, LSRA, RORA, ASRA, LSLA, ROLA, DECA, INCA, TSTA, CLRA,
    NEGB, COMB, LSRB, RORB, ASRB, LSLB, ROLB, DECB, INCB, TSTB, CLRB,

    // Miscellaneous.
    NOP, SYNC, DAA, ORCC, ANDCC, SEX, EXG, TFR,
    LEAX, LEAY, LEAS, LEAU, PSHS, PULS, PSHU, PULU,
    RTS, ABX, RTI, CWAI, MUL, SWI, SWI2, SWI3,

    // Branches.
    BRA, BRN, BHI, BLS, BHS, BLO, BNE, BEQ,
    BVC, BVS, BPL, BMI, BGE, BLT, BGT, BLE,
    LBRA, LBRN, LBHI, LBLS, LBHS, LBLO, LBNE, LBEQ,
    LBVC, LBVS, LBPL, LBMI, LBGE, LBLT, LBGT, LBLE,
    BSR, LBSR, JSR,

    // Accumulator and register arithmetic.
    SUBA, CMPA, SBCA, ANDA, BITA, LDA, STA, EORA, ADCA, ORA, ADDA,
    SUBB, CMPB, SBCB, ANDB, BITB, LDB, STB, EORB, ADCB, ORB, ADDB,
    SUBD, ADDD, CMPD, CMPX, CMPY, CMPU, CMPS,
    LDD, STD, LDX, STX, LDY, STY, LDU, STU, LDS, STS,
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

/// Addressing mode of an instruction's operand.
///
/// Postbyte instructions (TFR, EXG, PSHS, ...) use `Immediate8`: the
/// postbyte is their immediate operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Inherent,
    Immediate8,
    Immediate16,
    Direct,
    Extended,
    Indexed,
    Relative8,
    Relative16,
}

impl Mode {
    /// Operand bytes following the opcode. For `Indexed` this is the
    /// postbyte alone; offsets add to it.
    pub fn operand_bytes(self) -> u8 {
        match self {
            Mode::Inherent => 0,
            Mode::Immediate8 | Mode::Direct | Mode::Indexed | Mode::Relative8 => 1,
            Mode::Immediate16 | Mode::Extended | Mode::Relative16 => 2,
        }
    }
}

/// An instruction descriptor from the opcode table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Op {
    pub opcode: u16,
    pub inst: Inst,
    pub mode: Mode,
    pub bytes: u8,
    pub cycles: u8,
}

impl Op {
    /// Length of the opcode itself, 1 or 2 with a page prefix.
    pub fn opcode_bytes(&self) -> u8 {
        if self.opcode > 0xff { 2 } else { 1 }
    }
}

/// Look up the descriptor for `opcode`. Returns `None` for opcodes
/// the 6809 does not define.
pub fn lookup(opcode: u16) -> Option<Op> {
    use self::Inst::*;
    use self::Mode::*;

    let (inst, mode, bytes, cycles) = match opcode {
        0x00 => (NEG,   Direct, 2, 6),
        0x03 => (COM,   Direct, 2, 6),
        0x04 => (LSR,   Direct, 2, 6),
        0x06 => (ROR,   Direct, 2, 6),
        0x07 => (ASR,   Direct, 2, 6),
        0x08 => (LSL,   Direct, 2, 6),
        0x09 => (ROL,   Direct, 2, 6),
        0x0A => (DEC,   Direct, 2, 6),
        0x0C => (INC,   Direct, 2, 6),
        0x0D => (TST,   Direct, 2, 6),
        0x0E => (JMP,   Direct, 2, 3),
        0x0F => (CLR,   Direct, 2, 6),

        0x12 => (NOP,   Inherent, 1, 2),
        0x13 => (SYNC,  Inherent, 1, 4),
        0x16 => (LBRA,  Relative16, 3, 5),
        0x17 => (LBSR,  Relative16, 3, 9),
        0x19 => (DAA,   Inherent, 1, 2),
        0x1A => (ORCC,  Immediate8, 2, 3),
        0x1C => (ANDCC, Immediate8, 2, 3),
        0x1D => (SEX,   Inherent, 1, 2),
        0x1E => (EXG,   Immediate8, 2, 8),
        0x1F => (TFR,   Immediate8, 2, 6),

        0x20 => (BRA,   Relative8, 2, 3),
        0x21 => (BRN,   Relative8, 2, 3),
        0x22 => (BHI,   Relative8, 2, 3),
        0x23 => (BLS,   Relative8, 2, 3),
        0x24 => (BHS,   Relative8, 2, 3),
        0x25 => (BLO,   Relative8, 2, 3),
        0x26 => (BNE,   Relative8, 2, 3),
        0x27 => (BEQ,   Relative8, 2, 3),
        0x28 => (BVC,   Relative8, 2, 3),
        0x29 => (BVS,   Relative8, 2, 3),
        0x2A => (BPL,   Relative8, 2, 3),
        0x2B => (BMI,   Relative8, 2, 3),
        0x2C => (BGE,   Relative8, 2, 3),
        0x2D => (BLT,   Relative8, 2, 3),
        0x2E => (BGT,   Relative8, 2, 3),
        0x2F => (BLE,   Relative8, 2, 3),

        0x30 => (LEAX,  Indexed, 2, 4),
        0x31 => (LEAY,  Indexed, 2, 4),
        0x32 => (LEAS,  Indexed, 2, 4),
        0x33 => (LEAU,  Indexed, 2, 4),
        0x34 => (PSHS,  Immediate8, 2, 5),
        0x35 => (PULS,  Immediate8, 2, 5),
        0x36 => (PSHU,  Immediate8, 2, 5),
        0x37 => (PULU,  Immediate8, 2, 5),
        0x39 => (RTS,   Inherent, 1, 5),
        0x3A => (ABX,   Inherent, 1, 3),
        0x3B => (RTI,   Inherent, 1, 6),
        0x3C => (CWAI,  Immediate8, 2, 20),
        0x3D => (MUL,   Inherent, 1, 11),
        0x3F => (SWI,   Inherent, 1, 19),

        0x40 => (NEGA,  Inherent, 1, 2),
        0x43 => (COMA,  Inherent, 1, 2),
        0x44 => (LSRA,  Inherent, 1, 2),
        0x46 => (RORA,  Inherent, 1, 2),
        0x47 => (ASRA,  Inherent, 1, 2),
        0x48 => (LSLA,  Inherent, 1, 2),
        0x49 => (ROLA,  Inherent, 1, 2),
        0x4A => (DECA,  Inherent, 1, 2),
        0x4C => (INCA,  Inherent, 1, 2),
        0x4D => (TSTA,  Inherent, 1, 2),
        0x4F => (CLRA,  Inherent, 1, 2),

        0x50 => (NEGB,  Inherent, 1, 2),
        0x53 => (COMB,  Inherent, 1, 2),
        0x54 => (LSRB,  Inherent, 1, 2),
        0x56 => (RORB,  Inherent, 1, 2),
        0x57 => (ASRB,  Inherent, 1, 2),
        0x58 => (LSLB,  Inherent, 1, 2),
        0x59 => (ROLB,  Inherent, 1, 2),
        0x5A => (DECB,  Inherent, 1, 2),
        0x5C => (INCB,  Inherent, 1, 2),
        0x5D => (TSTB,  Inherent, 1, 2),
        0x5F => (CLRB,  Inherent, 1, 2),

        0x60 => (NEG,   Indexed, 2, 6),
        0x63 => (COM,   Indexed, 2, 6),
        0x64 => (LSR,   Indexed, 2, 6),
        0x66 => (ROR,   Indexed, 2, 6),
        0x67 => (ASR,   Indexed, 2, 6),
        0x68 => (LSL,   Indexed, 2, 6),
        0x69 => (ROL,   Indexed, 2, 6),
        0x6A => (DEC,   Indexed, 2, 6),
        0x6C => (INC,   Indexed, 2, 6),
        0x6D => (TST,   Indexed, 2, 6),
        0x6E => (JMP,   Indexed, 2, 3),
        0x6F => (CLR,   Indexed, 2, 6),

        0x70 => (NEG,   Extended, 3, 7),
        0x73 => (COM,   Extended, 3, 7),
        0x74 => (LSR,   Extended, 3, 7),
        0x76 => (ROR,   Extended, 3, 7),
        0x77 => (ASR,   Extended, 3, 7),
        0x78 => (LSL,   Extended, 3, 7),
        0x79 => (ROL,   Extended, 3, 7),
        0x7A => (DEC,   Extended, 3, 7),
        0x7C => (INC,   Extended, 3, 7),
        0x7D => (TST,   Extended, 3, 7),
        0x7E => (JMP,   Extended, 3, 4),
        0x7F => (CLR,   Extended, 3, 7),

        0x80 => (SUBA,  Immediate8, 2, 2),
        0x81 => (CMPA,  Immediate8, 2, 2),
        0x82 => (SBCA,  Immediate8, 2, 2),
        0x83 => (SUBD,  Immediate16, 3, 4),
        0x84 => (ANDA,  Immediate8, 2, 2),
        0x85 => (BITA,  Immediate8, 2, 2),
        0x86 => (LDA,   Immediate8, 2, 2),
        0x88 => (EORA,  Immediate8, 2, 2),
        0x89 => (ADCA,  Immediate8, 2, 2),
        0x8A => (ORA,   Immediate8, 2, 2),
        0x8B => (ADDA,  Immediate8, 2, 2),
        0x8C => (CMPX,  Immediate16, 3, 4),
        0x8D => (BSR,   Relative8, 2, 7),
        0x8E => (LDX,   Immediate16, 3, 3),

        0x90 => (SUBA,  Direct, 2, 4),
        0x91 => (CMPA,  Direct, 2, 4),
        0x92 => (SBCA,  Direct, 2, 4),
        0x93 => (SUBD,  Direct, 2, 6),
        0x94 => (ANDA,  Direct, 2, 4),
        0x95 => (BITA,  Direct, 2, 4),
        0x96 => (LDA,   Direct, 2, 4),
        0x97 => (STA,   Direct, 2, 4),
        0x98 => (EORA,  Direct, 2, 4),
        0x99 => (ADCA,  Direct, 2, 4),
        0x9A => (ORA,   Direct, 2, 4),
        0x9B => (ADDA,  Direct, 2, 4),
        0x9C => (CMPX,  Direct, 2, 6),
        0x9D => (JSR,   Direct, 2, 7),
        0x9E => (LDX,   Direct, 2, 5),
        0x9F => (STX,   Direct, 2, 5),

        0xA0 => (SUBA,  Indexed, 2, 4),
        0xA1 => (CMPA,  Indexed, 2, 4),
        0xA2 => (SBCA,  Indexed, 2, 4),
        0xA3 => (SUBD,  Indexed, 2, 6),
        0xA4 => (ANDA,  Indexed, 2, 4),
        0xA5 => (BITA,  Indexed, 2, 4),
        0xA6 => (LDA,   Indexed, 2, 4),
        0xA7 => (STA,   Indexed, 2, 4),
        0xA8 => (EORA,  Indexed, 2, 4),
        0xA9 => (ADCA,  Indexed, 2, 4),
        0xAA => (ORA,   Indexed, 2, 4),
        0xAB => (ADDA,  Indexed, 2, 4),
        0xAC => (CMPX,  Indexed, 2, 6),
        0xAD => (JSR,   Indexed, 2, 7),
        0xAE => (LDX,   Indexed, 2, 5),
        0xAF => (STX,   Indexed, 2, 5),

        0xB0 => (SUBA,  Extended, 3, 5),
        0xB1 => (CMPA,  Extended, 3, 5),
        0xB2 => (SBCA,  Extended, 3, 5),
        0xB3 => (SUBD,  Extended, 3, 7),
        0xB4 => (ANDA,  Extended, 3, 5),
        0xB5 => (BITA,  Extended, 3, 5),
        0xB6 => (LDA,   Extended, 3, 5),
        0xB7 => (STA,   Extended, 3, 5),
        0xB8 => (EORA,  Extended, 3, 5),
        0xB9 => (ADCA,  Extended, 3, 5),
        0xBA => (ORA,   Extended, 3, 5),
        0xBB => (ADDA,  Extended, 3, 5),
        0xBC => (CMPX,  Extended, 3, 7),
        0xBD => (JSR,   Extended, 3, 8),
        0xBE => (LDX,   Extended, 3, 6),
        0xBF => (STX,   Extended, 3, 6),

        0xC0 => (SUBB,  Immediate8, 2, 2),
        0xC1 => (CMPB,  Immediate8, 2, 2),
        0xC2 => (SBCB,  Immediate8, 2, 2),
        0xC3 => (ADDD,  Immediate16, 3, 4),
        0xC4 => (ANDB,  Immediate8, 2, 2),
        0xC5 => (BITB,  Immediate8, 2, 2),
        0xC6 => (LDB,   Immediate8, 2, 2),
        0xC8 => (EORB,  Immediate8, 2, 2),
        0xC9 => (ADCB,  Immediate8, 2, 2),
        0xCA => (ORB,   Immediate8, 2, 2),
        0xCB => (ADDB,  Immediate8, 2, 2),
        0xCC => (LDD,   Immediate16, 3, 3),
        0xCE => (LDU,   Immediate16, 3, 3),

        0xD0 => (SUBB,  Direct, 2, 4),
        0xD1 => (CMPB,  Direct, 2, 4),
        0xD2 => (SBCB,  Direct, 2, 4),
        0xD3 => (ADDD,  Direct, 2, 6),
        0xD4 => (ANDB,  Direct, 2, 4),
        0xD5 => (BITB,  Direct, 2, 4),
        0xD6 => (LDB,   Direct, 2, 4),
        0xD7 => (STB,   Direct, 2, 4),
        0xD8 => (EORB,  Direct, 2, 4),
        0xD9 => (ADCB,  Direct, 2, 4),
        0xDA => (ORB,   Direct, 2, 4),
        0xDB => (ADDB,  Direct, 2, 4),
        0xDC => (LDD,   Direct, 2, 5),
        0xDD => (STD,   Direct, 2, 5),
        0xDE => (LDU,   Direct, 2, 5),
        0xDF => (STU,   Direct, 2, 5),

        0xE0 => (SUBB,  Indexed, 2, 4),
        0xE1 => (CMPB,  Indexed, 2, 4),
        0xE2 => (SBCB,  Indexed, 2, 4),
        0xE3 => (ADDD,  Indexed, 2, 6),
        0xE4 => (ANDB,  Indexed, 2, 4),
        0xE5 => (BITB,  Indexed, 2, 4),
        0xE6 => (LDB,   Indexed, 2, 4),
        0xE7 => (STB,   Indexed, 2, 4),
        0xE8 => (EORB,  Indexed, 2, 4),
        0xE9 => (ADCB,  Indexed, 2, 4),
        0xEA => (ORB,   Indexed, 2, 4),
        0xEB => (ADDB,  Indexed, 2, 4),
        0xEC => (LDD,   Indexed, 2, 5),
        0xED => (STD,   Indexed, 2, 5),
        0xEE => (LDU,   Indexed, 2, 5),
        0xEF => (STU,   Indexed, 2, 5),

        0xF0 => (SUBB,  Extended, 3, 5),
        0xF1 => (CMPB,  Extended, 3, 5),
        0xF2 => (SBCB,  Extended, 3, 5),
        0xF3 => (ADDD,  Extended, 3, 7),
        0xF4 => (ANDB,  Extended, 3, 5),
        0xF5 => (BITB,  Extended, 3, 5),
        0xF6 => (LDB,   Extended, 3, 5),
        0xF7 => (STB,   Extended, 3, 5),
        0xF8 => (EORB,  Extended, 3, 5),
        0xF9 => (ADCB,  Extended, 3, 5),
        0xFA => (ORB,   Extended, 3, 5),
        0xFB => (ADDB,  Extended, 3, 5),
        0xFC => (LDD,   Extended, 3, 6),
        0xFD => (STD,   Extended, 3, 6),
        0xFE => (LDU,   Extended, 3, 6),
        0xFF => (STU,   Extended, 3, 6),

        // Page 2.
        0x1021 => (LBRN, Relative16, 4, 5),
        0x1022 => (LBHI, Relative16, 4, 5),
        0x1023 => (LBLS, Relative16, 4, 5),
        0x1024 => (LBHS, Relative16, 4, 5),
        0x1025 => (LBLO, Relative16, 4, 5),
        0x1026 => (LBNE, Relative16, 4, 5),
        0x1027 => (LBEQ, Relative16, 4, 5),
        0x1028 => (LBVC, Relative16, 4, 5),
        0x1029 => (LBVS, Relative16, 4, 5),
        0x102A => (LBPL, Relative16, 4, 5),
        0x102B => (LBMI, Relative16, 4, 5),
        0x102C => (LBGE, Relative16, 4, 5),
        0x102D => (LBLT, Relative16, 4, 5),
        0x102E => (LBGT, Relative16, 4, 5),
        0x102F => (LBLE, Relative16, 4, 5),
        0x103F => (SWI2, Inherent, 2, 20),

        0x1083 => (CMPD, Immediate16, 4, 5),
        0x108C => (CMPY, Immediate16, 4, 5),
        0x108E => (LDY,  Immediate16, 4, 4),
        0x1093 => (CMPD, Direct, 3, 7),
        0x109C => (CMPY, Direct, 3, 7),
        0x109E => (LDY,  Direct, 3, 6),
        0x109F => (STY,  Direct, 3, 6),
        0x10A3 => (CMPD, Indexed, 3, 7),
        0x10AC => (CMPY, Indexed, 3, 7),
        0x10AE => (LDY,  Indexed, 3, 6),
        0x10AF => (STY,  Indexed, 3, 6),
        0x10B3 => (CMPD, Extended, 4, 8),
        0x10BC => (CMPY, Extended, 4, 8),
        0x10BE => (LDY,  Extended, 4, 7),
        0x10BF => (STY,  Extended, 4, 7),

        0x10CE => (LDS,  Immediate16, 4, 4),
        0x10DE => (LDS,  Direct, 3, 6),
        0x10DF => (STS,  Direct, 3, 6),
        0x10EE => (LDS,  Indexed, 3, 6),
        0x10EF => (STS,  Indexed, 3, 6),
        0x10FE => (LDS,  Extended, 4, 7),
        0x10FF => (STS,  Extended, 4, 7),

        // Page 3.
        0x113F => (SWI3, Inherent, 2, 20),
        0x1183 => (CMPU, Immediate16, 4, 5),
        0x118C => (CMPS, Immediate16, 4, 5),
        0x1193 => (CMPU, Direct, 3, 7),
        0x119C => (CMPS, Direct, 3, 7),
        0x11A3 => (CMPU, Indexed, 3, 7),
        0x11AC => (CMPS, Indexed, 3, 7),
        0x11B3 => (CMPU, Extended, 4, 8),
        0x11BC => (CMPS, Extended, 4, 8),

        _ => return None,
    };

    Some(Op {
        opcode: opcode,
        inst: inst,
        mode: mode,
        bytes: bytes,
        cycles: cycles,
    })
}

/// True for the page prefix bytes.
pub fn is_prefix(byte: u8) -> bool {
    byte == 0x10 || byte == 0x11
}

/// Iterate over every defined opcode in ascending order.
pub fn all_ops() -> impl Iterator<Item = Op> {
    (0u16..0x100)
        .chain(0x1000..0x1100)
        .chain(0x1100..0x1200)
        .filter_map(lookup)
}
