//
// regs.rs --- 6809 register file.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

use std::fmt;

bitflags! {
    /// The 6809's 8-bit flags register.
    pub struct CCFlags: u8 {
        const E = 0b1000_0000;
        const F = 0b0100_0000;
        const H = 0b0010_0000;
        const I = 0b0001_0000;
        const N = 0b0000_1000;
        const Z = 0b0000_0100;
        const V = 0b0000_0010;
        const C = 0b0000_0001;
    }
}

pub const CC_E: CCFlags = CCFlags::E;
pub const CC_F: CCFlags = CCFlags::F;
pub const CC_H: CCFlags = CCFlags::H;
pub const CC_I: CCFlags = CCFlags::I;
pub const CC_N: CCFlags = CCFlags::N;
pub const CC_Z: CCFlags = CCFlags::Z;
pub const CC_V: CCFlags = CCFlags::V;
pub const CC_C: CCFlags = CCFlags::C;

impl fmt::Display for CCFlags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}{}{}{}{}{}",
               if self.contains(CC_E) { "E" } else { "" },
               if self.contains(CC_F) { "F" } else { "" },
               if self.contains(CC_H) { "H" } else { "" },
               if self.contains(CC_I) { "I" } else { "" },
               if self.contains(CC_N) { "N" } else { "" },
               if self.contains(CC_Z) { "Z" } else { "" },
               if self.contains(CC_V) { "V" } else { "" },
               if self.contains(CC_C) { "C" } else { "" })
    }
}

/// A register named in a TFR/EXG postbyte.
///
/// The discriminants are the 4-bit codes the 6809 uses: 16-bit
/// registers are 0-5, 8-bit registers are 8-11. Other codes are
/// undefined.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reg {
    D = 0b0000,
    X = 0b0001,
    Y = 0b0010,
    U = 0b0011,
    S = 0b0100,
    PC = 0b0101,
    A = 0b1000,
    B = 0b1001,
    CC = 0b1010,
    DP = 0b1011,
}

impl Reg {
    /// Decode a postbyte nibble.
    pub fn from_nibble(nibble: u8) -> Option<Reg> {
        match nibble & 0x0f {
            0b0000 => Some(Reg::D),
            0b0001 => Some(Reg::X),
            0b0010 => Some(Reg::Y),
            0b0011 => Some(Reg::U),
            0b0100 => Some(Reg::S),
            0b0101 => Some(Reg::PC),
            0b1000 => Some(Reg::A),
            0b1001 => Some(Reg::B),
            0b1010 => Some(Reg::CC),
            0b1011 => Some(Reg::DP),
            _ => None,
        }
    }

    pub fn nibble(self) -> u8 {
        self as u8
    }

    /// True for the 16-bit registers.
    pub fn is_wide(self) -> bool {
        (self as u8) & 0b1000 == 0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The set of 6809 CPU registers.
///
/// `D` is stored as a single 16-bit value and `A`/`B` are views of its
/// high and low bytes, so the three can never disagree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Regs {
    d: u16,
    pub x: u16,
    pub y: u16,
    pub u: u16,
    pub s: u16,
    pub pc: u16,
    pub dp: u8,
    pub cc: CCFlags,
}

impl Default for Regs {
    fn default() -> Regs {
        Regs::new()
    }
}

impl Regs {
    /// Create registers with every value zero.
    pub fn new() -> Regs {
        Regs {
            d: 0,
            x: 0,
            y: 0,
            u: 0,
            s: 0,
            pc: 0,
            dp: 0,
            cc: CCFlags::empty(),
        }
    }

    pub fn a(&self) -> u8 {
        (self.d >> 8) as u8
    }

    pub fn b(&self) -> u8 {
        self.d as u8
    }

    pub fn set_a(&mut self, val: u8) {
        self.d = (self.d & 0x00ff) | ((val as u16) << 8);
    }

    pub fn set_b(&mut self, val: u8) {
        self.d = (self.d & 0xff00) | val as u16;
    }

    /// Return the value of `A` and `B` combined as the `D` register.
    pub fn d(&self) -> u16 {
        self.d
    }

    /// Set `A` and `B` as the `D` register to a 16-bit value.
    pub fn set_d(&mut self, val: u16) {
        self.d = val;
    }

    /// Read a register by name. 8-bit registers are zero-extended.
    pub fn get(&self, reg: Reg) -> u16 {
        match reg {
            Reg::D => self.d,
            Reg::X => self.x,
            Reg::Y => self.y,
            Reg::U => self.u,
            Reg::S => self.s,
            Reg::PC => self.pc,
            Reg::A => self.a() as u16,
            Reg::B => self.b() as u16,
            Reg::CC => self.cc.bits() as u16,
            Reg::DP => self.dp as u16,
        }
    }

    /// Write a register by name. 8-bit registers take the low byte of
    /// `val`; callers check widths first.
    pub fn set(&mut self, reg: Reg, val: u16) {
        match reg {
            Reg::D => self.d = val,
            Reg::X => self.x = val,
            Reg::Y => self.y = val,
            Reg::U => self.u = val,
            Reg::S => self.s = val,
            Reg::PC => self.pc = val,
            Reg::A => self.set_a(val as u8),
            Reg::B => self.set_b(val as u8),
            Reg::CC => self.cc = CCFlags::from_bits_truncate(val as u8),
            Reg::DP => self.dp = val as u8,
        }
    }
}

impl fmt::Display for Regs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "A={:02X} B={:02X} X={:04X} Y={:04X} U={:04X} S={:04X} PC={:04X} DP={:02X} CC={:02X} ({})",
               self.a(), self.b(), self.x, self.y, self.u, self.s,
               self.pc, self.dp, self.cc.bits(), self.cc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reg_nibbles() {
        for n in 0..16u8 {
            match Reg::from_nibble(n) {
                Some(r) => assert_eq!(r.nibble(), n),
                None => assert!(n == 6 || n == 7 || n >= 12),
            }
        }
        assert!(Reg::PC.is_wide());
        assert!(!Reg::DP.is_wide());
    }

    #[test]
    fn cc_display() {
        let cc = CC_E | CC_Z | CC_C;
        assert_eq!(cc.to_string(), "EZC");
        assert_eq!(CCFlags::empty().to_string(), "");
    }

    #[test]
    fn dump_format() {
        let mut regs = Regs::new();
        regs.set_d(0x1234);
        regs.pc = 0xBEEF;
        regs.cc = CC_N;
        assert_eq!(regs.to_string(),
                   "A=12 B=34 X=0000 Y=0000 U=0000 S=0000 PC=BEEF DP=00 CC=08 (N)");
    }

    proptest! {
        #[test]
        fn halves_then_composite(a in any::<u8>(), b in any::<u8>()) {
            let mut regs = Regs::new();
            regs.set_a(a);
            regs.set_b(b);
            prop_assert_eq!(regs.d(), ((a as u16) << 8) | b as u16);

            let mut other = Regs::new();
            other.set_b(b);
            other.set_a(a);
            prop_assert_eq!(other, regs);
        }

        #[test]
        fn composite_then_halves(d in any::<u16>()) {
            let mut regs = Regs::new();
            regs.set_d(d);
            prop_assert_eq!(regs.a(), (d >> 8) as u8);
            prop_assert_eq!(regs.b(), d as u8);
            prop_assert_eq!(regs.get(Reg::D), d);

            regs.set_a(regs.a());
            regs.set_b(regs.b());
            prop_assert_eq!(regs.d(), d);
        }
    }
}
