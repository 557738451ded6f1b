//
// ops.rs --- 6809 instruction set.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

use super::{Operand, Stack, Wait, CPU, VEC_SWI, VEC_SWI2, VEC_SWI3};

use crate::emu::decode::Op;
use crate::emu::error::{Error, Result};
use crate::emu::mem::Mem;
use crate::emu::regs::{CCFlags, Reg, CC_C, CC_E, CC_F, CC_H, CC_I, CC_N, CC_V, CC_Z};

/////////////////////////////////////////////////////////////////////
// Dispatch

impl<M: Mem> CPU<M> {
    /// Execute `op` at `addr`. The program counter already points past
    /// the instruction and `operand` is resolved.
    pub(super) fn execute(&mut self, addr: u16, op: &Op, operand: Operand) -> Result<()> {
        use crate::emu::decode::Inst::*;

        match op.inst {
            NEG => self.rmw(operand, Self::neg)?,
            COM => self.rmw(operand, Self::com)?,
            LSR => self.rmw(operand, Self::lsr)?,
            ROR => self.rmw(operand, Self::ror)?,
            ASR => self.rmw(operand, Self::asr)?,
            LSL => self.rmw(operand, Self::lsl)?,
            ROL => self.rmw(operand, Self::rol)?,
            DEC => self.rmw(operand, Self::dec)?,
            INC => self.rmw(operand, Self::inc)?,
            TST => {
                let val = self.read8(operand)?;
                self.tst(val);
            }
            CLR => {
                let ea = self.ea(operand);
                let _ = self.load8(ea)?;
                self.store8(ea, 0x00)?;
                self.clr();
            }
            JMP => self.regs.pc = self.ea(operand),

            NEGA => self.on_a(Self::neg),
            COMA => self.on_a(Self::com),
            LSRA => self.on_a(Self::lsr),
            RORA => self.on_a(Self::ror),
            ASRA => self.on_a(Self::asr),
            LSLA => self.on_a(Self::lsl),
            ROLA => self.on_a(Self::rol),
            DECA => self.on_a(Self::dec),
            INCA => self.on_a(Self::inc),
            TSTA => {
                let val = self.regs.a();
                self.tst(val);
            }
            CLRA => {
                self.regs.set_a(0);
                self.clr();
            }

            NEGB => self.on_b(Self::neg),
            COMB => self.on_b(Self::com),
            LSRB => self.on_b(Self::lsr),
            RORB => self.on_b(Self::ror),
            ASRB => self.on_b(Self::asr),
            LSLB => self.on_b(Self::lsl),
            ROLB => self.on_b(Self::rol),
            DECB => self.on_b(Self::dec),
            INCB => self.on_b(Self::inc),
            TSTB => {
                let val = self.regs.b();
                self.tst(val);
            }
            CLRB => {
                self.regs.set_b(0);
                self.clr();
            }

            NOP => {}
            SYNC => self.set_wait(Wait::Sync),
            DAA => self.daa(),
            ORCC => {
                let val = self.read8(operand)?;
                self.regs.cc |= CCFlags::from_bits_truncate(val);
            }
            ANDCC => {
                let val = self.read8(operand)?;
                self.regs.cc &= CCFlags::from_bits_truncate(val);
            }
            SEX => self.sex(),
            EXG => {
                let (r1, r2) = self.transfer_regs(addr, operand)?;
                let v1 = self.regs.get(r1);
                let v2 = self.regs.get(r2);
                self.regs.set(r1, v2);
                self.regs.set(r2, v1);
            }
            TFR => {
                let (src, dst) = self.transfer_regs(addr, operand)?;
                let val = self.regs.get(src);
                self.regs.set(dst, val);
            }

            LEAX => {
                let ea = self.ea(operand);
                self.regs.x = ea;
                self.regs.cc.set(CC_Z, ea == 0);
            }
            LEAY => {
                let ea = self.ea(operand);
                self.regs.y = ea;
                self.regs.cc.set(CC_Z, ea == 0);
            }
            LEAS => self.regs.s = self.ea(operand),
            LEAU => self.regs.u = self.ea(operand),

            PSHS => self.push_regs(Stack::S, operand)?,
            PULS => self.pull_regs(Stack::S, operand)?,
            PSHU => self.push_regs(Stack::U, operand)?,
            PULU => self.pull_regs(Stack::U, operand)?,

            RTS => self.regs.pc = self.pull16(Stack::S)?,
            ABX => self.regs.x = self.regs.x.wrapping_add(self.regs.b() as u16),
            RTI => self.rti()?,
            CWAI => self.cwai(operand)?,
            MUL => self.mul(),
            SWI => self.swi(VEC_SWI, true)?,
            SWI2 => self.swi(VEC_SWI2, false)?,
            SWI3 => self.swi(VEC_SWI3, false)?,

            BRA | BRN | BHI | BLS | BHS | BLO | BNE | BEQ |
            BVC | BVS | BPL | BMI | BGE | BLT | BGT | BLE => {
                if self.condition(op.opcode as u8) {
                    self.regs.pc = self.ea(operand);
                }
            }
            LBRA => self.regs.pc = self.ea(operand),
            LBRN | LBHI | LBLS | LBHS | LBLO | LBNE | LBEQ |
            LBVC | LBVS | LBPL | LBMI | LBGE | LBLT | LBGT | LBLE => {
                if self.condition(op.opcode as u8) {
                    self.add_cycles(1);
                    self.regs.pc = self.ea(operand);
                }
            }
            BSR | LBSR | JSR => {
                let ret = self.regs.pc;
                self.push16(Stack::S, ret)?;
                self.regs.pc = self.ea(operand);
            }

            SUBA => self.alu_a(operand, Self::sub)?,
            CMPA => self.cmp8(self.regs.a(), operand)?,
            SBCA => self.alu_a(operand, Self::sbc)?,
            ANDA => self.alu_a(operand, Self::and)?,
            BITA => {
                let (a, m) = (self.regs.a(), self.read8(operand)?);
                self.and(a, m);
            }
            LDA => {
                let val = self.ld8(operand)?;
                self.regs.set_a(val);
            }
            STA => self.st8(operand, self.regs.a())?,
            EORA => self.alu_a(operand, Self::eor)?,
            ADCA => self.alu_a(operand, Self::adc)?,
            ORA => self.alu_a(operand, Self::or)?,
            ADDA => self.alu_a(operand, Self::add)?,

            SUBB => self.alu_b(operand, Self::sub)?,
            CMPB => self.cmp8(self.regs.b(), operand)?,
            SBCB => self.alu_b(operand, Self::sbc)?,
            ANDB => self.alu_b(operand, Self::and)?,
            BITB => {
                let (b, m) = (self.regs.b(), self.read8(operand)?);
                self.and(b, m);
            }
            LDB => {
                let val = self.ld8(operand)?;
                self.regs.set_b(val);
            }
            STB => self.st8(operand, self.regs.b())?,
            EORB => self.alu_b(operand, Self::eor)?,
            ADCB => self.alu_b(operand, Self::adc)?,
            ORB => self.alu_b(operand, Self::or)?,
            ADDB => self.alu_b(operand, Self::add)?,

            SUBD => {
                let (d, m) = (self.regs.d(), self.read16(operand)?);
                let res = self.sub16(d, m);
                self.regs.set_d(res);
            }
            ADDD => {
                let (d, m) = (self.regs.d(), self.read16(operand)?);
                let res = self.add16(d, m);
                self.regs.set_d(res);
            }
            CMPD => self.cmp16(self.regs.d(), operand)?,
            CMPX => self.cmp16(self.regs.x, operand)?,
            CMPY => self.cmp16(self.regs.y, operand)?,
            CMPU => self.cmp16(self.regs.u, operand)?,
            CMPS => self.cmp16(self.regs.s, operand)?,

            LDD => {
                let val = self.ld16(operand)?;
                self.regs.set_d(val);
            }
            LDX => self.regs.x = self.ld16(operand)?,
            LDY => self.regs.y = self.ld16(operand)?,
            LDU => self.regs.u = self.ld16(operand)?,
            LDS => self.regs.s = self.ld16(operand)?,
            STD => self.st16(operand, self.regs.d())?,
            STX => self.st16(operand, self.regs.x)?,
            STY => self.st16(operand, self.regs.y)?,
            STU => self.st16(operand, self.regs.u)?,
            STS => self.st16(operand, self.regs.s)?,
        }

        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////
// Operands

impl<M: Mem> CPU<M> {
    /// The effective address of a memory operand or branch target.
    fn ea(&self, operand: Operand) -> u16 {
        match operand {
            Operand::Address(ea) => ea,
            other => unreachable!("no effective address in {:?}", other),
        }
    }

    /// Read the 8-bit value named by `operand`.
    fn read8(&mut self, operand: Operand) -> Result<u8> {
        match operand {
            Operand::Immediate(val) => Ok(val as u8),
            Operand::Address(ea) => self.load8(ea),
            Operand::None => unreachable!("inherent instruction has no operand"),
        }
    }

    /// Read the 16-bit value named by `operand`.
    fn read16(&mut self, operand: Operand) -> Result<u16> {
        match operand {
            Operand::Immediate(val) => Ok(val),
            Operand::Address(ea) => self.load16(ea),
            Operand::None => unreachable!("inherent instruction has no operand"),
        }
    }

    /// Apply `f` to the byte at the operand's address and store the
    /// result back.
    fn rmw(&mut self, operand: Operand, f: fn(&mut Self, u8) -> u8) -> Result<()> {
        let ea = self.ea(operand);
        let val = self.load8(ea)?;
        let res = f(self, val);
        self.store8(ea, res)
    }

    fn on_a(&mut self, f: fn(&mut Self, u8) -> u8) {
        let val = self.regs.a();
        let res = f(self, val);
        self.regs.set_a(res);
    }

    fn on_b(&mut self, f: fn(&mut Self, u8) -> u8) {
        let val = self.regs.b();
        let res = f(self, val);
        self.regs.set_b(res);
    }

    /// `A <- f(A, M)`
    fn alu_a(&mut self, operand: Operand, f: fn(&mut Self, u8, u8) -> u8) -> Result<()> {
        let (a, m) = (self.regs.a(), self.read8(operand)?);
        let res = f(self, a, m);
        self.regs.set_a(res);
        Ok(())
    }

    /// `B <- f(B, M)`
    fn alu_b(&mut self, operand: Operand, f: fn(&mut Self, u8, u8) -> u8) -> Result<()> {
        let (b, m) = (self.regs.b(), self.read8(operand)?);
        let res = f(self, b, m);
        self.regs.set_b(res);
        Ok(())
    }

    /// Decode a TFR/EXG postbyte into its (first, second) registers.
    /// Both must be defined and of the same width.
    fn transfer_regs(&self, addr: u16, operand: Operand) -> Result<(Reg, Reg)> {
        let postbyte = match operand {
            Operand::Immediate(val) => val as u8,
            other => unreachable!("register transfer with {:?}", other),
        };

        match (Reg::from_nibble(postbyte >> 4), Reg::from_nibble(postbyte)) {
            (Some(r1), Some(r2)) if r1.is_wide() == r2.is_wide() => Ok((r1, r2)),
            _ => Err(Error::InvalidRegisterTransfer { pc: addr, postbyte: postbyte }),
        }
    }
}

/////////////////////////////////////////////////////////////////////
// Flags and ALU

impl<M: Mem> CPU<M> {
    /// Set the negative and zero flags given an 8-bit result.
    fn set_nz8(&mut self, val: u8) {
        self.regs.cc.set(CC_N, val & 0x80 != 0);
        self.regs.cc.set(CC_Z, val == 0);
    }

    /// Set the negative and zero flags given a 16-bit result.
    fn set_nz16(&mut self, val: u16) {
        self.regs.cc.set(CC_N, val & 0x8000 != 0);
        self.regs.cc.set(CC_Z, val == 0);
    }

    /// 8-bit addition with carry in. Sets H, N, Z, V and C.
    fn add8(&mut self, a: u8, b: u8, carry: bool) -> u8 {
        let r = a as u16 + b as u16 + carry as u16;
        let res = r as u8;

        self.regs.cc.set(CC_H, (a ^ b ^ res) & 0x10 != 0);
        self.regs.cc.set(CC_V, (a ^ res) & (b ^ res) & 0x80 != 0);
        self.regs.cc.set(CC_C, r & 0x100 != 0);
        self.set_nz8(res);
        res
    }

    /// 8-bit subtraction with borrow in. C is set on borrow; H is not
    /// affected.
    fn sub8(&mut self, a: u8, b: u8, borrow: bool) -> u8 {
        let r = (a as u16).wrapping_sub(b as u16).wrapping_sub(borrow as u16);
        let res = r as u8;

        self.regs.cc.set(CC_V, (a ^ b) & (a ^ res) & 0x80 != 0);
        self.regs.cc.set(CC_C, r & 0x100 != 0);
        self.set_nz8(res);
        res
    }

    fn add16(&mut self, a: u16, b: u16) -> u16 {
        let r = a as u32 + b as u32;
        let res = r as u16;

        self.regs.cc.set(CC_V, (a ^ res) & (b ^ res) & 0x8000 != 0);
        self.regs.cc.set(CC_C, r & 0x10000 != 0);
        self.set_nz16(res);
        res
    }

    fn sub16(&mut self, a: u16, b: u16) -> u16 {
        let r = (a as u32).wrapping_sub(b as u32);
        let res = r as u16;

        self.regs.cc.set(CC_V, (a ^ b) & (a ^ res) & 0x8000 != 0);
        self.regs.cc.set(CC_C, r & 0x10000 != 0);
        self.set_nz16(res);
        res
    }

    fn add(&mut self, a: u8, b: u8) -> u8 {
        self.add8(a, b, false)
    }

    fn adc(&mut self, a: u8, b: u8) -> u8 {
        let carry = self.regs.cc.contains(CC_C);
        self.add8(a, b, carry)
    }

    fn sub(&mut self, a: u8, b: u8) -> u8 {
        self.sub8(a, b, false)
    }

    fn sbc(&mut self, a: u8, b: u8) -> u8 {
        let borrow = self.regs.cc.contains(CC_C);
        self.sub8(a, b, borrow)
    }

    /// Compare a register with the operand: subtract, keep only the
    /// flags.
    fn cmp8(&mut self, reg: u8, operand: Operand) -> Result<()> {
        let m = self.read8(operand)?;
        self.sub8(reg, m, false);
        Ok(())
    }

    fn cmp16(&mut self, reg: u16, operand: Operand) -> Result<()> {
        let m = self.read16(operand)?;
        self.sub16(reg, m);
        Ok(())
    }

    /// Logical operations set N and Z and clear V. C is not affected.
    fn logic(&mut self, res: u8) -> u8 {
        self.set_nz8(res);
        self.regs.cc.remove(CC_V);
        res
    }

    fn and(&mut self, a: u8, b: u8) -> u8 {
        self.logic(a & b)
    }

    fn or(&mut self, a: u8, b: u8) -> u8 {
        self.logic(a | b)
    }

    fn eor(&mut self, a: u8, b: u8) -> u8 {
        self.logic(a ^ b)
    }

    fn ld8(&mut self, operand: Operand) -> Result<u8> {
        let val = self.read8(operand)?;
        Ok(self.logic(val))
    }

    fn ld16(&mut self, operand: Operand) -> Result<u16> {
        let val = self.read16(operand)?;
        self.set_nz16(val);
        self.regs.cc.remove(CC_V);
        Ok(val)
    }

    fn st8(&mut self, operand: Operand, val: u8) -> Result<()> {
        let ea = self.ea(operand);
        self.store8(ea, val)?;
        self.logic(val);
        Ok(())
    }

    fn st16(&mut self, operand: Operand, val: u16) -> Result<()> {
        let ea = self.ea(operand);
        self.store16(ea, val)?;
        self.set_nz16(val);
        self.regs.cc.remove(CC_V);
        Ok(())
    }

    /// Evaluate the condition encoded in the low nibble of a branch
    /// opcode. Short and long branches share the encoding.
    fn condition(&self, opcode: u8) -> bool {
        let cc = self.regs.cc;
        let n = cc.contains(CC_N);
        let z = cc.contains(CC_Z);
        let v = cc.contains(CC_V);
        let c = cc.contains(CC_C);

        match opcode & 0x0f {
            0x0 => true,            // BRA
            0x1 => false,           // BRN
            0x2 => !(c || z),       // BHI
            0x3 => c || z,          // BLS
            0x4 => !c,              // BHS
            0x5 => c,               // BLO
            0x6 => !z,              // BNE
            0x7 => z,               // BEQ
            0x8 => !v,              // BVC
            0x9 => v,               // BVS
            0xA => !n,              // BPL
            0xB => n,               // BMI
            0xC => n == v,          // BGE
            0xD => n != v,          // BLT
            0xE => !z && n == v,    // BGT
            _ => z || n != v,       // BLE
        }
    }
}

/////////////////////////////////////////////////////////////////////
// Read-modify-write

impl<M: Mem> CPU<M> {
    /// Replaces the operand with its twos complement. 0x80 is replaced
    /// by itself and only in this case is V set. C is set unless the
    /// operand was zero.
    fn neg(&mut self, val: u8) -> u8 {
        self.sub8(0, val, false)
    }

    /// Logical complement.
    ///
    /// Condition Codes:
    ///
    ///   H - Not affected.
    ///   N - Set if the result is negative; cleared otherwise.
    ///   Z - Set if the result is zero; cleared otherwise.
    ///   V - Always cleared.
    ///   C - Always set.
    fn com(&mut self, val: u8) -> u8 {
        let res = self.logic(!val);
        self.regs.cc.insert(CC_C);
        res
    }

    /// Shift left. Bit zero is loaded with a zero and bit seven goes
    /// to C. V is bit seven XOR bit six of the original operand.
    fn lsl(&mut self, val: u8) -> u8 {
        let res = val << 1;
        self.set_nz8(res);
        self.regs.cc.set(CC_C, val & 0x80 != 0);
        self.regs.cc.set(CC_V, (val ^ res) & 0x80 != 0);
        res
    }

    /// Logical shift right. A zero goes into bit seven and bit zero
    /// into C, so N is always cleared. V is not affected.
    fn lsr(&mut self, val: u8) -> u8 {
        let res = val >> 1;
        self.set_nz8(res);
        self.regs.cc.set(CC_C, val & 0x01 != 0);
        res
    }

    /// Arithmetic shift right. Bit seven is held constant.
    fn asr(&mut self, val: u8) -> u8 {
        let res = ((val as i8) >> 1) as u8;
        self.set_nz8(res);
        self.regs.cc.set(CC_C, val & 0x01 != 0);
        res
    }

    /// Rotate right through C. This is a 9-bit rotation.
    fn ror(&mut self, val: u8) -> u8 {
        let hi = if self.regs.cc.contains(CC_C) { 0x80 } else { 0x00 };
        let res = (val >> 1) | hi;

        self.set_nz8(res);
        self.regs.cc.set(CC_C, val & 0x01 != 0);
        res
    }

    /// Rotate left through C. V is set as for `lsl`.
    fn rol(&mut self, val: u8) -> u8 {
        let lo = if self.regs.cc.contains(CC_C) { 0x01 } else { 0x00 };
        let res = (val << 1) | lo;

        self.set_nz8(res);
        self.regs.cc.set(CC_C, val & 0x80 != 0);
        self.regs.cc.set(CC_V, (val ^ (val << 1)) & 0x80 != 0);
        res
    }

    /// Subtract one from the operand. The carry bit is not affected, so
    /// DEC works as a loop counter in multiple precision computations.
    ///
    /// Condition Codes:
    ///
    ///   H - Not affected.
    ///   N - Set if the result is negative; cleared otherwise.
    ///   Z - Set if the result is zero; cleared otherwise.
    ///   V - Set if the original operand was 0b10000000; cleared otherwise.
    ///   C - Not affected.
    fn dec(&mut self, val: u8) -> u8 {
        let res = val.wrapping_sub(1);

        self.set_nz8(res);
        self.regs.cc.set(CC_V, val == 0b1000_0000);
        res
    }

    /// Add one to the operand. V is set if the original operand was
    /// 0b01111111; C is not affected.
    fn inc(&mut self, val: u8) -> u8 {
        let res = val.wrapping_add(1);

        self.set_nz8(res);
        self.regs.cc.set(CC_V, val == 0b0111_1111);
        res
    }

    /// Set N and Z according to the operand and clear V.
    fn tst(&mut self, val: u8) {
        self.logic(val);
    }

    /// Flags after clearing a byte: Z set, N, V and C cleared.
    fn clr(&mut self) {
        self.regs.cc.remove(CC_N | CC_V | CC_C);
        self.regs.cc.insert(CC_Z);
    }
}

/////////////////////////////////////////////////////////////////////
// Inherent

impl<M: Mem> CPU<M> {
    /// Decimal adjust A after a BCD addition.
    ///
    /// The correction factor for each nibble is 6 or 0:
    ///
    ///   CF(LSN) = 6 IFF  H = 1  or  LSN > 9
    ///   CF(MSN) = 6 IFF  C = 1  or  MSN > 9  or  (MSN > 8 and LSN > 9)
    ///
    /// Condition Codes:
    ///
    ///   H - Not affected.
    ///   N - Set if the result is negative; cleared otherwise.
    ///   Z - Set if the result is zero; cleared otherwise.
    ///   V - Cleared.
    ///   C - Set if a carry is generated or if the carry bit was set before the
    ///       operation; cleared otherwise.
    fn daa(&mut self) {
        let a = self.regs.a();
        let lsn = a & 0x0f;
        let msn = a >> 4;
        let cc_c = self.regs.cc.contains(CC_C);
        let cc_h = self.regs.cc.contains(CC_H);

        let cf_lsn = if cc_h || lsn > 9 { 0x06 } else { 0x00 };
        let cf_msn = if cc_c || msn > 9 || (msn > 8 && lsn > 9) { 0x60 } else { 0x00 };
        let r = a as u16 + (cf_lsn | cf_msn) as u16;

        self.regs.set_a(r as u8);
        self.set_nz8(r as u8);
        self.regs.cc.remove(CC_V);
        self.regs.cc.set(CC_C, cc_c || r & 0x100 != 0);
    }

    /// Sign extend B into D.
    fn sex(&mut self) {
        let a = if self.regs.b() & 0x80 != 0 { 0xff } else { 0x00 };
        self.regs.set_a(a);
        let d = self.regs.d();
        self.set_nz16(d);
        self.regs.cc.remove(CC_V);
    }

    /// Unsigned `D <- A * B`. Z is set from D and C from bit seven of B,
    /// so rounding the high byte is `ADCA #0`.
    fn mul(&mut self) {
        let r = self.regs.a() as u16 * self.regs.b() as u16;
        self.regs.set_d(r);
        self.regs.cc.set(CC_Z, r == 0);
        self.regs.cc.set(CC_C, r & 0x80 != 0);
    }
}

/////////////////////////////////////////////////////////////////////
// Stack and interrupts

impl<M: Mem> CPU<M> {
    fn postbyte(operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(val) => val as u8,
            other => unreachable!("stack operation with {:?}", other),
        }
    }

    /// Push the registers selected by the postbyte, PC first and CC
    /// last. Bit 6 names the other stack pointer. Each byte costs one
    /// cycle.
    fn push_regs(&mut self, stack: Stack, operand: Operand) -> Result<()> {
        let postbyte = Self::postbyte(operand);
        let regs = self.regs;
        let other = match stack {
            Stack::S => regs.u,
            Stack::U => regs.s,
        };

        if postbyte & 0x80 != 0 { self.push16(stack, regs.pc)?; self.add_cycles(2); }
        if postbyte & 0x40 != 0 { self.push16(stack, other)?; self.add_cycles(2); }
        if postbyte & 0x20 != 0 { self.push16(stack, regs.y)?; self.add_cycles(2); }
        if postbyte & 0x10 != 0 { self.push16(stack, regs.x)?; self.add_cycles(2); }
        if postbyte & 0x08 != 0 { self.push8(stack, regs.dp)?; self.add_cycles(1); }
        if postbyte & 0x04 != 0 { self.push8(stack, regs.b())?; self.add_cycles(1); }
        if postbyte & 0x02 != 0 { self.push8(stack, regs.a())?; self.add_cycles(1); }
        if postbyte & 0x01 != 0 { self.push8(stack, regs.cc.bits())?; self.add_cycles(1); }

        Ok(())
    }

    /// Pull the registers selected by the postbyte, in the reverse of
    /// the push order.
    fn pull_regs(&mut self, stack: Stack, operand: Operand) -> Result<()> {
        let postbyte = Self::postbyte(operand);

        if postbyte & 0x01 != 0 {
            self.regs.cc = CCFlags::from_bits_truncate(self.pull8(stack)?);
            self.add_cycles(1);
        }
        if postbyte & 0x02 != 0 {
            let a = self.pull8(stack)?;
            self.regs.set_a(a);
            self.add_cycles(1);
        }
        if postbyte & 0x04 != 0 {
            let b = self.pull8(stack)?;
            self.regs.set_b(b);
            self.add_cycles(1);
        }
        if postbyte & 0x08 != 0 { self.regs.dp = self.pull8(stack)?; self.add_cycles(1); }
        if postbyte & 0x10 != 0 { self.regs.x = self.pull16(stack)?; self.add_cycles(2); }
        if postbyte & 0x20 != 0 { self.regs.y = self.pull16(stack)?; self.add_cycles(2); }
        if postbyte & 0x40 != 0 {
            let other = self.pull16(stack)?;
            match stack {
                Stack::S => self.regs.u = other,
                Stack::U => self.regs.s = other,
            }
            self.add_cycles(2);
        }
        if postbyte & 0x80 != 0 { self.regs.pc = self.pull16(stack)?; self.add_cycles(2); }

        Ok(())
    }

    /// The saved machine state is recovered from the hardware stack and
    /// control is returned to the interrupted program. If the recovered E
    /// (entire) bit is clear, only PC and CC were saved and only they
    /// are recovered.
    fn rti(&mut self) -> Result<()> {
        self.regs.cc = CCFlags::from_bits_truncate(self.pull8(Stack::S)?);

        if self.regs.cc.contains(CC_E) {
            let a = self.pull8(Stack::S)?;
            let b = self.pull8(Stack::S)?;
            self.regs.set_a(a);
            self.regs.set_b(b);
            self.regs.dp = self.pull8(Stack::S)?;
            self.regs.x = self.pull16(Stack::S)?;
            self.regs.y = self.pull16(Stack::S)?;
            self.regs.u = self.pull16(Stack::S)?;
            self.add_cycles(9);
        }

        self.regs.pc = self.pull16(Stack::S)?;
        Ok(())
    }

    /// Initiate a software interrupt with handler at `vector`. If
    /// `mask_int` is true, the `I` and `F` flags will be set when
    /// calling the interrupt handler. All registers are stacked and
    /// the `E` flag will be set.
    fn swi(&mut self, vector: u16, mask_int: bool) -> Result<()> {
        self.regs.cc.insert(CC_E);
        self.push_entire()?;

        if mask_int {
            self.regs.cc.insert(CC_I | CC_F);
        }

        self.regs.pc = self.load16(vector)?;
        Ok(())
    }

    /// AND CC with the immediate byte, stack the entire state and wait
    /// for an interrupt.
    fn cwai(&mut self, operand: Operand) -> Result<()> {
        let mask = self.read8(operand)?;
        self.regs.cc &= CCFlags::from_bits_truncate(mask);
        self.regs.cc.insert(CC_E);
        self.push_entire()?;
        self.set_wait(Wait::Cwai);
        Ok(())
    }
}
