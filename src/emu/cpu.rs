//
// cpu.rs --- 6809 CPU core.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

//! A simple 6809 CPU core.
//!
//! ## Implementation Notes
//!
//! Each step fetches the opcode (and page prefix), looks up its
//! descriptor in `decode`, and resolves the operand with methods such
//! as `CPU::indexed` that fetch additional bytes and calculate the
//! effective address of the memory operand. The program counter is
//! moved past the whole instruction before the instruction itself runs,
//! so branch targets and PC-relative operands are relative to the next
//! instruction.
//!
//! The instruction semantics live in `ops.rs`.

use std::fmt;

use crate::emu::config::Config;
use crate::emu::decode::{self, Mode, Op};
use crate::emu::error::{Error, Result};
use crate::emu::indexed::{IndexMode, IndexReg, Postbyte};
use crate::emu::mem::Mem;
use crate::emu::regs::{CCFlags, Regs, CC_E, CC_F, CC_I};
use crate::emu::stop::{Stop, StopCondition};

pub const VEC_SWI3: u16 = 0xFFF2;
pub const VEC_SWI2: u16 = 0xFFF4;
pub const VEC_FIRQ: u16 = 0xFFF6;
pub const VEC_IRQ: u16 = 0xFFF8;
pub const VEC_SWI: u16 = 0xFFFA;
pub const VEC_NMI: u16 = 0xFFFC;
pub const VEC_RESET: u16 = 0xFFFE;

/// Longest possible instruction: prefix, opcode, postbyte and a
/// 16-bit offset.
const MAX_INST_BYTES: usize = 5;

/// Why the CPU stopped fetching instructions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wait {
    /// Executed SYNC. Any interrupt line resumes execution.
    Sync,
    /// Executed CWAI. The entire state is already stacked.
    Cwai,
}

/// The resolved operand of an instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    /// An immediate value or postbyte.
    Immediate(u16),
    /// An effective address: memory operand or branch target.
    Address(u16),
}

/// A record of one executed instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Address of the first byte of the instruction.
    pub addr: u16,
    pub opcode: u16,
    /// The opcode descriptor, or `None` for a step spent waiting.
    pub op: Option<Op>,
    pub operand: Operand,
    /// Cycles consumed, including indexed, stacking and taken long
    /// branch penalties.
    pub cycles: u32,
    bytes: [u8; MAX_INST_BYTES],
    len: usize,
}

impl Instruction {
    /// A step in which the CPU waited for an interrupt.
    fn idle(addr: u16) -> Instruction {
        Instruction {
            addr: addr,
            opcode: 0,
            op: None,
            operand: Operand::None,
            cycles: 1,
            bytes: [0; MAX_INST_BYTES],
            len: 0,
        }
    }

    /// The bytes consumed by the instruction, opcode first.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn is_idle(&self) -> bool {
        self.op.is_none()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04X}  ", self.addr)?;
        for i in 0..MAX_INST_BYTES {
            match self.bytes().get(i) {
                Some(b) => write!(f, "{:02X} ", b)?,
                None => f.write_str("   ")?,
            }
        }

        match self.op {
            Some(op) => match self.operand {
                Operand::None => write!(f, " {}", op.inst),
                Operand::Immediate(val) => write!(f, " {:<5} #${:X}", op.inst, val),
                Operand::Address(ea) => write!(f, " {:<5} ${:04X}", op.inst, ea),
            },
            None => f.write_str(" (wait)"),
        }
    }
}

/// A copy of the CPU state, excluding memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub regs: Regs,
    pub cycles: u64,
    pub steps: u64,
    pub wait: Option<Wait>,
}

/// Which stack pointer a push or pull goes through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Stack {
    S,
    U,
}

/////////////////////////////////////////////////////////////////////
// CPU Emulation

/// The 6809 CPU core.
pub struct CPU<M: Mem> {
    pub regs: Regs,
    pub mem: M,
    config: Config,
    cycles: u64,
    steps: u64,
    wait: Option<Wait>,
    fetched: Vec<u8>,           // bytes fetched during op cycle
    cursor: u32,                // next byte to fetch
    extra_cycles: u32,          // penalties accrued by the current op
}

impl<M: Mem> CPU<M> {
    /// Create a new CPU given a memory interface. All registers start
    /// at zero.
    ///
    /// The memory interface will often be a custom board-specific
    /// object that implements address decoding on top of RAM, devices,
    /// etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use mc6809::emu::{RAM, CPU};
    ///
    /// let cpu = CPU::new(RAM::new(0x10000));
    /// assert_eq!(cpu.regs.pc, 0);
    /// ```
    pub fn new(mem: M) -> CPU<M> {
        CPU::with_config(mem, &Config::default())
    }

    /// Create a new CPU that logs according to `cfg`. The bus is not
    /// touched; build it with `RAM::from_config` for bus tracing.
    pub fn with_config(mem: M, cfg: &Config) -> CPU<M> {
        CPU {
            regs: Regs::new(),
            mem: mem,
            config: *cfg,
            cycles: 0,
            steps: 0,
            wait: None,
            fetched: Vec::with_capacity(MAX_INST_BYTES),
            cursor: 0,
            extra_cycles: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn regs(&self) -> &Regs {
        &self.regs
    }

    pub fn regs_mut(&mut self) -> &mut Regs {
        &mut self.regs
    }

    /// Put the CPU in its reset state: registers zero, interrupts
    /// masked, no pending wait and counters cleared. The program
    /// counter is left at zero for the caller to set.
    pub fn reset(&mut self) {
        self.regs = Regs::new();
        self.regs.cc = CC_I | CC_F;
        self.wait = None;
        self.cycles = 0;
        self.steps = 0;
    }

    /// Reset, then load the program counter from the reset vector.
    pub fn reset_from_vector(&mut self) -> Result<()> {
        self.reset();
        self.regs.pc = self.load16(VEC_RESET)?;
        debug!("reset: PC={:04X}", self.regs.pc);
        Ok(())
    }

    /// Total cycles consumed since construction or the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Total steps executed since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The wait state entered by SYNC or CWAI, if any.
    pub fn waiting(&self) -> Option<Wait> {
        self.wait
    }

    pub fn snapshot(&self) -> State {
        State {
            regs: self.regs,
            cycles: self.cycles,
            steps: self.steps,
            wait: self.wait,
        }
    }

    pub fn restore(&mut self, state: State) {
        self.regs = state.regs;
        self.cycles = state.cycles;
        self.steps = state.steps;
        self.wait = state.wait;
    }

    /// Log the registers at debug level.
    pub fn dump_regs(&self) {
        debug!("{:04X} REGS  {}", self.regs.pc, self.regs);
    }

    /// Execute the next instruction at the program counter.
    ///
    /// On error the registers, wait state and counters are left as
    /// they were before the call. Memory written before the failure is
    /// not rolled back.
    pub fn step(&mut self) -> Result<Instruction> {
        let saved = self.snapshot();

        match self.execute_next() {
            Ok(inst) => {
                if self.config.log_instructions() {
                    trace!("{}", inst);
                }
                Ok(inst)
            }
            Err(e) => {
                self.restore(saved);
                let e = e.at(saved.regs.pc);
                debug!("step failed: {}", e);
                Err(e)
            }
        }
    }

    /// Execute the next `n` instructions starting at the
    /// current value of the program counter.
    pub fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Set the program counter to `start` and step until `stop` holds.
    /// The condition is checked before every step, so a run whose
    /// condition already holds executes nothing.
    pub fn run<S: Stop>(&mut self, start: u16, mut stop: S) -> Result<()> {
        self.regs.pc = start;

        let mut steps = 0;
        while !stop.should_stop(&self.regs, steps) {
            self.step()?;
            steps += 1;
        }

        debug!("run from {:04X} stopped after {} steps", start, steps);
        Ok(())
    }

    /// Run the CPU from the current program counter until it
    /// equals `end`.
    pub fn run_until(&mut self, end: u16) -> Result<()> {
        let pc = self.regs.pc;
        self.run(pc, StopCondition::Address(end))
    }

    fn execute_next(&mut self) -> Result<Instruction> {
        if self.wait.is_some() {
            self.cycles += 1;
            self.steps += 1;
            return Ok(Instruction::idle(self.regs.pc));
        }

        let addr = self.regs.pc;
        self.fetched.clear();
        self.cursor = addr as u32;
        self.extra_cycles = 0;

        let mut opcode = self.fetchb()? as u16;
        if decode::is_prefix(opcode as u8) {
            opcode = (opcode << 8) | self.fetchb()? as u16;
        }

        let op = decode::lookup(opcode).ok_or(Error::IllegalOpcode {
            pc: addr,
            opcode: opcode,
        })?;

        let operand = self.operand(addr, &op)?;
        self.regs.pc = self.cursor as u16;
        self.execute(addr, &op, operand)?;

        let cycles = op.cycles as u32 + self.extra_cycles;
        self.cycles += cycles as u64;
        self.steps += 1;

        let mut bytes = [0u8; MAX_INST_BYTES];
        bytes[..self.fetched.len()].copy_from_slice(&self.fetched);

        Ok(Instruction {
            addr: addr,
            opcode: opcode,
            op: Some(op),
            operand: operand,
            cycles: cycles,
            bytes: bytes,
            len: self.fetched.len(),
        })
    }

    /// Read the next instruction byte.
    fn fetchb(&mut self) -> Result<u8> {
        let val = self.mem.read_byte(self.cursor)?;
        self.cursor += 1;
        self.fetched.push(val);
        Ok(val)
    }

    /// Read the next two instruction bytes as a big-endian word.
    fn fetchw(&mut self) -> Result<u16> {
        let hi = self.fetchb()? as u16;
        let lo = self.fetchb()? as u16;

        Ok((hi << 8) | lo)
    }

    /// Read a byte from the 16-bit address `addr`.
    pub(crate) fn load8(&mut self, addr: u16) -> Result<u8> {
        self.mem.read_byte(addr as u32)
    }

    /// Read a word from `addr`. Fails at 0xFFFF rather than wrapping.
    pub(crate) fn load16(&mut self, addr: u16) -> Result<u16> {
        self.mem.read_word(addr as u32)
    }

    pub(crate) fn store8(&mut self, addr: u16, val: u8) -> Result<()> {
        self.mem.write_byte(addr as u32, val)
    }

    pub(crate) fn store16(&mut self, addr: u16, val: u16) -> Result<()> {
        self.mem.write_word(addr as u32, val)
    }

    /// Charge extra cycles to the instruction being executed.
    pub(crate) fn add_cycles(&mut self, n: u32) {
        self.extra_cycles += n;
    }

    pub(crate) fn set_wait(&mut self, wait: Wait) {
        self.wait = Some(wait);
    }
}

/////////////////////////////////////////////////////////////////////
// Stacks

impl<M: Mem> CPU<M> {
    fn sp(&mut self, stack: Stack) -> &mut u16 {
        match stack {
            Stack::S => &mut self.regs.s,
            Stack::U => &mut self.regs.u,
        }
    }

    /// Push a byte onto `stack`.
    pub(crate) fn push8(&mut self, stack: Stack, val: u8) -> Result<()> {
        let sp = {
            let p = self.sp(stack);
            *p = p.wrapping_sub(1);
            *p
        };
        self.store8(sp, val)
    }

    /// Pull a byte from `stack`.
    pub(crate) fn pull8(&mut self, stack: Stack) -> Result<u8> {
        let sp = *self.sp(stack);
        let val = self.load8(sp)?;
        *self.sp(stack) = sp.wrapping_add(1);
        Ok(val)
    }

    /// Push a word onto `stack`, low byte first so that it reads back
    /// big-endian.
    pub(crate) fn push16(&mut self, stack: Stack, val: u16) -> Result<()> {
        self.push8(stack, val as u8)?;
        self.push8(stack, (val >> 8) as u8)
    }

    /// Pull a word from `stack`.
    pub(crate) fn pull16(&mut self, stack: Stack) -> Result<u16> {
        let hi = self.pull8(stack)? as u16;
        let lo = self.pull8(stack)? as u16;
        Ok((hi << 8) | lo)
    }

    /// Push every register but S onto the hardware stack, in the order
    /// PC, U, Y, X, DP, B, A, CC.
    pub(crate) fn push_entire(&mut self) -> Result<()> {
        let regs = self.regs;

        self.push16(Stack::S, regs.pc)?;
        self.push16(Stack::S, regs.u)?;
        self.push16(Stack::S, regs.y)?;
        self.push16(Stack::S, regs.x)?;
        self.push8(Stack::S, regs.dp)?;
        self.push8(Stack::S, regs.b())?;
        self.push8(Stack::S, regs.a())?;
        self.push8(Stack::S, regs.cc.bits())
    }
}

/////////////////////////////////////////////////////////////////////
// Interrupts

impl<M: Mem> CPU<M> {
    /// Assert the IRQ line for one step. Returns true if the interrupt
    /// was taken, false if it was masked by I.
    pub fn irq(&mut self) -> Result<bool> {
        if self.regs.cc.contains(CC_I) {
            self.resume_sync();
            return Ok(false);
        }
        self.interrupt(VEC_IRQ, true, CC_I)?;
        Ok(true)
    }

    /// Assert the FIRQ line for one step. Only PC and CC are stacked,
    /// unless a CWAI already stacked everything.
    pub fn firq(&mut self) -> Result<bool> {
        if self.regs.cc.contains(CC_F) {
            self.resume_sync();
            return Ok(false);
        }
        self.interrupt(VEC_FIRQ, false, CC_I | CC_F)?;
        Ok(true)
    }

    /// Assert the non-maskable interrupt.
    pub fn nmi(&mut self) -> Result<bool> {
        self.interrupt(VEC_NMI, true, CC_I | CC_F)?;
        Ok(true)
    }

    /// A masked interrupt still ends SYNC; execution continues with the
    /// next instruction.
    fn resume_sync(&mut self) {
        if self.wait == Some(Wait::Sync) {
            self.wait = None;
        }
    }

    fn interrupt(&mut self, vector: u16, entire: bool, mask: CCFlags) -> Result<()> {
        let saved = self.snapshot();

        match self.enter_interrupt(vector, entire, mask) {
            Ok(()) => {
                debug!("interrupt via {:04X} to {:04X}", vector, self.regs.pc);
                Ok(())
            }
            Err(e) => {
                self.restore(saved);
                Err(e.at(saved.regs.pc))
            }
        }
    }

    fn enter_interrupt(&mut self, vector: u16, entire: bool, mask: CCFlags) -> Result<()> {
        let stacked = self.wait == Some(Wait::Cwai);
        self.wait = None;

        if !stacked {
            if entire {
                self.regs.cc.insert(CC_E);
                self.push_entire()?;
                self.cycles += 19;
            } else {
                self.regs.cc.remove(CC_E);
                let (pc, cc) = (self.regs.pc, self.regs.cc.bits());
                self.push16(Stack::S, pc)?;
                self.push8(Stack::S, cc)?;
                self.cycles += 10;
            }
        }

        self.regs.cc.insert(mask);
        self.regs.pc = self.load16(vector)?;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////
// Addressing Modes

impl<M: Mem> CPU<M> {
    /// Fetch the operand bytes for `op` and resolve them.
    fn operand(&mut self, addr: u16, op: &Op) -> Result<Operand> {
        let operand = match op.mode {
            Mode::Inherent => Operand::None,
            Mode::Immediate8 => Operand::Immediate(self.fetchb()? as u16),
            Mode::Immediate16 => Operand::Immediate(self.fetchw()?),
            Mode::Direct => Operand::Address(self.direct()?),
            Mode::Extended => Operand::Address(self.fetchw()?),
            Mode::Indexed => Operand::Address(self.indexed(addr, op.opcode)?),
            Mode::Relative8 => Operand::Address(self.pcrel8()?),
            Mode::Relative16 => Operand::Address(self.pcrel16()?),
        };

        Ok(operand)
    }

    /// Direct addressing.
    fn direct(&mut self) -> Result<u16> {
        let hi = self.regs.dp as u16;
        let lo = self.fetchb()? as u16;

        Ok((hi << 8) | lo)
    }

    /// Return a reference to the base register of an indexed operand.
    fn index_reg(&mut self, reg: IndexReg) -> &mut u16 {
        match reg {
            IndexReg::X => &mut self.regs.x,
            IndexReg::Y => &mut self.regs.y,
            IndexReg::U => &mut self.regs.u,
            IndexReg::S => &mut self.regs.s,
        }
    }

    /// Indexed addressing. By far the most complex addressing mode.
    fn indexed(&mut self, addr: u16, opcode: u16) -> Result<u16> {
        let postbyte = self.fetchb()?;
        let pb = Postbyte::decode(postbyte).ok_or(Error::IllegalPostbyte {
            pc: addr,
            opcode: opcode,
            postbyte: postbyte,
        })?;

        self.extra_cycles += pb.extra_cycles() as u32;
        let base = *self.index_reg(pb.reg);

        let ea = match pb.mode {
            IndexMode::Offset5(offset) => base.wrapping_add(offset as u16),
            IndexMode::PostInc1 => {
                *self.index_reg(pb.reg) = base.wrapping_add(1);
                base
            }
            IndexMode::PostInc2 => {
                *self.index_reg(pb.reg) = base.wrapping_add(2);
                base
            }
            IndexMode::PreDec1 => {
                let ea = base.wrapping_sub(1);
                *self.index_reg(pb.reg) = ea;
                ea
            }
            IndexMode::PreDec2 => {
                let ea = base.wrapping_sub(2);
                *self.index_reg(pb.reg) = ea;
                ea
            }
            IndexMode::NoOffset => base,
            IndexMode::AccB => base.wrapping_add(self.regs.b() as i8 as u16),
            IndexMode::AccA => base.wrapping_add(self.regs.a() as i8 as u16),
            IndexMode::Offset8 => {
                let offset = self.fetchb()? as i8 as u16;
                base.wrapping_add(offset)
            }
            IndexMode::Offset16 => base.wrapping_add(self.fetchw()?),
            IndexMode::AccD => base.wrapping_add(self.regs.d()),
            IndexMode::Pc8 => self.pcrel8()?,
            IndexMode::Pc16 => self.pcrel16()?,
            IndexMode::ExtendedIndirect => self.fetchw()?,
        };

        if pb.indirect {
            self.load16(ea)
        } else {
            Ok(ea)
        }
    }

    /// 8-bit PC-relative addressing. The offset is the last byte of
    /// the instruction, so the cursor is the next instruction.
    fn pcrel8(&mut self) -> Result<u16> {
        let offset = self.fetchb()? as i8 as u16;
        Ok((self.cursor as u16).wrapping_add(offset))
    }

    /// 16-bit PC-relative addressing.
    fn pcrel16(&mut self) -> Result<u16> {
        let offset = self.fetchw()?;
        Ok((self.cursor as u16).wrapping_add(offset))
    }
}

/// Macro used to check flags after executing an instruction.
#[cfg(test)]
macro_rules! assert_flags {
    ($cpu:expr => $($flag:ident: $val:expr),*) => (
        $(assert!($cpu.regs.cc.contains($flag) == $val,
                  "flag {} should be {}", stringify!($flag), $val);)*);
}

#[path = "ops.rs"]
mod ops;

#[cfg(test)]
#[path = "cpu_test.rs"]
mod tests;
