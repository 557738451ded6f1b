//
// lib.rs --- MC6809 core library.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

//! An emulator core for the Motorola 6809.
//!
//! The `emu` module holds the memory bus, the register file and the
//! CPU itself. A typical session loads machine code into a `RAM`,
//! binds a `CPU` to it and runs until a stop condition holds:
//!
//! ```
//! use mc6809::emu::{Mem, RAM, CPU, StopCondition};
//!
//! let mut cpu = CPU::new(RAM::default());
//! cpu.mem.load(0x0100, &[0x86, 0x2A]).unwrap();     // lda #$2A
//! cpu.run(0x0100, StopCondition::Address(0x0102)).unwrap();
//! assert_eq!(cpu.regs.a(), 0x2A);
//! ```

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod emu;
