//
// mod.rs --- MC6809 emulator module.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

pub mod config;
pub mod cpu;
pub mod decode;
pub mod error;
pub mod indexed;
pub mod mem;
pub mod regs;
pub mod stop;
pub mod trace;

pub use self::config::{Config, Verbosity};
pub use self::cpu::{Instruction, Operand, State, Wait, CPU};
pub use self::decode::{Inst, Mode, Op};
pub use self::error::{Error, Result};
pub use self::mem::{Mem, RAM};
pub use self::regs::{CCFlags, Reg, Regs};
pub use self::stop::{Stop, StopCondition};
pub use self::trace::{Access, LogTrace, Recorder, Trace};
