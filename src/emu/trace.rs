//
// trace.rs --- Memory bus observers.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

//! Observers for memory bus traffic.
//!
//! An observer is handed to a `RAM` at construction time and sees
//! each byte as it is read or written. Observers report values only;
//! they cannot change what the CPU reads or writes.

use std::cell::RefCell;
use std::rc::Rc;

/// A single observed bus access.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Read { addr: u16, val: u8 },
    Write { addr: u16, val: u8 },
}

/// Receives memory bus accesses.
pub trait Trace {
    /// Called after a byte has been read from `addr`.
    fn read(&mut self, addr: u16, val: u8);

    /// Called after `val` has been stored at `addr`.
    fn write(&mut self, addr: u16, val: u8);
}

/// Shared observers, so several buses can report to one sink.
impl<T: Trace> Trace for Rc<RefCell<T>> {
    fn read(&mut self, addr: u16, val: u8) {
        self.borrow_mut().read(addr, val);
    }

    fn write(&mut self, addr: u16, val: u8) {
        self.borrow_mut().write(addr, val);
    }
}

/// Reports bus accesses through the `log` facade at trace level.
#[derive(Clone, Debug, Default)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn read(&mut self, addr: u16, val: u8) {
        trace!("bus read  {:04X} -> {:02X}", addr, val);
    }

    fn write(&mut self, addr: u16, val: u8) {
        trace!("bus write {:04X} <- {:02X}", addr, val);
    }
}

/// Keeps every access in memory. Useful for tests and debuggers.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub accesses: Vec<Access>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder { accesses: Vec::new() }
    }

    /// Return only the write accesses, in order.
    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.accesses
            .iter()
            .filter_map(|a| match *a {
                Access::Write { addr, val } => Some((addr, val)),
                Access::Read { .. } => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.accesses.clear();
    }
}

impl Trace for Recorder {
    fn read(&mut self, addr: u16, val: u8) {
        self.accesses.push(Access::Read { addr: addr, val: val });
    }

    fn write(&mut self, addr: u16, val: u8) {
        self.accesses.push(Access::Write { addr: addr, val: val });
    }
}
