//
// config.rs --- Emulator configuration.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

/// How much the emulator reports while running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Only memory writes reach the bus observer.
    Quiet,
    /// Reads and writes reach the bus observer.
    Normal,
    /// As `Normal`, and every executed instruction is logged.
    Verbose,
}

impl Default for Verbosity {
    fn default() -> Verbosity {
        Verbosity::Quiet
    }
}

/// Construction options for a `RAM` and the `CPU` bound to it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub verbosity: Verbosity,

    /// Attach a read/write observer to the memory bus.
    pub trace: bool,
}

impl Config {
    pub fn new(verbosity: Verbosity, trace: bool) -> Config {
        Config {
            verbosity: verbosity,
            trace: trace,
        }
    }

    /// True if bus reads should be reported to the observer.
    pub fn trace_reads(&self) -> bool {
        self.trace && self.verbosity >= Verbosity::Normal
    }

    /// True if executed instructions should be logged.
    pub fn log_instructions(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }
}
