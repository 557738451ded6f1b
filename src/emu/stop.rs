//
// stop.rs --- Run stop conditions.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

use std::collections::BTreeSet;

use crate::emu::regs::Regs;

/// Decides when `CPU::run` returns.
///
/// `should_stop` is called before every step with the current
/// registers and the number of steps executed so far in this run.
pub trait Stop {
    fn should_stop(&mut self, regs: &Regs, steps: u64) -> bool;
}

/// The stock stop conditions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopCondition {
    /// Stop when the program counter equals the address.
    Address(u16),
    /// Stop after executing this many steps.
    Steps(u64),
    /// Stop when the program counter is any of the addresses.
    Breakpoints(BTreeSet<u16>),
    /// Stop when any of the conditions holds.
    Any(Vec<StopCondition>),
}

impl StopCondition {
    /// Breakpoints at each address in `addrs`.
    pub fn breakpoints<I: IntoIterator<Item = u16>>(addrs: I) -> StopCondition {
        StopCondition::Breakpoints(addrs.into_iter().collect())
    }
}

impl Stop for StopCondition {
    fn should_stop(&mut self, regs: &Regs, steps: u64) -> bool {
        match *self {
            StopCondition::Address(addr) => regs.pc == addr,
            StopCondition::Steps(n) => steps >= n,
            StopCondition::Breakpoints(ref addrs) => addrs.contains(&regs.pc),
            StopCondition::Any(ref mut conds) => {
                conds.iter_mut().any(|c| c.should_stop(regs, steps))
            }
        }
    }
}

/// Any closure over the registers and step count is a stop condition.
impl<F> Stop for F
where
    F: FnMut(&Regs, u64) -> bool,
{
    fn should_stop(&mut self, regs: &Regs, steps: u64) -> bool {
        self(regs, steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(pc: u16) -> Regs {
        let mut regs = Regs::new();
        regs.pc = pc;
        regs
    }

    #[test]
    fn address() {
        let mut stop = StopCondition::Address(0x0102);
        assert!(!stop.should_stop(&at(0x0100), 0));
        assert!(stop.should_stop(&at(0x0102), 1));
    }

    #[test]
    fn steps() {
        let mut stop = StopCondition::Steps(3);
        assert!(!stop.should_stop(&at(0), 2));
        assert!(stop.should_stop(&at(0), 3));
        assert!(StopCondition::Steps(0).should_stop(&at(0), 0));
    }

    #[test]
    fn breakpoints_and_any() {
        let mut stop = StopCondition::Any(vec![
            StopCondition::breakpoints(vec![0x10, 0x20]),
            StopCondition::Steps(100),
        ]);
        assert!(stop.should_stop(&at(0x20), 0));
        assert!(!stop.should_stop(&at(0x30), 99));
        assert!(stop.should_stop(&at(0x30), 100));
        assert!(!StopCondition::Any(vec![]).should_stop(&at(0), 0));
    }

    #[test]
    fn closures() {
        let mut seen = 0;
        {
            let mut stop = |regs: &Regs, _steps: u64| {
                seen += 1;
                regs.x == 0xBEEF
            };
            assert!(!stop.should_stop(&at(0), 0));

            let mut regs = at(0);
            regs.x = 0xBEEF;
            assert!(stop.should_stop(&regs, 1));
        }
        assert_eq!(seen, 2);
    }
}
