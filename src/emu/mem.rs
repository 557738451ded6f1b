//
// mem.rs --- Memory bus.
//
// Copyright (C) 2016, James Bielman <jamesjb@gmail.com>
// All Rights Reserved.
//
// Released under the "BSD3" license. See the file "LICENSE"
// for details.
//

use std::fs;
use std::path::Path;

use crate::emu::config::Config;
use crate::emu::error::{Error, Result};
use crate::emu::trace::{LogTrace, Trace};

/// Size of the 6809 address space.
pub const ADDRESS_SPACE: u32 = 0x10000;

/// Operations on memory.
///
/// Addresses are `u32` so that an access one past the top of the
/// address space can be expressed and rejected. Nothing wraps: an
/// access at or above `size()` fails with `Error::OutOfRange`.
pub trait Mem {
    /// Number of addressable bytes.
    fn size(&self) -> u32 {
        ADDRESS_SPACE
    }

    /// Load a byte from `addr` and return it.
    fn read_byte(&mut self, addr: u32) -> Result<u8>;

    /// Store a byte at `addr`.
    fn write_byte(&mut self, addr: u32, val: u8) -> Result<()>;

    /// Fail unless all of `addr .. addr + len` is addressable.
    fn check(&self, addr: u32, len: usize) -> Result<()> {
        let end = addr as u64 + len as u64;
        if len > 0 && end > self.size() as u64 {
            let first_bad = if addr >= self.size() { addr } else { self.size() };
            return Err(Error::OutOfRange { address: first_bad, pc: None });
        }
        Ok(())
    }

    /// Load a big-endian 16-bit value from `addr`.
    fn read_word(&mut self, addr: u32) -> Result<u16> {
        self.check(addr, 2)?;
        let hi = self.read_byte(addr)? as u16;
        let lo = self.read_byte(addr + 1)? as u16;

        Ok((hi << 8) | lo)
    }

    /// Store a 16-bit value at `addr`, high byte first.
    fn write_word(&mut self, addr: u32, val: u16) -> Result<()> {
        self.check(addr, 2)?;
        self.write_byte(addr, (val >> 8) as u8)?;
        self.write_byte(addr + 1, val as u8)
    }

    /// Store an array of bytes starting at `addr`. Nothing is written
    /// unless the whole array fits.
    fn load(&mut self, addr: u32, bytes: &[u8]) -> Result<()> {
        self.check(addr, bytes.len())?;
        for (i, x) in bytes.iter().enumerate() {
            self.write_byte(addr + i as u32, *x)?;
        }
        Ok(())
    }

    /// Read an array of bytes starting at `addr`.
    fn dump(&mut self, addr: u32, bytes: &mut [u8]) -> Result<()> {
        self.check(addr, bytes.len())?;
        for (i, x) in bytes.iter_mut().enumerate() {
            *x = self.read_byte(addr + i as u32)?;
        }
        Ok(())
    }

    /// Load Intel HEX data records. Returns the start address if the
    /// input carries one.
    fn load_ihex(&mut self, text: &str) -> Result<Option<u16>> {
        use ihex::Record;

        let mut entry = None;

        for record in ihex::Reader::new(text) {
            match record? {
                Record::Data { offset, value } => {
                    self.load(offset as u32, &value)?;
                }
                Record::EndOfFile => break,
                Record::ExtendedSegmentAddress(0) | Record::ExtendedLinearAddress(0) => {}
                Record::StartSegmentAddress { cs: 0, ip } => entry = Some(ip),
                Record::StartLinearAddress(addr) if addr <= 0xffff => {
                    entry = Some(addr as u16);
                }
                other => return Err(Error::BadIhexRecord(format!("{:?}", other))),
            }
        }

        Ok(entry)
    }

    /// Load an Intel HEX file from disk.
    fn load_ihex_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Option<u16>>
    where
        Self: Sized,
    {
        let text = fs::read_to_string(path)?;
        self.load_ihex(&text)
    }
}

/// A random access memory device, optionally observed.
pub struct RAM {
    pub contents: Vec<u8>,
    observer: Option<Box<dyn Trace>>,
    trace_reads: bool,
}

impl RAM {
    /// Create a new `RAM` containing `size` bytes of memory.
    pub fn new(size: usize) -> RAM {
        assert!(size <= ADDRESS_SPACE as usize);
        RAM {
            contents: vec![0u8; size],
            observer: None,
            trace_reads: false,
        }
    }

    /// Create a `RAM` that reports every read and write to `observer`.
    pub fn with_trace<T: Trace + 'static>(size: usize, observer: T) -> RAM {
        let mut ram = RAM::new(size);
        ram.set_trace(Some(Box::new(observer)), true);
        ram
    }

    /// Create a full 64K `RAM` as described by `cfg`. With tracing on,
    /// accesses are reported through `LogTrace`.
    pub fn from_config(cfg: &Config) -> RAM {
        RAM::from_config_with(cfg, LogTrace)
    }

    /// Like `from_config`, reporting to `observer` instead. The observer
    /// is dropped if `cfg.trace` is off.
    pub fn from_config_with<T: Trace + 'static>(cfg: &Config, observer: T) -> RAM {
        let mut ram = RAM::new(ADDRESS_SPACE as usize);
        if cfg.trace {
            ram.set_trace(Some(Box::new(observer)), cfg.trace_reads());
        }
        ram
    }

    /// Replace the observer. `trace_reads` selects whether reads are
    /// reported in addition to writes.
    pub fn set_trace(&mut self, observer: Option<Box<dyn Trace>>, trace_reads: bool) {
        self.observer = observer;
        self.trace_reads = trace_reads;
    }

    pub fn is_traced(&self) -> bool {
        self.observer.is_some()
    }
}

impl Default for RAM {
    fn default() -> RAM {
        RAM::new(ADDRESS_SPACE as usize)
    }
}

impl Mem for RAM {
    fn size(&self) -> u32 {
        self.contents.len() as u32
    }

    fn read_byte(&mut self, addr: u32) -> Result<u8> {
        self.check(addr, 1)?;
        let val = self.contents[addr as usize];
        if self.trace_reads {
            if let Some(ref mut obs) = self.observer {
                obs.read(addr as u16, val);
            }
        }
        Ok(val)
    }

    fn write_byte(&mut self, addr: u32, val: u8) -> Result<()> {
        self.check(addr, 1)?;
        self.contents[addr as usize] = val;
        if let Some(ref mut obs) = self.observer {
            obs.write(addr as u16, val);
        }
        Ok(())
    }
}
