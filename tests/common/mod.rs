//! Simulated device and clock for deterministic sweeps.
//!
//! `SimDevice` charges virtual time for every read and write: one cost unit
//! when the block stays inside a physical unit, double when it straddles a
//! unit boundary. `SimClock` reads the same virtual time.

#![allow(dead_code)]

use std::cell::Cell;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::rc::Rc;
use std::time::Duration;

use align_probe::Clock;

/// Virtual time shared between a device and its clock.
pub type VirtualTime = Rc<Cell<Duration>>;

/// Clock reading virtual time. Only advances when the device does I/O.
#[derive(Clone)]
pub struct SimClock {
    now: VirtualTime,
}

impl Clock for SimClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// In-memory device with a physical unit size and a partition phase.
pub struct SimDevice {
    data: Cursor<Vec<u8>>,
    /// Physical unit size (erase block, stripe).
    unit: u64,
    /// Physical offset of logical byte 0.
    phase: u64,
    /// Cost of an access that stays within one unit.
    cost: Duration,
    now: VirtualTime,
    /// Every (is_write, logical offset) access, in order.
    pub accesses: Vec<(bool, u64)>,
    /// Fail reads once this many have succeeded.
    pub fail_reads_after: Option<usize>,
    reads: usize,
}

impl SimDevice {
    pub fn new(len: usize, unit: u64, phase: u64) -> (Self, SimClock) {
        let now: VirtualTime = Rc::new(Cell::new(Duration::ZERO));
        let device = Self {
            data: Cursor::new(vec![0x5A; len]),
            unit,
            phase,
            cost: Duration::from_micros(100),
            now: now.clone(),
            accesses: Vec::new(),
            fail_reads_after: None,
            reads: 0,
        };
        (device, SimClock { now })
    }

    pub fn bytes(&self) -> &[u8] {
        self.data.get_ref()
    }

    fn charge(&self, len: usize) {
        let physical = self.data.position() + self.phase;
        let straddles = (physical % self.unit) + len as u64 > self.unit;
        let cost = if straddles { self.cost * 2 } else { self.cost };
        self.now.set(self.now.get() + cost);
    }
}

impl Read for SimDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(limit) = self.fail_reads_after {
            if self.reads >= limit {
                return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
            }
        }
        self.reads += 1;
        self.accesses.push((false, self.data.position()));
        self.charge(buf.len());
        self.data.read(buf)
    }
}

impl Write for SimDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.accesses.push((true, self.data.position()));
        self.charge(buf.len());
        self.data.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for SimDevice {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.data.seek(pos)
    }
}
