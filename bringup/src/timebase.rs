// bringup/src/timebase.rs
//! Monotonic tick source on a 64-bit hardware counter.
//!
//! The counter is exposed as two 32-bit halves that only hold a coherent
//! value after a write to the update register latches them. [`Timebase::ticks`]
//! always latches first, so a carry from the low half into the high half can
//! never be observed half-applied.
//!
//! Conversions use a fixed nanoseconds-per-tick figure derived from the chip
//! profile when the timebase is built, never a value read back from hardware.

use core::time::Duration;

use crate::chip::ChipProfile;
use crate::mmio::Registers;
use crate::sleep;

pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Anything that yields a monotonically increasing tick count.
pub trait TickSource {
    fn ticks(&self) -> u64;
}

/// Fixed tick period, in whole nanoseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickRate {
    nanos_per_tick: u64,
}

impl TickRate {
    /// `source_hz / divider` must divide one second evenly; checked where a
    /// profile is declared.
    pub const fn from_clock(source_hz: u64, divider: u32) -> Self {
        TickRate {
            nanos_per_tick: NANOS_PER_SEC / (source_hz / divider as u64),
        }
    }

    pub const fn from_nanos_per_tick(nanos_per_tick: u64) -> Self {
        TickRate { nanos_per_tick }
    }

    pub const fn nanos_per_tick(&self) -> u64 {
        self.nanos_per_tick
    }

    pub const fn ticks_per_sec(&self) -> u64 {
        NANOS_PER_SEC / self.nanos_per_tick
    }

    /// Saturates at `u64::MAX` nanoseconds (about 584 years).
    pub const fn ticks_to_nanos(&self, ticks: u64) -> u64 {
        ticks.saturating_mul(self.nanos_per_tick)
    }

    /// Truncates to whole ticks.
    pub const fn nanos_to_ticks(&self, nanos: u64) -> u64 {
        nanos / self.nanos_per_tick
    }

    pub fn ticks_to_duration(&self, ticks: u64) -> Duration {
        let nanos = ticks as u128 * self.nanos_per_tick as u128;
        Duration::new(
            (nanos / NANOS_PER_SEC as u128) as u64,
            (nanos % NANOS_PER_SEC as u128) as u32,
        )
    }

    /// Truncates to whole ticks; durations past the counter's range saturate.
    pub fn duration_to_ticks(&self, d: Duration) -> u64 {
        let ticks = d.as_nanos() / self.nanos_per_tick as u128;
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }
}

/// Timer 0 of a timer group, run as a free-running up-counter.
pub struct Timebase<'c, R> {
    regs: R,
    chip: &'c ChipProfile,
    rate: TickRate,
}

impl<'c, R> Timebase<'c, R> {
    pub const fn new(regs: R, chip: &'c ChipProfile) -> Self {
        Timebase {
            regs,
            chip,
            rate: chip.tick_rate(),
        }
    }

    pub const fn rate(&self) -> TickRate {
        self.rate
    }
}

impl<R: Registers> Timebase<'_, R> {

    /// Start counting up from zero at the profile's tick rate.
    ///
    /// Must run after clock configuration: the rate constant assumes the
    /// target APB frequency is already in effect.
    pub fn configure(&self) {
        let t = &self.chip.timer;
        self.regs.write(t.config, t.config_run);

        self.regs.write(t.load_lo, 0);
        self.regs.write(t.load_hi, 0);
        self.regs.write(t.load, 0); // value ignored, the write commits the load
    }

    /// Latched snapshot of the 64-bit counter.
    pub fn ticks(&self) -> u64 {
        let t = &self.chip.timer;
        self.regs.write(t.update, 0);
        let lo = self.regs.read(t.lo) as u64;
        let hi = self.regs.read(t.hi) as u64;
        lo | (hi << 32)
    }

    pub fn ticks_to_duration(&self, ticks: u64) -> Duration {
        self.rate().ticks_to_duration(ticks)
    }

    pub fn duration_to_ticks(&self, d: Duration) -> u64 {
        self.rate().duration_to_ticks(d)
    }

    pub fn ticks_to_nanos(&self, ticks: u64) -> u64 {
        self.rate().ticks_to_nanos(ticks)
    }

    pub fn nanos_to_ticks(&self, nanos: u64) -> u64 {
        self.rate().nanos_to_ticks(nanos)
    }

    /// Time since [`configure`](Self::configure) reset the counter.
    pub fn uptime(&self) -> Duration {
        self.ticks_to_duration(self.ticks())
    }

    /// The timer's resolution.
    pub fn resolution(&self) -> Duration {
        self.ticks_to_duration(1)
    }

    /// Busy-wait for `d` ticks.
    pub fn sleep_ticks(&self, d: u64) {
        sleep::sleep_ticks(self, d)
    }

    /// Busy-wait for at least `duration`, rounded down to whole ticks.
    pub fn spin_for(&self, duration: Duration) {
        sleep::sleep_ticks(self, self.duration_to_ticks(duration))
    }
}

impl<R: Registers> TickSource for Timebase<'_, R> {
    fn ticks(&self) -> u64 {
        Timebase::ticks(self)
    }
}
