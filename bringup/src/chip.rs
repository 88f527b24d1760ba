//! Chip variant tables.
//!
//! Everything chip-specific the bring-up sequence needs (base addresses,
//! register offsets, unlock keys, bit patterns, clock figures) lives in a
//! [`ChipProfile`]. The sequencing code only ever reads from a profile, so a
//! new variant is a new table.

use crate::timebase::{TickRate, NANOS_PER_SEC};

/// Which register block a register lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    TimerGroup,
    RtcControl,
    System,
}

/// A write-protected watchdog: unlock key into `protect`, then `disable` into `config`.
#[derive(Clone, Copy, Debug)]
pub struct WatchdogRegs {
    pub name: &'static str,
    pub block: Block,
    pub protect: usize,
    pub unlock_key: u32,
    pub config: usize,
    pub disable: u32,
}

/// Clock tree registers and the two values that reach the target frequency.
#[derive(Clone, Copy, Debug)]
pub struct ClockRegs {
    pub sysclk_conf: usize,
    /// System clock source select (PLL).
    pub sysclk_pll: u32,
    pub cpu_per_conf: usize,
    /// CPU period select, wait mode forced to its power-on default.
    pub cpu_per_target: u32,
}

/// 64-bit up/down counter with a latched low/high readout.
#[derive(Clone, Copy, Debug)]
pub struct TimerRegs {
    pub config: usize,
    pub lo: usize,
    pub hi: usize,
    pub update: usize,
    pub load_lo: usize,
    pub load_hi: usize,
    pub load: usize,
    /// Enable, count up, prescaler.
    pub config_run: u32,
}

/// UART transmit path used for early diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct UartRegs {
    pub fifo: usize,
    pub status: usize,
    pub txfifo_cnt_shift: u32,
    pub txfifo_cnt_mask: u32,
    pub txfifo_depth: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ChipProfile {
    pub name: &'static str,

    pub timer_group_base: usize,
    pub rtc_control_base: usize,
    pub system_base: usize,
    pub uart0_base: usize,

    pub watchdogs: [WatchdogRegs; 3],
    pub clock: ClockRegs,
    pub timer: TimerRegs,
    pub uart: UartRegs,

    pub cpu_hz: u64,
    /// Clock feeding the timer group once the PLL is selected.
    pub apb_hz: u64,
    pub timer_divider: u32,
}

impl ChipProfile {
    pub const fn tick_rate(&self) -> TickRate {
        TickRate::from_clock(self.apb_hz, self.timer_divider)
    }
}

/// Exact when `source_hz / divider` divides one second.
pub const fn is_whole_nanosecond_tick(source_hz: u64, divider: u32) -> bool {
    let tick_hz = source_hz / divider as u64;
    tick_hz != 0 && source_hz % divider as u64 == 0 && NANOS_PER_SEC % tick_hz == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_nanosecond_tick_check() {
        assert!(is_whole_nanosecond_tick(80_000_000, 2));
        assert!(is_whole_nanosecond_tick(40_000_000, 1));
        assert!(!is_whole_nanosecond_tick(80_000_000, 3));
        assert!(!is_whole_nanosecond_tick(1, 2));
    }
}
