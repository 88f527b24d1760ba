// bringup/src/boot.rs
//! Boot entry sequencing.
//!
//! Order is fixed and each step depends on the one before it:
//!
//! 1. watchdogs off, before anything that can take measurable time;
//! 2. clock to target, before the timebase rate means anything;
//! 3. `.bss` zeroed, before any global is read (logging included);
//! 4. timebase started;
//! 5. one call into the runtime.
//!
//! If the runtime ever returns, the hart halts. No logging and no register
//! writes happen on that path.

use crate::bss::{self, MemoryRegion};
use crate::chip::{Block, ChipProfile};
use crate::cpu::{self, Cpu};
use crate::logging::{self, ByteSink};
use crate::mmio::Registers;
use crate::timebase::Timebase;
use crate::{clock, kdebug, kinfo, watchdog};

/// The register blocks bring-up writes to.
pub struct Peripherals<R> {
    pub timer_group: R,
    pub rtc_control: R,
    pub system: R,
}

impl<R> Peripherals<R> {
    pub fn block(&self, block: Block) -> &R {
        match block {
            Block::TimerGroup => &self.timer_group,
            Block::RtcControl => &self.rtc_control,
            Block::System => &self.system,
        }
    }
}

/// Everything the boot sequence needs from its surroundings.
pub struct Board<R, C> {
    pub peripherals: Peripherals<R>,
    pub cpu: C,
    /// Linker-provided `.bss` bounds.
    pub bss: MemoryRegion,
    /// Registered once `.bss` is zero.
    pub console: Option<&'static dyn ByteSink>,
}

/// Bring the chip up and start the timebase. Returns with the core ready
/// for the runtime.
///
/// # Safety
/// `board.bss` must be the image's zero-initialized region and nothing may
/// have read from it yet. Must run once, on the only hart.
pub unsafe fn bring_up<R: Registers, C: Cpu>(board: &Board<R, C>, chip: &ChipProfile) {
    let p = &board.peripherals;

    watchdog::disable_all(p, chip);
    clock::configure(&p.system, &chip.clock);

    bss::zero(board.bss);

    // Globals are usable from here on.
    logging::init();
    if let Some(console) = board.console {
        logging::register_console(console);
    }
    kdebug!(
        "{}: watchdogs off, cpu {} MHz, .bss {:#x}..{:#x}",
        chip.name,
        chip.cpu_hz / 1_000_000,
        board.bss.start(),
        board.bss.end()
    );

    let timebase = Timebase::new(&p.timer_group, chip);
    timebase.configure();
    kinfo!(
        "timebase running at {} ns/tick",
        timebase.rate().nanos_per_tick()
    );
}

/// The ROM-facing entry: bring up, hand off, halt if the runtime returns.
///
/// # Safety
/// Same contract as [`bring_up`].
pub unsafe fn boot<R, C, F>(board: &Board<R, C>, chip: &ChipProfile, run: F) -> !
where
    R: Registers,
    C: Cpu,
    F: FnOnce(),
{
    bring_up(board, chip);

    kdebug!("handing off to runtime");
    run();

    cpu::halt(&board.cpu)
}
