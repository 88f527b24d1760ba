//! In-memory register model.
//!
//! Stands in for the hardware when the bring-up sequence runs off-target.
//! [`SimBus`] is a flat register file keyed by absolute address plus an
//! ordered journal of everything that happened to it; [`SimBlock`] views it
//! from one base address. [`SimCounter`] emulates the latched 64-bit timer and
//! [`SimCpu`] stands in for the hart's `wfi`.
//!
//! Storage is fixed-capacity so the model builds without an allocator.

use core::cell::{Cell, RefCell};

use heapless::{LinearMap, Vec};

use crate::boot::Peripherals;
use crate::chip::{ChipProfile, TimerRegs};
use crate::cpu::Cpu;
use crate::mmio::Registers;

pub const REGISTER_SLOTS: usize = 64;
pub const JOURNAL_DEPTH: usize = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Write { addr: usize, value: u32 },
    Wfi,
    Handoff,
}

struct State {
    regs: LinearMap<usize, u32, REGISTER_SLOTS>,
    journal: Vec<Event, JOURNAL_DEPTH>,
    overflowed: bool,
}

pub struct SimBus {
    state: RefCell<State>,
}

impl SimBus {
    pub fn new() -> Self {
        SimBus {
            state: RefCell::new(State {
                regs: LinearMap::new(),
                journal: Vec::new(),
                overflowed: false,
            }),
        }
    }

    pub fn block(&self, base: usize) -> SimBlock<'_> {
        SimBlock { bus: self, base }
    }

    /// Current value at `addr`; never-written registers read as zero.
    pub fn peek(&self, addr: usize) -> u32 {
        self.state.borrow().regs.get(&addr).copied().unwrap_or(0)
    }

    /// Preload a register without journaling it.
    pub fn poke(&self, addr: usize, value: u32) {
        let mut st = self.state.borrow_mut();
        if st.regs.insert(addr, value).is_err() {
            st.overflowed = true;
        }
    }

    /// Note the moment control passed to the runtime.
    pub fn mark_handoff(&self) {
        self.record(Event::Handoff);
    }

    pub fn events(&self) -> Vec<Event, JOURNAL_DEPTH> {
        self.state.borrow().journal.clone()
    }

    /// `(addr, value)` of every journaled write, in order.
    pub fn writes(&self) -> impl Iterator<Item = (usize, u32)> {
        self.events().into_iter().filter_map(|e| match e {
            Event::Write { addr, value } => Some((addr, value)),
            _ => None,
        })
    }

    /// Set when the register file or the journal ran out of room.
    pub fn overflowed(&self) -> bool {
        self.state.borrow().overflowed
    }

    fn record(&self, event: Event) {
        let mut st = self.state.borrow_mut();
        if st.journal.push(event).is_err() {
            st.overflowed = true;
        }
    }

    fn store(&self, addr: usize, value: u32) {
        self.poke(addr, value);
        self.record(Event::Write { addr, value });
    }
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A register block at `base` on a [`SimBus`].
#[derive(Clone, Copy)]
pub struct SimBlock<'b> {
    bus: &'b SimBus,
    base: usize,
}

impl SimBlock<'_> {
    pub fn base(&self) -> usize {
        self.base
    }
}

impl Registers for SimBlock<'_> {
    fn read(&self, offset: usize) -> u32 {
        self.bus.peek(self.base + offset)
    }

    fn write(&self, offset: usize, value: u32) {
        self.bus.store(self.base + offset, value)
    }
}

impl<'b> Peripherals<SimBlock<'b>> {
    /// The chip's register blocks, placed at their real bases on `bus`.
    pub fn on_bus(bus: &'b SimBus, chip: &ChipProfile) -> Self {
        Peripherals {
            timer_group: bus.block(chip.timer_group_base),
            rtc_control: bus.block(chip.rtc_control_base),
            system: bus.block(chip.system_base),
        }
    }
}

/// A hart whose `wfi` is journaled.
///
/// The real halt loop never ends; this one panics after `limit` waits so a
/// test can regain control and inspect what happened.
pub struct SimCpu<'b> {
    bus: &'b SimBus,
    waits: Cell<usize>,
    limit: usize,
}

impl<'b> SimCpu<'b> {
    pub fn new(bus: &'b SimBus, limit: usize) -> Self {
        SimCpu {
            bus,
            waits: Cell::new(0),
            limit,
        }
    }

    pub fn waits(&self) -> usize {
        self.waits.get()
    }
}

impl Cpu for SimCpu<'_> {
    fn wait_for_interrupt(&self) {
        self.bus.record(Event::Wfi);
        let n = self.waits.get() + 1;
        self.waits.set(n);
        if n >= self.limit {
            panic!("sim cpu: wait limit reached");
        }
    }
}

/// Timer-group counter with latch semantics.
///
/// The live count advances by `step` on every latch, so each poll of a
/// timebase sees time move forward by exactly one step. Reads of the low and
/// high halves return the last latched value.
pub struct SimCounter<'c> {
    layout: &'c TimerRegs,
    step: u64,
    live: Cell<u64>,
    latched: Cell<u64>,
    load: Cell<u64>,
    config: Cell<u32>,
    polls: Cell<u64>,
}

impl<'c> SimCounter<'c> {
    pub fn new(layout: &'c TimerRegs, start: u64, step: u64) -> Self {
        SimCounter {
            layout,
            step,
            live: Cell::new(start),
            latched: Cell::new(0),
            load: Cell::new(0),
            config: Cell::new(0),
            polls: Cell::new(0),
        }
    }

    pub fn live(&self) -> u64 {
        self.live.get()
    }

    /// Value captured by the most recent latch.
    pub fn last_sample(&self) -> u64 {
        self.latched.get()
    }

    pub fn polls(&self) -> u64 {
        self.polls.get()
    }

    pub fn config(&self) -> u32 {
        self.config.get()
    }
}

impl Registers for SimCounter<'_> {
    fn read(&self, offset: usize) -> u32 {
        let t = self.layout;
        if offset == t.lo {
            self.latched.get() as u32
        } else if offset == t.hi {
            (self.latched.get() >> 32) as u32
        } else if offset == t.config {
            self.config.get()
        } else {
            0
        }
    }

    fn write(&self, offset: usize, value: u32) {
        let t = self.layout;
        if offset == t.update {
            let now = self.live.get();
            self.latched.set(now);
            self.live.set(now.saturating_add(self.step));
            self.polls.set(self.polls.get() + 1);
        } else if offset == t.load_lo {
            self.load.set((self.load.get() & !0xFFFF_FFFF) | value as u64);
        } else if offset == t.load_hi {
            self.load.set((self.load.get() & 0xFFFF_FFFF) | (value as u64) << 32);
        } else if offset == t.load {
            self.live.set(self.load.get());
        } else if offset == t.config {
            self.config.set(value);
        }
    }
}
