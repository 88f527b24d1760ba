//! Clock tree: XTAL → PLL, then CPU divider.
//!
//! The hardware cannot jump straight to the target frequency, so this is two
//! writes. The divider value only means the target frequency once the PLL is
//! the system clock source, hence the order. Nothing is read back.

use crate::chip::ClockRegs;
use crate::mmio::Registers;

pub fn configure<R: Registers>(system: &R, clock: &ClockRegs) {
    system.write(clock.sysclk_conf, clock.sysclk_pll);
    system.write(clock.cpu_per_conf, clock.cpu_per_target);
}
