//! Watchdog shutdown.
//!
//! Every watchdog's configuration register is write-protected: the unlock key
//! must land in its protect register immediately before the configuration
//! write, or the write is dropped. The lock is not restored afterwards.

use crate::boot::Peripherals;
use crate::chip::{ChipProfile, WatchdogRegs};
use crate::mmio::Registers;

/// Unlock, then disable.
pub fn disable<R: Registers>(regs: &R, wd: &WatchdogRegs) {
    regs.write(wd.protect, wd.unlock_key);
    regs.write(wd.config, wd.disable);
}

/// Disarm every watchdog the chip has. Reset-on-hang is gone after this.
pub fn disable_all<R: Registers>(p: &Peripherals<R>, chip: &ChipProfile) {
    for wd in chip.watchdogs.iter() {
        disable(p.block(wd.block), wd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esp32c3::ESP32C3;
    use crate::sim::SimBus;

    #[test]
    fn test_each_disable_is_preceded_by_its_unlock() {
        let bus = SimBus::new();
        let p = Peripherals::on_bus(&bus, &ESP32C3);
        disable_all(&p, &ESP32C3);

        let writes: Vec<(usize, u32)> = bus.writes().collect();
        assert_eq!(writes.len(), 2 * ESP32C3.watchdogs.len());

        for (pair, wd) in writes.chunks(2).zip(ESP32C3.watchdogs.iter()) {
            let base = p.block(wd.block).base();
            assert_eq!(pair[0], (base + wd.protect, wd.unlock_key), "{} unlock", wd.name);
            assert_eq!(pair[1], (base + wd.config, wd.disable), "{} disable", wd.name);
        }
    }

    #[test]
    fn test_esp32c3_watchdog_registers_end_disabled() {
        let bus = SimBus::new();
        let p = Peripherals::on_bus(&bus, &ESP32C3);
        // Power-on state: all armed.
        bus.poke(ESP32C3.timer_group_base + 0x48, 0xFFFF_FFFF);
        bus.poke(ESP32C3.rtc_control_base + 0x90, 0xFFFF_FFFF);

        disable_all(&p, &ESP32C3);

        assert_eq!(bus.peek(ESP32C3.timer_group_base + 0x48), 0);
        assert_eq!(bus.peek(ESP32C3.timer_group_base + 0x64), 0x50D8_3AA1);
        assert_eq!(bus.peek(ESP32C3.rtc_control_base + 0x90), 0);
        assert_eq!(bus.peek(ESP32C3.rtc_control_base + 0xA8), 0x50D8_3AA1);
        assert_eq!(bus.peek(ESP32C3.rtc_control_base + 0xAC), 1 << 30);
        assert_eq!(bus.peek(ESP32C3.rtc_control_base + 0xB0), 0x8F1D_312A);
    }

    #[test]
    fn test_system_block_untouched() {
        let bus = SimBus::new();
        let p = Peripherals::on_bus(&bus, &ESP32C3);
        disable_all(&p, &ESP32C3);

        let sys = ESP32C3.system_base;
        assert!(bus.writes().all(|(addr, _)| !(sys..sys + 0x1000).contains(&addr)));
    }
}
