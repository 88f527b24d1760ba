// bringup/src/esp32c3.rs
//! ESP32-C3 register map and the physical instances bound to it.

use crate::chip::{
    is_whole_nanosecond_tick, Block, ChipProfile, ClockRegs, TimerRegs, UartRegs, WatchdogRegs,
};
use crate::mmio::Mmio;
use crate::timebase::Timebase;
use crate::uart::Uart;

/* Peripheral bases */
const UART0_BASE: usize = 0x6000_0000;
const RTC_CNTL_BASE: usize = 0x6000_8000;
const TIMG0_BASE: usize = 0x6001_F000;
const SYSTEM_BASE: usize = 0x600C_0000;

/* TIMG0 */
const TIMG_T0CONFIG: usize = 0x00;
const TIMG_T0LO: usize = 0x04;
const TIMG_T0HI: usize = 0x08;
const TIMG_T0UPDATE: usize = 0x0C;
const TIMG_T0LOADLO: usize = 0x18;
const TIMG_T0LOADHI: usize = 0x1C;
const TIMG_T0LOAD: usize = 0x20;
const TIMG_WDTCONFIG0: usize = 0x48;
const TIMG_WDTWPROTECT: usize = 0x64;

const T0_DIVIDER_POS: u32 = 13;
const T0_INCREASE: u32 = 1 << 30;
const T0_EN: u32 = 1 << 31;

/* RTC_CNTL */
const RTC_WDTCONFIG0: usize = 0x90;
const RTC_WDTWPROTECT: usize = 0xA8;
const RTC_SWD_CONF: usize = 0xAC;
const RTC_SWD_WPROTECT: usize = 0xB0;

const SWD_DISABLE: u32 = 1 << 30;

/* Write-protect keys */
const WDT_WKEY: u32 = 0x50D8_3AA1;
const SWD_WKEY: u32 = 0x8F1D_312A;

/* SYSTEM */
const SYSTEM_CPU_PER_CONF: usize = 0x08;
const SYSTEM_SYSCLK_CONF: usize = 0x58;

const CPUPERIOD_SEL_POS: u32 = 0;
const PLL_FREQ_SEL: u32 = 1 << 2;
const CPU_WAIT_MODE_FORCE_ON: u32 = 1 << 3;
const SOC_CLK_SEL_POS: u32 = 10;
const SOC_CLK_SEL_PLL: u32 = 1;

/* UART */
const UART_FIFO: usize = 0x00;
const UART_STATUS: usize = 0x1C;
const UART_TXFIFO_CNT_POS: u32 = 16;
const UART_TXFIFO_CNT_MASK: u32 = 0x3FF;
const UART_TXFIFO_DEPTH: u32 = 128;

const APB_HZ: u64 = 80_000_000;
const TIMER_DIVIDER: u32 = 2;

pub const ESP32C3: ChipProfile = ChipProfile {
    name: "esp32c3",

    timer_group_base: TIMG0_BASE,
    rtc_control_base: RTC_CNTL_BASE,
    system_base: SYSTEM_BASE,
    uart0_base: UART0_BASE,

    watchdogs: [
        WatchdogRegs {
            name: "timg0",
            block: Block::TimerGroup,
            protect: TIMG_WDTWPROTECT,
            unlock_key: WDT_WKEY,
            config: TIMG_WDTCONFIG0,
            disable: 0,
        },
        WatchdogRegs {
            name: "rtc",
            block: Block::RtcControl,
            protect: RTC_WDTWPROTECT,
            unlock_key: WDT_WKEY,
            config: RTC_WDTCONFIG0,
            disable: 0,
        },
        WatchdogRegs {
            name: "super",
            block: Block::RtcControl,
            protect: RTC_SWD_WPROTECT,
            unlock_key: SWD_WKEY,
            config: RTC_SWD_CONF,
            disable: SWD_DISABLE,
        },
    ],

    // XTAL (20 MHz CPU) -> PLL (80 MHz) -> CPUPERIOD_SEL=1 (160 MHz).
    clock: ClockRegs {
        sysclk_conf: SYSTEM_SYSCLK_CONF,
        sysclk_pll: SOC_CLK_SEL_PLL << SOC_CLK_SEL_POS,
        cpu_per_conf: SYSTEM_CPU_PER_CONF,
        cpu_per_target: CPU_WAIT_MODE_FORCE_ON | PLL_FREQ_SEL | 1 << CPUPERIOD_SEL_POS,
    },

    timer: TimerRegs {
        config: TIMG_T0CONFIG,
        lo: TIMG_T0LO,
        hi: TIMG_T0HI,
        update: TIMG_T0UPDATE,
        load_lo: TIMG_T0LOADLO,
        load_hi: TIMG_T0LOADHI,
        load: TIMG_T0LOAD,
        config_run: T0_EN | T0_INCREASE | TIMER_DIVIDER << T0_DIVIDER_POS,
    },

    uart: UartRegs {
        fifo: UART_FIFO,
        status: UART_STATUS,
        txfifo_cnt_shift: UART_TXFIFO_CNT_POS,
        txfifo_cnt_mask: UART_TXFIFO_CNT_MASK,
        txfifo_depth: UART_TXFIFO_DEPTH,
    },

    cpu_hz: 160_000_000,
    apb_hz: APB_HZ,
    timer_divider: TIMER_DIVIDER,
};

const _: () = assert!(is_whole_nanosecond_tick(APB_HZ, TIMER_DIVIDER));

static TIMEBASE: Timebase<'static, Mmio> =
    Timebase::new(unsafe { Mmio::new(TIMG0_BASE) }, &ESP32C3);

static UART0: Uart<'static, Mmio> = Uart::new(unsafe { Mmio::new(UART0_BASE) }, &ESP32C3.uart);

/// Timebase over TIMG0 timer 0. Only meaningful once bring-up configured it.
pub fn timebase() -> &'static Timebase<'static, Mmio> {
    &TIMEBASE
}

pub fn uart0() -> &'static Uart<'static, Mmio> {
    &UART0
}

/// Register blocks the bring-up sequence writes.
pub fn peripherals() -> crate::boot::Peripherals<Mmio> {
    unsafe {
        crate::boot::Peripherals {
            timer_group: Mmio::new(TIMG0_BASE),
            rtc_control: Mmio::new(RTC_CNTL_BASE),
            system: Mmio::new(SYSTEM_BASE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esp32c3_tick_is_25ns() {
        assert_eq!(ESP32C3.tick_rate().nanos_per_tick(), 25);
    }

    #[test]
    fn test_timer_config_word() {
        let v = ESP32C3.timer.config_run;
        assert_eq!(v & T0_EN, T0_EN);
        assert_eq!(v & T0_INCREASE, T0_INCREASE);
        assert_eq!((v >> T0_DIVIDER_POS) & 0xFFFF, 2);
    }

    #[test]
    fn test_clock_values() {
        assert_eq!(ESP32C3.clock.sysclk_pll, 1 << 10);
        assert_eq!(ESP32C3.clock.cpu_per_target, 0b1101);
    }

    #[test]
    fn test_every_watchdog_has_a_key() {
        for wd in ESP32C3.watchdogs.iter() {
            assert_ne!(wd.unlock_key, 0, "{} has no unlock key", wd.name);
            assert_ne!(wd.protect, wd.config);
        }
        assert_eq!(ESP32C3.watchdogs[2].disable, SWD_DISABLE);
    }

    #[test]
    fn test_physical_bindings() {
        assert_eq!(peripherals().timer_group.base(), TIMG0_BASE);
        assert_eq!(peripherals().rtc_control.base(), RTC_CNTL_BASE);
        assert_eq!(peripherals().system.base(), SYSTEM_BASE);
    }
}
