#![no_std]
#![no_main]

mod entry;
mod runtime;

use bringup_lib::boot::{self, Board};
use bringup_lib::bss::MemoryRegion;
use bringup_lib::cpu::{self, RiscvCpu};
use bringup_lib::esp32c3::{self, ESP32C3};
use core::fmt::Write;

extern "C" {
    static _sbss: u32;
    static _ebss: u32;
}

#[no_mangle]
extern "C" fn rust_start() -> ! {
    let (start, end) = unsafe { (&raw const _sbss as usize, &raw const _ebss as usize) };

    // A broken linker script is not something to boot through.
    let Ok(bss) = MemoryRegion::new(start, end) else {
        cpu::halt(&RiscvCpu)
    };

    let board = Board {
        peripherals: esp32c3::peripherals(),
        cpu: RiscvCpu,
        bss,
        console: Some(esp32c3::uart0()),
    };

    unsafe { boot::boot(&board, &ESP32C3, runtime::run) }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    // Straight to the UART: a panic before .bss is zeroed must not touch
    // the logging globals.
    let mut uart = *esp32c3::uart0();
    let _ = writeln!(uart, "\n*** PANIC ***");
    if let Some(loc) = info.location() {
        let _ = writeln!(uart, "at {}:{}:{}", loc.file(), loc.line(), loc.column());
    }

    let _ = writeln!(uart, "{}", info.message());

    cpu::halt(&RiscvCpu)
}
