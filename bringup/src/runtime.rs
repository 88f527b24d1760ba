// bringup/src/runtime.rs
//! Stand-in for the higher runtime that takes over after bring-up.
//!
//! Uses only what this layer hands over: the timebase, the sleep primitive
//! and the console. Never returns.

use core::time::Duration;

use bringup_lib::esp32c3::{self, ESP32C3};
use bringup_lib::kinfo;

const HEARTBEAT: Duration = Duration::from_secs(1);

pub fn run() {
    let tb = esp32c3::timebase();

    kinfo!(
        "{} up: cpu {} MHz, tick {:?}, timebase at {:?}",
        ESP32C3.name,
        ESP32C3.cpu_hz / 1_000_000,
        tb.resolution(),
        tb.uptime()
    );

    let mut beats: u64 = 0;
    loop {
        tb.spin_for(HEARTBEAT);
        beats += 1;
        kinfo!("heartbeat {} at {} ms", beats, tb.uptime().as_millis());
    }
}
