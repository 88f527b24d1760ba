//! Bring-up library - chip bring-up and timebase for the ESP32-C3.
//!
//! Everything here is written against the [`mmio::Registers`] capability, so
//! the same sequencing code drives real MMIO in the image and the
//! `sim` register model in host tests (or with the `sim` feature). Tests run in a std environment,
//! while the image binary remains no_std.

#![cfg_attr(not(test), no_std)]

pub mod logging;

pub mod boot;
pub mod bss;
pub mod chip;
pub mod clock;
pub mod cpu;
pub mod esp32c3;
pub mod mmio;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod sleep;
pub mod timebase;
pub mod uart;
pub mod watchdog;
