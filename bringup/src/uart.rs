use core::fmt;

use crate::chip::UartRegs;
use crate::logging::ByteSink;
use crate::mmio::Registers;

/// Transmit side of a UART, already configured by the boot ROM.
#[derive(Clone, Copy)]
pub struct Uart<'c, R> {
    regs: R,
    layout: &'c UartRegs,
}

impl<'c, R: Registers> Uart<'c, R> {
    pub const fn new(regs: R, layout: &'c UartRegs) -> Self {
        Uart { regs, layout }
    }

    #[inline(always)]
    fn tx_fifo_count(&self) -> u32 {
        let l = self.layout;
        (self.regs.read(l.status) >> l.txfifo_cnt_shift) & l.txfifo_cnt_mask
    }

    #[inline(always)]
    pub fn write_byte(&self, byte: u8) {
        // Wait for room in the TX FIFO
        while self.tx_fifo_count() >= self.layout.txfifo_depth {
            core::hint::spin_loop();
        }
        self.regs.write(self.layout.fifo, byte as u32);
    }
}

impl<R: Registers> ByteSink for Uart<'_, R> {
    fn write_byte(&self, byte: u8) {
        Uart::write_byte(self, byte)
    }
}

impl<R: Registers> fmt::Write for Uart<'_, R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            match b {
                b'\n' => {
                    self.write_byte(b'\r');
                    self.write_byte(b'\n');
                }
                byte => self.write_byte(byte),
            }
        }
        Ok(())
    }
}
