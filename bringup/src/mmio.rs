// bringup/src/mmio.rs
//! Register access capability.
//!
//! Every hardware block the bring-up code touches is reached through
//! [`Registers`]: a 32-bit `read(offset)` / `write(offset, value)` pair relative
//! to the block's base. [`Mmio`] binds that to physical addresses; the
//! simulator in `crate::sim` binds it to an in-memory register file.

use core::ptr;

/// Word-wide access to one register block.
///
/// Writes take `&self`: MMIO has no Rust-visible state to borrow mutably,
/// and the simulator uses interior mutability.
pub trait Registers {
    fn read(&self, offset: usize) -> u32;
    fn write(&self, offset: usize, value: u32);
}

impl<R: Registers + ?Sized> Registers for &R {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    #[inline(always)]
    fn write(&self, offset: usize, value: u32) {
        (**self).write(offset, value)
    }
}

/// A memory-mapped register block at a fixed physical base.
#[derive(Clone, Copy, Debug)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// # Safety
    /// `base` must be the address of a real register block, and every offset
    /// later passed to `read`/`write` must be a valid 32-bit register in it.
    pub const unsafe fn new(base: usize) -> Self {
        Mmio { base }
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    #[inline(always)]
    fn reg(&self, offset: usize) -> *mut u32 {
        (self.base + offset) as *mut u32
    }
}

impl Registers for Mmio {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        unsafe { ptr::read_volatile(self.reg(offset)) }
    }

    #[inline(always)]
    fn write(&self, offset: usize, value: u32) {
        unsafe { ptr::write_volatile(self.reg(offset), value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mmio_reads_and_writes_backing_words() {
        let mut words = [0u32; 4];
        let regs = unsafe { Mmio::new(words.as_mut_ptr() as usize) };

        regs.write(0x4, 0xDEAD_BEEF);
        regs.write(0xC, 7);

        assert_eq!(regs.read(0x0), 0);
        assert_eq!(regs.read(0x4), 0xDEAD_BEEF);
        assert_eq!(regs.read(0xC), 7);
        assert_eq!(words, [0, 0xDEAD_BEEF, 0, 7]);
    }

    #[test]
    fn test_reference_forwards_to_block() {
        let mut words = [0u32; 2];
        let regs = unsafe { Mmio::new(words.as_mut_ptr() as usize) };
        let by_ref: &dyn Registers = &regs;

        by_ref.write(0x4, 42);
        assert_eq!((&regs).read(0x4), 42);
        assert_eq!(words[1], 42);
    }
}
