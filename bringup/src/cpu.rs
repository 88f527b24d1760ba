//! Hart control: wait-for-interrupt and the terminal halt.

/// The one instruction the halt loop needs from the hart.
pub trait Cpu {
    fn wait_for_interrupt(&self);
}

/// The running RISC-V hart.
#[derive(Clone, Copy, Debug, Default)]
pub struct RiscvCpu;

impl Cpu for RiscvCpu {
    #[inline(always)]
    #[allow(unused_unsafe)]
    fn wait_for_interrupt(&self) {
        unsafe { riscv::asm::wfi() }
    }
}

/// Park the hart for good.
///
/// No interrupts are enabled at this layer, so `wfi` idles the core at low
/// power. Only an external reset gets out of here.
pub fn halt<C: Cpu + ?Sized>(cpu: &C) -> ! {
    loop {
        cpu.wait_for_interrupt();
    }
}
