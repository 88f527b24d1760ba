use core::arch::global_asm;

// The ROM bootloader jumps here with .text/.data loaded, but no stack of ours
// and .bss holding garbage. Zeroing .bss is left to Rust, after the watchdogs
// and clocks are dealt with.
global_asm!(
    r#"
    .section .text.entry
    .globl _start
_start:
    /* Interrupts stay off for the whole bring-up */
    csrci mstatus, 0x8

    .option push
    .option norelax
    la   gp, __global_pointer$
    .option pop

    la   sp, _stack_top
    andi sp, sp, -16

    /* Jump to Rust */
    call rust_start

    /* rust_start never returns */
1:  wfi
    j    1b
"#
);
