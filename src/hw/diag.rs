// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Core register and memory dump appended to DEBUG reports.
//!
//! Each dump prints the sixteen core registers as seen at the call site, side by side with
//! sixteen words read from a memory window. The window cursor advances across calls and wraps,
//! so successive reports walk the whole window.

use core::arch::asm;
use core::ptr;

use crate::monitor::{ByteSink, Diagnostics};

/// Start of internal flash on the STM32F7.
pub const FLASH_BASE: u32 = 0x0800_0000;

/// Bytes of flash walked by the default dump.
pub const DEFAULT_SPAN: u32 = 0x6000;

const REGISTER_COUNT: usize = 16;

macro_rules! read_reg {
    ($name:literal) => {{
        let value: u32;
        // SAFETY: a register-to-register move with no memory or stack access.
        unsafe {
            asm!(
                concat!("mov {}, ", $name),
                out(reg) value,
                options(nomem, nostack, preserves_flags)
            );
        }
        value
    }};
}

/// Snapshot r0..r12, sp, lr, pc.
///
/// Values of the scratch registers are whatever the compiler left there; they are only useful
/// as a rough picture of the call site.
#[inline(always)]
fn core_registers() -> [u32; REGISTER_COUNT] {
    [
        read_reg!("r0"),
        read_reg!("r1"),
        read_reg!("r2"),
        read_reg!("r3"),
        read_reg!("r4"),
        read_reg!("r5"),
        read_reg!("r6"),
        read_reg!("r7"),
        read_reg!("r8"),
        read_reg!("r9"),
        read_reg!("r10"),
        read_reg!("r11"),
        read_reg!("r12"),
        read_reg!("sp"),
        read_reg!("lr"),
        read_reg!("pc"),
    ]
}

/// Walks a word-aligned memory window, sixteen words per dump.
pub struct RegisterDump {
    base: u32,
    span: u32,
    cursor: u32,
}

impl RegisterDump {
    /// `base` must be word-aligned and `base..base + span` must be readable.
    pub const fn new(base: u32, span: u32) -> Self {
        Self {
            base,
            span,
            cursor: base,
        }
    }

    fn next_word(&mut self) -> (u32, u32) {
        let addr = self.cursor;
        // SAFETY: `addr` stays inside the readable window given to `new`.
        let value = unsafe { ptr::read_volatile(addr as *const u32) };
        self.cursor = if addr + 4 < self.base + self.span {
            addr + 4
        } else {
            self.base
        };
        (addr, value)
    }
}

impl Default for RegisterDump {
    fn default() -> Self {
        Self::new(FLASH_BASE, DEFAULT_SPAN)
    }
}

impl Diagnostics for RegisterDump {
    fn dump<W: ByteSink>(&mut self, out: &mut W) {
        let regs = core_registers();

        out.write_str("\r\n\r\nRegister contents:\t|\tADDRESS:\tDATA:");
        for (i, reg) in regs.iter().enumerate() {
            let (addr, value) = self.next_word();

            out.write_str("\r\nr");
            out.write_u32(i as u32);
            out.write_str("\t0x");
            out.write_hex_u32(*reg);
            out.write_str("\t|\t0x");
            out.write_hex_u32(addr);
            out.write_str("\t0x");
            out.write_hex_u32(value);
        }
    }
}
