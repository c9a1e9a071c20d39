// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-level console traits.
//!
//! `ByteSink` carries the printing helpers used by every report: ASCII strings, fixed-width hex
//! words, and digit-packed decimals. `Console` adds the non-blocking receive side of the debug
//! USART. On hardware both are implemented by `hw::Usart`; tests use in-memory fakes.
//!
//! Note: all messages carry their own `\r\n` so the terminal does not need CR translation.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Anything the firmware can write bytes to (serial port, LCD frame buffer).
pub trait ByteSink {
    fn write_byte(&mut self, b: u8);

    fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Low nibble as a single hex digit.
    #[inline]
    fn write_nibble(&mut self, n: u8) {
        self.write_byte(HEX[(n & 0xF) as usize]);
    }

    /// All eight hex digits of a word, no prefix.
    fn write_hex_u32(&mut self, n: u32) {
        for shift in (0..=28).rev().step_by(4) {
            self.write_nibble((n >> shift) as u8);
        }
    }

    /// Print a digit-packed value (see [`crate::monitor::pack_decimal`]) as a decimal number with
    /// `decimals` fractional digits, e.g. `0x1282` with 2 decimals prints `12.82`.
    ///
    /// Leading zero nibbles are skipped, but at least one integer digit is always printed.
    fn write_packed_decimal(&mut self, packed: u32, decimals: u8) {
        let decimals = decimals.min(7) as usize;
        let mut first = 7usize;
        while first > decimals && (packed >> (first * 4)) & 0xF == 0 {
            first -= 1;
        }
        for pos in (0..=first).rev() {
            if pos + 1 == decimals {
                self.write_byte(b'.');
            }
            self.write_nibble((packed >> (pos * 4)) as u8);
        }
    }

    /// Plain unsigned decimal.
    fn write_u32(&mut self, mut n: u32) {
        let mut buf = [0u8; 10];
        let mut i = buf.len();
        if n == 0 {
            self.write_byte(b'0');
            return;
        }
        while n > 0 {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
        }
        for &b in &buf[i..] {
            self.write_byte(b);
        }
    }
}

/// Debug terminal: a [`ByteSink`] that can also be polled for received bytes.
pub trait Console: ByteSink {
    /// Next received byte, or `None` if nothing is pending. Never blocks.
    fn poll_byte(&mut self) -> Option<u8>;
}
