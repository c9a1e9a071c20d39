// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! Implements the [`Console`] traits on the debug USART: blocking transmit, non-blocking receive.
//! The printing helpers (hex, decimal, packed decimal) come from [`ByteSink`].
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Rx, Serial, Tx},
};

use crate::monitor::{ByteSink, Console};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self { tx, rx }
    }
}

impl<U: Instance> ByteSink for Usart<U> {
    #[inline]
    fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }
}

impl<U: Instance> Console for Usart<U> {
    /// Framing and overrun errors drop the byte; the line editor copes with a missing character.
    fn poll_byte(&mut self) -> Option<u8> {
        self.rx.read().ok()
    }
}
