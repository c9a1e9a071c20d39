// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial Peripheral Interface (SPI) abstraction layer.
//!
//! - `SpiBus` wraps a configured HAL SPI instance with 8-bit words.
//! - `ChipSelect` is an active-low GPIO output wrapper for manual CS control.
//! - `Lcd` pushes text frames to the character LCD, one CS-framed transaction per frame.

use stm32f7xx_hal::{
    gpio::{self, Output, PinState, PushPull},
    prelude::*,
    spi::{self, Enabled, Spi},
};

use crate::monitor::DisplaySink;

/// Wrapper around an enabled HAL SPI instance (8-bit words).
pub struct SpiBus<I, P> {
    spi: Spi<I, P, Enabled<u8>>,
}

impl<I, P> SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    pub fn new(spi: Spi<I, P, Enabled<u8>>) -> Self {
        Self { spi }
    }

    /// Perform a blocking, full-duplex transfer of one byte.
    pub fn transfer_byte(&mut self, byte: u8) -> Result<u8, spi::Error> {
        let mut tmp = [byte];
        self.spi.transfer(&mut tmp)?;
        Ok(tmp[0])
    }

    /// Send bytes, ignoring the response.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), spi::Error> {
        for &b in bytes {
            self.transfer_byte(b)?;
        }
        Ok(())
    }
}

/// Manual chip-select line, active-low, generic over any GPIO pin.
pub struct ChipSelect<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> ChipSelect<P, N> {
    /// Create an active-low chip select and set to the inactive state (i.e., high).
    pub fn active_low<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(PinState::High);
        Self { pin }
    }

    /// Assert the chip select.
    #[inline]
    pub fn select(&mut self) {
        self.pin.set_low();
    }

    /// Deassert the chip select.
    #[inline]
    pub fn deselect(&mut self) {
        self.pin.set_high();
    }
}

/// Character LCD on a dedicated SPI bus.
pub struct Lcd<I, P, const CS_P: char, const CS_N: u8> {
    bus: SpiBus<I, P>,
    cs: ChipSelect<CS_P, CS_N>,
}

impl<I, P, const CS_P: char, const CS_N: u8> Lcd<I, P, CS_P, CS_N>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    pub fn new(bus: SpiBus<I, P>, cs: ChipSelect<CS_P, CS_N>) -> Self {
        Self { bus, cs }
    }
}

impl<I, P, const CS_P: char, const CS_N: u8> DisplaySink for Lcd<I, P, CS_P, CS_N>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    fn send_frame(&mut self, frame: &[u8]) {
        // A dropped frame is redrawn on the next tick.
        self.cs.select();
        let _ = self.bus.write(frame);
        self.cs.deselect();
    }
}
