// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Abstraction Layer
//!
//! Board-level wrappers over `stm32f7xx-hal` that implement the crate's console, LED, LCD, and
//! diagnostics traits. Only built for bare-metal targets.

pub mod adc;
#[cfg(feature = "reg-dump")]
pub mod diag;
pub mod led;
pub mod pins;
pub mod spi;
pub mod usart;

pub use adc::Adc;
#[cfg(feature = "reg-dump")]
pub use diag::RegisterDump;
pub use led::Led;
pub use pins::BoardPins;
pub use spi::{ChipSelect, Lcd, SpiBus};
pub use usart::Usart;
