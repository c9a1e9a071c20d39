// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Flowmeter Firmware
//!
//! This crate contains the firmware for a vortex-shedding flow meter, written in Rust, targeting
//! an STM32F777 MCU. A superloop samples the vortex sensor, derives the shedding frequency,
//! computes volumetric flow, and serves a line-oriented debug console with selectable verbosity.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`sensing`] | Sample window, edge/frequency detection, temperature conversion |
//! | [`flow`] | Viscosity/density correlations and the Strouhal/Reynolds flow iteration |
//! | [`protocol`] | Console command set and input line accumulator |
//! | [`monitor`] | Display modes, status reports, LCD frames, timer tick flag |
//! | [`instrument`] | Context struct driven once per superloop pass |
//! | `hw` | MCU-level wrappers around USART, SPI, ADC, GPIO (bare-metal builds only) |
//!
//! Everything except `hw` is `no_std`, allocation-free, and runs under `cargo test` on the host.
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! Then connect a terminal to USART1 at 115200 baud and type `NOR`, `QUI`, `DEB`, `V`, or `L`.
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod flow;
pub mod instrument;
pub mod monitor;
pub mod protocol;
pub mod sensing;

#[cfg(target_os = "none")]
pub mod hw;

pub use instrument::Instrument;
