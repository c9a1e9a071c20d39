// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Console Monitor
//!
//! Everything the operator sees: the serial console, display modes, periodic status reports, and
//! the LCD.
//!
//! ## Modules
//!
//! - [`console`] - `ByteSink`/`Console` traits with hex and decimal printers.
//! - [`mode`] - Display mode state machine and status LED ownership.
//! - [`report`] - Periodic status report and the `pack_decimal` display helper.
//! - [`tick`] - Ready flag shared with the timer interrupt.
//! - [`lcd`] - SPI LCD text frames.

pub mod console;
pub mod lcd;
pub mod mode;
pub mod report;
pub mod tick;

pub use console::{ByteSink, Console};
pub use lcd::DisplaySink;
pub use mode::{DisplayMode, DisplayModeController, StatusLed};
pub use report::{pack_decimal, Diagnostics, NoDiagnostics, StatusReporter};
pub use tick::DisplayTick;
