// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line-oriented console protocol: command set, fixed replies, and the input line accumulator.

pub mod messages;
pub mod parser;

pub use messages::{Command, CommandError, CODE_VERSION};
pub use parser::{LineAccumulator, LINE_CAPACITY};
