// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line accumulator for the console command protocol.
//!
//! Bytes arrive one at a time from the debug USART. They are echoed, edited (backspace), and
//! collected into a fixed-size buffer until CR or LF completes the line, which is then parsed into
//! a [`Command`].

use crate::monitor::{ByteSink, DisplayMode};
use crate::protocol::messages::*;

/// Default line buffer capacity.
pub const LINE_CAPACITY: usize = 16;

pub struct LineAccumulator<const N: usize = LINE_CAPACITY> {
    buf: [u8; N],
    cursor: usize,
}

impl<const N: usize> LineAccumulator<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            cursor: 0,
        }
    }

    /// Process a single incoming byte. Returns `Some(..)` when a non-empty line was completed; the
    /// buffer is already empty again by then, whatever the parse result.
    pub fn push<W: ByteSink>(
        &mut self,
        byte: u8,
        mode: DisplayMode,
        out: &mut W,
    ) -> Option<Result<Command, CommandError>> {
        if byte == CR || byte == LF {
            if self.cursor == 0 {
                return None;
            }
            let parsed = Command::parse(self.line());
            self.clear();
            return Some(parsed);
        }

        if byte == CTRL_B {
            return None;
        }

        // BS and DEL both erase with the same terminal sequence; nothing to erase, nothing sent.
        if byte == BACKSPACE || byte == DELETE {
            if self.cursor > 0 {
                out.write_str(MSG_RUBOUT);
                self.cursor -= 1;
            }
            return None;
        }
        out.write_byte(byte);

        if self.cursor >= N {
            out.write_str(MSG_TOO_LONG);
            self.clear();
        } else if mode == DisplayMode::Quiet && self.cursor == 0 && !is_command_letter(byte) {
            // Line noise while quiet: never start a line with it.
        } else {
            self.buf[self.cursor] = byte;
            self.cursor += 1;
        }
        None
    }

    /// Bytes stored so far.
    #[inline]
    pub fn line(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn clear(&mut self) {
        self.cursor = 0;
    }
}

impl<const N: usize> Default for LineAccumulator<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::console::fake::FakeConsole;

    fn feed<const N: usize>(
        acc: &mut LineAccumulator<N>,
        bytes: &[u8],
        mode: DisplayMode,
        out: &mut FakeConsole,
    ) -> Vec<Result<Command, CommandError>> {
        bytes
            .iter()
            .filter_map(|&b| acc.push(b, mode, out))
            .collect()
    }

    #[test]
    fn stores_and_echoes() {
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        let mut out = FakeConsole::default();
        assert!(feed(&mut acc, b"noR", DisplayMode::Normal, &mut out).is_empty());
        assert_eq!(acc.line(), b"noR");
        assert_eq!(out.take_output(), "noR");
    }

    #[test]
    fn reconstructs_line_minus_backspaces() {
        let cases: &[(&[u8], &[u8])] = &[
            (b"abc", b"abc"),
            (b"ab\x08c", b"ac"),
            (b"\x08\x08abc", b"abc"),
            (b"abc\x08\x08\x08\x08", b""),
            (b"a\x7Fb", b"b"),
            (b"a\x02b", b"ab"),
            (b"abcdefg\x08h", b"abcdefh"),
        ];
        for (input, expected) in cases {
            let mut acc: LineAccumulator<8> = LineAccumulator::new();
            let mut out = FakeConsole::default();
            feed(&mut acc, input, DisplayMode::Normal, &mut out);
            assert_eq!(acc.line(), *expected, "input {:?}", input);
        }
    }

    #[test]
    fn backspace_echo_is_destructive() {
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        let mut out = FakeConsole::default();
        feed(&mut acc, b"a\x08", DisplayMode::Normal, &mut out);
        assert_eq!(out.take_output(), "a\x08 \x08");

        // Nothing to erase: nothing sent.
        feed(&mut acc, b"\x08\x7F", DisplayMode::Normal, &mut out);
        assert_eq!(out.take_output(), "");
    }

    #[test]
    fn delete_echoes_same_rubout_as_backspace() {
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        let mut out = FakeConsole::default();
        feed(&mut acc, b"ab\x7F", DisplayMode::Normal, &mut out);
        assert_eq!(acc.line(), b"a");
        assert_eq!(out.take_output(), "ab\x08 \x08");
        assert!(!out.output.contains(&DELETE));
    }

    #[test]
    fn ctrl_b_is_silent() {
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        let mut out = FakeConsole::default();
        feed(&mut acc, b"\x02", DisplayMode::Normal, &mut out);
        assert_eq!(acc.cursor(), 0);
        assert!(out.output.is_empty());
    }

    #[test]
    fn terminator_completes_and_clears() {
        for term in [b'\r', b'\n'] {
            let mut acc: LineAccumulator<8> = LineAccumulator::new();
            let mut out = FakeConsole::default();
            let mut input = b"deb".to_vec();
            input.push(term);
            let done = feed(&mut acc, &input, DisplayMode::Normal, &mut out);
            assert_eq!(done, vec![Ok(Command::Debug)]);
            assert_eq!(acc.cursor(), 0);
        }
    }

    #[test]
    fn failed_parse_also_clears() {
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        let mut out = FakeConsole::default();
        let done = feed(&mut acc, b"xyz\r", DisplayMode::Normal, &mut out);
        assert_eq!(done, vec![Err(CommandError::Unknown(b'x'))]);
        assert_eq!(acc.cursor(), 0);
    }

    #[test]
    fn empty_lines_are_ignored() {
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        let mut out = FakeConsole::default();
        let done = feed(&mut acc, b"\r\n\r\nnor\r\n", DisplayMode::Normal, &mut out);
        assert_eq!(done, vec![Ok(Command::Normal)]);
    }

    #[test]
    fn overflow_resets_once_per_offending_byte() {
        let mut acc: LineAccumulator<4> = LineAccumulator::new();
        let mut out = FakeConsole::default();

        feed(&mut acc, b"abcd", DisplayMode::Normal, &mut out);
        assert_eq!(acc.cursor(), 4);
        out.take_output();

        // Fifth byte overflows: message once, buffer empty, byte dropped.
        feed(&mut acc, b"e", DisplayMode::Normal, &mut out);
        assert_eq!(acc.cursor(), 0);
        assert_eq!(out.take_output(), "e\r\nToo Long!");

        // Ten more bytes overflow twice more.
        feed(&mut acc, b"fghijklmno", DisplayMode::Normal, &mut out);
        assert_eq!(out.take_output().matches("Too Long!").count(), 2);
        assert!(acc.cursor() <= 4);
    }

    #[test]
    fn quiet_mode_drops_noise_lines() {
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        let mut out = FakeConsole::default();

        feed(&mut acc, b"x", DisplayMode::Quiet, &mut out);
        assert_eq!(acc.cursor(), 0);

        feed(&mut acc, b"#nor", DisplayMode::Quiet, &mut out);
        assert_eq!(acc.line(), b"nor");

        // Only the first byte is screened.
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        feed(&mut acc, b"dxx", DisplayMode::Quiet, &mut out);
        assert_eq!(acc.line(), b"dxx");
    }

    #[test]
    fn normal_mode_keeps_any_first_byte() {
        let mut acc: LineAccumulator<8> = LineAccumulator::new();
        let mut out = FakeConsole::default();
        feed(&mut acc, b"x", DisplayMode::Debug, &mut out);
        assert_eq!(acc.line(), b"x");
    }
}
