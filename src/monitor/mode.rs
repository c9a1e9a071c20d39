// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Display mode state machine.
//!
//! The three persistent modes behave as follows:
//!
//! - `Normal`: periodic status in digit-packed decimal.
//! - `Quiet`: no periodic output; lines starting with line noise are dropped.
//! - `Debug`: periodic status in raw hex, extra quantities, optional register dump.
//!
//! `V` (version) and `L` (LED toggle) are one-shot commands and never change the mode.

use crate::monitor::ByteSink;
use crate::protocol::messages::*;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DisplayMode {
    Quiet,
    #[default]
    Normal,
    Debug,
}

/// Output pin behind the green status LED.
pub trait StatusLed {
    fn set(&mut self, on: bool);
}

/// Owns the active display mode and the LED state.
pub struct DisplayModeController<L: StatusLed> {
    mode: DisplayMode,
    led: L,
    led_on: bool,
}

impl<L: StatusLed> DisplayModeController<L> {
    /// Start in `Normal` mode with the LED on.
    pub fn new(mut led: L) -> Self {
        led.set(true);
        Self {
            mode: DisplayMode::Normal,
            led,
            led_on: true,
        }
    }

    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[inline]
    pub fn led_on(&self) -> bool {
        self.led_on
    }

    /// Print the command menu.
    pub fn show_menu<W: ByteSink>(&self, out: &mut W) {
        for line in MENU {
            out.write_str(line);
        }
    }

    /// Act on a completed line: run the command, or report the error.
    pub fn dispatch<W: ByteSink>(&mut self, line: Result<Command, CommandError>, out: &mut W) {
        match line {
            Ok(cmd) => self.apply(cmd, out),
            Err(_) => out.write_str(MSG_ERROR),
        }
    }

    pub fn apply<W: ByteSink>(&mut self, cmd: Command, out: &mut W) {
        match cmd {
            Command::Debug => {
                self.mode = DisplayMode::Debug;
                out.write_str(MSG_MODE_DEBUG);
            }
            Command::Normal => {
                self.mode = DisplayMode::Normal;
                out.write_str(MSG_MODE_NORMAL);
            }
            Command::Quiet => {
                self.mode = DisplayMode::Quiet;
                out.write_str(MSG_MODE_QUIET);
            }
            Command::Version => {
                out.write_str("\r\n");
                out.write_str(CODE_VERSION);
            }
            Command::ToggleLed => {
                self.led_on = !self.led_on;
                self.led.set(self.led_on);
                out.write_str(if self.led_on { MSG_LED_ON } else { MSG_LED_OFF });
            }
        }
    }

    pub fn free(self) -> L {
        self.led
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::StatusLed;
    use std::vec::Vec;

    /// Records every level written to the pin.
    #[derive(Default)]
    pub struct FakeLed {
        pub writes: Vec<bool>,
    }

    impl StatusLed for FakeLed {
        fn set(&mut self, on: bool) {
            self.writes.push(on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeLed;
    use super::*;
    use crate::monitor::console::fake::FakeConsole;

    fn controller() -> DisplayModeController<FakeLed> {
        DisplayModeController::new(FakeLed::default())
    }

    #[test]
    fn starts_normal_with_led_on() {
        let ctl = controller();
        assert_eq!(ctl.mode(), DisplayMode::Normal);
        assert!(ctl.led_on());
        assert_eq!(ctl.free().writes, vec![true]);
    }

    #[test]
    fn mode_changes_print_in_order() {
        let mut ctl = controller();
        let mut out = FakeConsole::default();
        for line in [&b"NOR"[..], b"DEB", b"QUI"] {
            ctl.dispatch(Command::parse(line), &mut out);
        }
        assert_eq!(
            out.take_output(),
            "\r\nMode=NORMAL\n\r\nMode=DEBUG\n\r\nMode=QUIET\n"
        );
        assert_eq!(ctl.mode(), DisplayMode::Quiet);
    }

    #[test]
    fn unknown_line_is_error_only() {
        let mut ctl = controller();
        let mut out = FakeConsole::default();
        ctl.apply(Command::Debug, &mut out);
        out.take_output();

        ctl.dispatch(Command::parse(b"XYZ"), &mut out);
        assert_eq!(out.take_output(), "\n\rError!");
        assert_eq!(ctl.mode(), DisplayMode::Debug);
    }

    #[test]
    fn version_keeps_mode() {
        let mut ctl = controller();
        let mut out = FakeConsole::default();
        ctl.apply(Command::Quiet, &mut out);
        out.take_output();

        ctl.apply(Command::Version, &mut out);
        assert_eq!(out.take_output(), format!("\r\n{}", CODE_VERSION));
        assert_eq!(ctl.mode(), DisplayMode::Quiet);
    }

    #[test]
    fn led_toggles_once_per_command_in_every_mode() {
        let mut ctl = controller();
        let mut out = FakeConsole::default();

        for mode_cmd in [Command::Normal, Command::Quiet, Command::Debug] {
            ctl.apply(mode_cmd, &mut out);
            let before = ctl.led_on();
            ctl.dispatch(Command::parse(b"l"), &mut out);
            assert_eq!(ctl.led_on(), !before);
            assert_eq!(ctl.mode(), match mode_cmd {
                Command::Normal => DisplayMode::Normal,
                Command::Quiet => DisplayMode::Quiet,
                _ => DisplayMode::Debug,
            });
        }

        // Initial write plus one per toggle, alternating.
        assert_eq!(ctl.free().writes, vec![true, false, true, false]);
    }

    #[test]
    fn led_messages() {
        let mut ctl = controller();
        let mut out = FakeConsole::default();
        ctl.apply(Command::ToggleLed, &mut out);
        assert_eq!(out.take_output(), "\r\nGreen LED OFF");
        ctl.apply(Command::ToggleLed, &mut out);
        assert_eq!(out.take_output(), "\r\nGreen LED ON");
    }

    #[test]
    fn menu_lists_commands() {
        let ctl = controller();
        let mut out = FakeConsole::default();
        ctl.show_menu(&mut out);
        let text = out.take_output();
        for keyword in ["NOR", "QUI", "DEB", "V -", "L -"] {
            assert!(text.contains(keyword), "{keyword} missing");
        }
    }
}
