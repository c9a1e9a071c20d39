// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Console command set and the fixed messages the instrument prints.

/// Firmware identification printed by the `V` command.
pub const CODE_VERSION: &str = concat!("Flowmeter v", env!("CARGO_PKG_VERSION"));

// Control bytes
pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const BACKSPACE: u8 = 0x08;
pub const DELETE: u8 = 0x7F;
/// ^B: never echoed, never stored.
pub const CTRL_B: u8 = 0x02;

// Replies
pub const MSG_MODE_DEBUG: &str = "\r\nMode=DEBUG\n";
pub const MSG_MODE_NORMAL: &str = "\r\nMode=NORMAL\n";
pub const MSG_MODE_QUIET: &str = "\r\nMode=QUIET\n";
pub const MSG_ERROR: &str = "\n\rError!";
pub const MSG_TOO_LONG: &str = "\r\nToo Long!";
pub const MSG_LED_ON: &str = "\r\nGreen LED ON";
pub const MSG_LED_OFF: &str = "\r\nGreen LED OFF";
/// Destructive backspace: back up, blank the cell, back up again.
pub const MSG_RUBOUT: &str = "\x08 \x08";

pub const MENU: &[&str] = &[
    "\r\nSelect Mode",
    "\r\n Hit NOR - Normal",
    "\r\n Hit QUI - Quiet",
    "\r\n Hit DEB - Debug",
    "\r\n Hit V - Version#",
    "\r\n Hit L - Toggle Green LED",
    "\r\nSelect:  ",
];

/// Console commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Debug,
    Normal,
    Quiet,
    Version,
    ToggleLed,
}

/// A complete line that is not a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// First letter names no command.
    Unknown(u8),
    /// First letter matched but the keyword did not.
    Malformed(Command),
}

impl Command {
    /// Parse a line. Matching is case-insensitive and only the first three bytes are significant
    /// (`V` and `L` only look at the first).
    pub fn parse(line: &[u8]) -> Result<Command, CommandError> {
        let first = line.first().copied().unwrap_or(0);
        let (cmd, keyword): (Command, &[u8]) = match first.to_ascii_uppercase() {
            b'D' => (Command::Debug, b"DEB"),
            b'N' => (Command::Normal, b"NOR"),
            b'Q' => (Command::Quiet, b"QUI"),
            b'V' => return Ok(Command::Version),
            b'L' => return Ok(Command::ToggleLed),
            _ => return Err(CommandError::Unknown(first)),
        };

        match line.get(..keyword.len()) {
            Some(head) if head.eq_ignore_ascii_case(keyword) => Ok(cmd),
            _ => Err(CommandError::Malformed(cmd)),
        }
    }
}

/// Letters that may start a line while the instrument is QUIET.
#[inline]
pub fn is_command_letter(b: u8) -> bool {
    matches!(b.to_ascii_uppercase(), b'D' | b'N' | b'Q' | b'V' | b'L')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_any_case() {
        assert_eq!(Command::parse(b"DEB"), Ok(Command::Debug));
        assert_eq!(Command::parse(b"deb"), Ok(Command::Debug));
        assert_eq!(Command::parse(b"nOr"), Ok(Command::Normal));
        assert_eq!(Command::parse(b"Qui"), Ok(Command::Quiet));
        assert_eq!(Command::parse(b"v"), Ok(Command::Version));
        assert_eq!(Command::parse(b"L"), Ok(Command::ToggleLed));
    }

    #[test]
    fn only_first_three_bytes_count() {
        assert_eq!(Command::parse(b"DEBUG"), Ok(Command::Debug));
        assert_eq!(Command::parse(b"normal"), Ok(Command::Normal));
        assert_eq!(Command::parse(b"version"), Ok(Command::Version));
        assert_eq!(Command::parse(b"led"), Ok(Command::ToggleLed));
    }

    #[test]
    fn rejects_unknown_and_short() {
        assert_eq!(Command::parse(b"XYZ"), Err(CommandError::Unknown(b'X')));
        assert_eq!(
            Command::parse(b"DE"),
            Err(CommandError::Malformed(Command::Debug))
        );
        assert_eq!(
            Command::parse(b"NOX"),
            Err(CommandError::Malformed(Command::Normal))
        );
    }

    #[test]
    fn command_letters() {
        for b in b"DNQVLdnqvl" {
            assert!(is_command_letter(*b));
        }
        assert!(!is_command_letter(b'x'));
        assert!(!is_command_letter(b'1'));
    }
}
