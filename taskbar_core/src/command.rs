//! Widget commands and the tokens that encode them on the command channel

use std::fmt;
use std::str::FromStr;

/// One of the three widget actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyCommand {
    ExpandToggle,
    CornerCycle,
    VisibilityToggle,
}

impl HotkeyCommand {
    pub const ALL: [HotkeyCommand; 3] = [
        HotkeyCommand::ExpandToggle,
        HotkeyCommand::CornerCycle,
        HotkeyCommand::VisibilityToggle,
    ];

    /// Command bound to Alt+`digit`
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(HotkeyCommand::ExpandToggle),
            2 => Some(HotkeyCommand::CornerCycle),
            3 => Some(HotkeyCommand::VisibilityToggle),
            _ => None,
        }
    }

    pub fn digit(self) -> u8 {
        match self {
            HotkeyCommand::ExpandToggle => 1,
            HotkeyCommand::CornerCycle => 2,
            HotkeyCommand::VisibilityToggle => 3,
        }
    }

    /// Long-form token written by the key-binding daemon
    pub fn token(self) -> &'static str {
        match self {
            HotkeyCommand::ExpandToggle => "toggle_expansion",
            HotkeyCommand::CornerCycle => "move_corner",
            HotkeyCommand::VisibilityToggle => "toggle_visibility",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HotkeyCommand::ExpandToggle => "Expand",
            HotkeyCommand::CornerCycle => "Move",
            HotkeyCommand::VisibilityToggle => "Hide",
        }
    }
}

impl fmt::Display for HotkeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alt+{} ({})", self.digit(), self.token())
    }
}

/// Where a command came from, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOrigin {
    FocusKeys,
    CommandFile,
    InputStream,
    DebugPanel,
}

/// Connectivity check token written once at startup
pub const PING_TOKEN: &str = "test";

/// Payload of one command-channel write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Command(HotkeyCommand),
    /// Connectivity check, logged only
    Ping,
}

impl FromStr for Token {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token == PING_TOKEN {
            return Ok(Token::Ping);
        }
        HotkeyCommand::ALL
            .into_iter()
            .find(|cmd| token == cmd.token() || token == cmd.digit().to_string())
            .map(Token::Command)
            .ok_or_else(|| format!("unknown command token {:?}", token))
    }
}
