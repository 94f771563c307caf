use std::fmt;

use crate::error::CommandError;

/// Result of dispatching one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Text to append to the log display.
    Text(String),
    /// The shell should clear its log display.
    ClearLog,
    /// The system was shut down by `exit`/`quit`; the shell should close
    /// after showing the farewell text.
    Exit(String),
}

impl Response {
    /// Text to show, if any (`ClearLog` has none).
    pub fn text(&self) -> Option<&str> {
        match self {
            Response::Text(t) | Response::Exit(t) => Some(t.as_str()),
            Response::ClearLog => None,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Response::ClearLog)
    }
}

impl From<CommandError> for Response {
    fn from(err: CommandError) -> Self {
        Response::Text(err.to_string())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text().unwrap_or(""))
    }
}
