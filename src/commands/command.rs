//! # Command grammar.
//!
//! A line is split into a keyword and the rest. The keyword is matched
//! case-insensitively; the rest is passed on verbatim unless the configured
//! [`ArgumentCase`] lowercases the whole line first.
//!
//! ```text
//! "ECHO Hello World"  ──► keyword "echo", rest "Hello World"
//!                           Preserve  → Echo("Hello World")
//!                           Lowercase → Echo("hello world")
//! ```
//!
//! Commands without arguments must be given alone (`status now` is unknown).

use std::time::Duration;

use crate::config::ArgumentCase;
use crate::error::CommandError;

/// Canned system reports (placeholder data, not live metrics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Memory,
    Cpu,
    Disk,
    Network,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Status,
    Uptime,
    Services,
    Echo(String),
    Date,
    Clear,
    Help,
    Report(Report),
    Log,
    AddTask(String),
    KillTask(u64),
    PrioritizeTask { id: u64, priority: String },
    ListTasks,
    /// Registers a background task that completes after `duration`.
    RunTask { duration: Duration, name: String },
    Exit,
}

impl Command {
    /// Parses one line.
    ///
    /// # Example
    /// ```
    /// use fastboot::{ArgumentCase, Command};
    ///
    /// let cmd = Command::parse("Kill_Task 3", ArgumentCase::Preserve).unwrap();
    /// assert_eq!(cmd, Command::KillTask(3));
    /// ```
    pub fn parse(raw: &str, case: ArgumentCase) -> Result<Command, CommandError> {
        let input = raw.trim();
        let line = match case {
            ArgumentCase::Preserve => input.to_string(),
            ArgumentCase::Lowercase => input.to_lowercase(),
        };
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((kw, rest)) => (kw.to_lowercase(), rest.trim_start()),
            None => (line.to_lowercase(), ""),
        };
        let unknown = || CommandError::Unknown(input.to_string());

        let bare = |cmd: Command| {
            if rest.is_empty() {
                Ok(cmd)
            } else {
                Err(unknown())
            }
        };

        match keyword.as_str() {
            "status" => bare(Command::Status),
            "uptime" => bare(Command::Uptime),
            "services" => bare(Command::Services),
            "date" => bare(Command::Date),
            "clear" => bare(Command::Clear),
            "help" => bare(Command::Help),
            "log" => bare(Command::Log),
            "list_tasks" => bare(Command::ListTasks),
            "exit" | "quit" => bare(Command::Exit),
            "memory" => bare(Command::Report(Report::Memory)),
            "cpu" => bare(Command::Report(Report::Cpu)),
            "disk" => bare(Command::Report(Report::Disk)),
            "network" => bare(Command::Report(Report::Network)),
            "echo" => Ok(Command::Echo(rest.to_string())),
            "add_task" => {
                if rest.is_empty() {
                    Err(CommandError::Usage("add_task <name>"))
                } else {
                    Ok(Command::AddTask(rest.to_string()))
                }
            }
            "kill_task" => {
                rest.parse::<u64>()
                    .map(Command::KillTask)
                    .map_err(|_| CommandError::InvalidTaskId)
            }
            "prioritize_task" => parse_prioritize(rest),
            "run_task" => parse_run_task(rest),
            _ => Err(unknown()),
        }
    }

    /// Whether the command is refused when `require_running` is set and the
    /// system is not running.
    pub fn requires_running(&self) -> bool {
        !matches!(
            self,
            Command::Status | Command::Clear | Command::Help | Command::Log | Command::Exit
        )
    }
}

fn parse_prioritize(rest: &str) -> Result<Command, CommandError> {
    const USAGE: CommandError = CommandError::Usage("prioritize_task <id> <priority>");

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let [id, priority] = tokens.as_slice() else {
        return Err(USAGE);
    };
    let id = id.parse::<u64>().map_err(|_| USAGE)?;
    Ok(Command::PrioritizeTask {
        id,
        priority: priority.to_string(),
    })
}

fn parse_run_task(rest: &str) -> Result<Command, CommandError> {
    const USAGE: CommandError = CommandError::Usage("run_task <seconds> <name>");

    let (secs, name) = rest.split_once(char::is_whitespace).ok_or(USAGE)?;
    let name = name.trim();
    let duration = secs
        .parse::<f64>()
        .ok()
        .and_then(|s| Duration::try_from_secs_f64(s).ok())
        .ok_or(USAGE)?;
    if name.is_empty() {
        return Err(USAGE);
    }
    Ok(Command::RunTask {
        duration,
        name: name.to_string(),
    })
}
