//! # CommandProcessor: one line in, one [`Response`] out.
//!
//! ```text
//! dispatch(raw)
//!   ├─► history.push(raw)                 (always, before interpretation)
//!   ├─► publish CommandDispatched
//!   ├─► Command::parse(raw, argument_case) ── Err ──► Response::Text(error)
//!   ├─► require_running gate              ── Err ──► "OS is not running."
//!   └─► execute(command)                  ── Err ──► Response::Text(error)
//! ```
//!
//! Every failure is a plain response; nothing here aborts the dispatch loop.

use tracing::debug;

use crate::commands::command::Command;
use crate::commands::reports;
use crate::commands::response::Response;
use crate::config::Config;
use crate::core::{CommandHistory, Manager, ManagerStatus};
use crate::error::CommandError;
use crate::events::{Event, EventKind};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) struct CommandProcessor {
    history: CommandHistory,
    cfg: Config,
}

impl CommandProcessor {
    pub(crate) fn new(cfg: &Config) -> Self {
        Self {
            history: CommandHistory::new(cfg.history_limit()),
            cfg: cfg.clone(),
        }
    }

    pub(crate) fn history(&self, n: usize) -> Vec<String> {
        self.history.last(n)
    }

    pub(crate) async fn dispatch(&self, mgr: &Manager, raw: &str) -> Response {
        self.history.push(raw);
        mgr.publish(Event::new(EventKind::CommandDispatched).with_reason(raw));

        let result = match Command::parse(raw, self.cfg.argument_case) {
            Ok(cmd) => self.gated(mgr, cmd).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(resp) => resp,
            Err(e) => {
                debug!(command = raw, label = e.as_label(), "command rejected");
                e.into()
            }
        }
    }

    async fn gated(&self, mgr: &Manager, cmd: Command) -> Result<Response, CommandError> {
        if self.cfg.require_running
            && cmd.requires_running()
            && mgr.status() != ManagerStatus::Running
        {
            return Err(CommandError::NotRunning);
        }
        self.execute(mgr, cmd).await
    }

    async fn execute(&self, mgr: &Manager, cmd: Command) -> Result<Response, CommandError> {
        let text = match cmd {
            Command::Status => format!("OS Status: {}", mgr.status().capitalized()),
            Command::Uptime => {
                let uptime = mgr.uptime().ok_or(CommandError::NotRunning)?;
                format!("Uptime: {:.2} seconds", uptime.as_secs_f64())
            }
            Command::Services => {
                let running = mgr.running_services();
                if running.is_empty() {
                    "Running services: None".to_string()
                } else {
                    format!("Running services: {}", running.join(", "))
                }
            }
            Command::Echo(text) => text,
            Command::Date => chrono::Local::now().format(DATE_FORMAT).to_string(),
            Command::Clear => return Ok(Response::ClearLog),
            Command::Help => reports::help(&self.cfg.name, &self.cfg.version),
            Command::Report(kind) => reports::report(kind).to_string(),
            Command::Log => self.history.last(self.cfg.history_window).join("\n"),
            Command::AddTask(name) => {
                let id = mgr.tasks().add(&name).await;
                format!("Task {id} added: {name}")
            }
            Command::KillTask(id) => {
                let info = mgr.tasks().kill(id).await?;
                format!("Task {id} ({}) terminated.", info.name)
            }
            Command::PrioritizeTask { id, priority } => {
                let info = mgr.tasks().prioritize(id, &priority).await?;
                format!("Task {id} ({}) priority set to {}.", info.name, info.priority)
            }
            Command::ListTasks => mgr.tasks().render().await,
            Command::RunTask { duration, name } => {
                let id = mgr.run_background_task(&name, duration).await;
                format!(
                    "Task {id} running in background: {name} ({:.2} seconds)",
                    duration.as_secs_f64()
                )
            }
            Command::Exit => {
                mgr.shutdown_quietly().await;
                return Ok(Response::Exit("Goodbye!".to_string()));
            }
        };
        Ok(Response::Text(text))
    }
}
