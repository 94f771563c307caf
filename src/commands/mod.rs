//! # Command interpreter.
//!
//! - [`Command`] - parsed command line (grammar and argument rules)
//! - [`Response`] - tagged result: text, clear-log, or exit
//! - `CommandProcessor` - history, `require_running` gate and execution against a
//!   [`Manager`](crate::Manager); reached through [`Manager::dispatch`](crate::Manager::dispatch)

mod command;
mod processor;
mod reports;
mod response;

pub use command::{Command, Report};
pub(crate) use processor::CommandProcessor;
pub use response::Response;
