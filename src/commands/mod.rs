//! Command Handlers
//!
//! Front-end operations, each returning a `CommandResponse`, plus the parser
//! for the line-oriented terminal input.

pub mod health;
pub mod session;
pub mod settings;

pub use health::get_health;
pub use session::{
    append_input, clear_session, get_session_view, list_history, load_sample, set_input,
    show_history_entry, submit_analysis, submit_reserved_analysis,
};
pub use settings::{get_settings, update_settings};

use crate::services::analysis::SampleKind;
use crate::utils::error::{AppError, AppResult};

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, appended to the input
    Text(String),
    Analyze,
    Sample(SampleKind),
    Input,
    Clear,
    History,
    Show(String),
    Check,
    Config,
    /// Persist one setting: key, value
    Set(String, String),
    Help,
    Quit,
}

impl Command {
    /// Parse a line. Lines starting with ':' are commands; '::' escapes a
    /// literal leading colon.
    pub fn parse(line: &str) -> AppResult<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(rest) = line.strip_prefix("::") {
            return Ok(Command::Text(format!(":{}", rest)));
        }
        let Some(body) = line.strip_prefix(':') else {
            return Ok(Command::Text(line.to_string()));
        };

        let mut parts = body.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match (name.as_str(), arg) {
            ("analyze" | "a", None) => Ok(Command::Analyze),
            ("sample", Some(kind)) => Ok(Command::Sample(kind.parse()?)),
            ("sample", None) => Err(AppError::validation("usage: :sample real|fake")),
            ("input", None) => Ok(Command::Input),
            ("clear", None) => Ok(Command::Clear),
            ("history", None) => Ok(Command::History),
            ("show", Some(key)) => Ok(Command::Show(key.to_string())),
            ("show", None) => Err(AppError::validation("usage: :show <n|id>")),
            ("check", None) => Ok(Command::Check),
            ("config", None) => Ok(Command::Config),
            ("set", Some(arg)) => match arg.split_once(char::is_whitespace) {
                Some((key, value)) => Ok(Command::Set(key.to_string(), value.trim().to_string())),
                None => Err(AppError::validation("usage: :set <key> <value>")),
            },
            ("set", None) => Err(AppError::validation("usage: :set <key> <value>")),
            ("help" | "h" | "?", None) => Ok(Command::Help),
            ("quit" | "q" | "exit", None) => Ok(Command::Quit),
            (_, Some(_)) if is_known(&name) => Err(AppError::validation(format!(
                ":{} takes no argument",
                name
            ))),
            _ => Err(AppError::validation(format!(
                "Unknown command ':{}'. Type :help for a list.",
                name
            ))),
        }
    }
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "analyze" | "a" | "input" | "clear" | "history" | "check" | "config" | "help" | "h"
            | "?" | "quit" | "q" | "exit"
    )
}
