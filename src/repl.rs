//! Terminal Front-End
//!
//! Line-oriented loop over stdin. Text lines build up the input; ':' lines
//! are commands. Analyses run on a background task so the loop keeps
//! accepting input (and rejecting a second `:analyze`) while one is in flight.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::commands::{self, Command};
use crate::models::response::CommandResponse;
use crate::render;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub const BANNER: &str = "VERITAS // Fake News Detection Engine (NLP-SVM-V2)\nType :help for commands.";

/// What the loop should do with a command's outcome.
pub enum Reply {
    Output(String),
    /// Analysis running in the background; resolves to its rendered output
    Pending(JoinHandle<String>),
    Quit,
}

fn render_response<T>(response: CommandResponse<T>, render: impl FnOnce(&T) -> String) -> String {
    match (response.data, response.error) {
        (Some(data), _) => render(&data),
        (None, error) => format!(
            "! {}\n",
            error.unwrap_or_else(|| "unknown error".to_string())
        ),
    }
}

pub async fn dispatch(state: &Arc<AppState>, command: Command) -> Reply {
    let output = match command {
        Command::Text(line) => {
            commands::append_input(state, &line).await;
            String::new()
        }
        Command::Analyze => {
            let Some(slot) = state.session().try_reserve() else {
                return Reply::Output(format!("! {}\n", AppError::Busy));
            };
            let state = Arc::clone(state);
            return Reply::Pending(tokio::spawn(async move {
                let response = commands::submit_reserved_analysis(&state, slot).await;
                render_response(response, render::render_view)
            }));
        }
        Command::Sample(kind) => {
            render_response(commands::load_sample(state, kind).await, render::render_view)
        }
        Command::Input => {
            render_response(commands::get_session_view(state).await, render::render_view)
        }
        Command::Clear => render_response(commands::clear_session(state).await, |_| {
            "Cleared. History kept.\n".to_string()
        }),
        Command::History => render_response(commands::list_history(state).await, |items| {
            render::render_history(items)
        }),
        Command::Show(key) => {
            render_response(commands::show_history_entry(state, &key).await, |item| {
                format!(
                    "Restored {} from {}\n{}",
                    item.id,
                    render::format_time(item.timestamp),
                    render::render_result(&item.result)
                )
            })
        }
        Command::Check => render_response(commands::get_health(state).await, |health| {
            let mut out = format!(
                "status: {}\nmodel: {}\napi key: {}\nreachable: {}\n",
                health.status,
                health.model,
                if health.api_key_configured { "present" } else { "missing" },
                health.service_reachable
            );
            if let Some(detail) = &health.detail {
                out.push_str(&format!("detail: {}\n", detail));
            }
            out
        }),
        Command::Config => render_response(commands::get_settings(state), |settings| {
            match serde_json::to_string_pretty(settings) {
                Ok(json) => format!("{}\n", json),
                Err(e) => format!("! {}\n", e),
            }
        }),
        Command::Set(key, value) => render_response(
            commands::update_settings(state, &key, &value).await,
            |_| {
                format!(
                    "Saved {} to {}. Restart veritas to apply.\n",
                    key,
                    state.config_path().display()
                )
            },
        ),
        Command::Help => format!("{}\n", render::HELP),
        Command::Quit => return Reply::Quit,
    };
    Reply::Output(output)
}

fn emit(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// Read lines until EOF or `:quit`. On EOF, pending analyses are awaited so
/// piped input still gets its results.
pub async fn run<R>(state: Arc<AppState>, reader: R) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
{
    emit(&format!("{}\n", BANNER));
    let mut lines = reader.lines();
    let mut printers: Vec<JoinHandle<()>> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                emit(&format!("! {}\n", e));
                continue;
            }
        };
        debug!(?command, "dispatching");

        match dispatch(&state, command).await {
            Reply::Output(text) => {
                if !text.is_empty() {
                    emit(&text);
                }
            }
            Reply::Pending(handle) => {
                emit("Running SVM Classification...\n");
                printers.retain(|p| !p.is_finished());
                printers.push(tokio::spawn(async move {
                    match handle.await {
                        Ok(text) => emit(&text),
                        Err(e) => error!(error = %e, "analysis task failed"),
                    }
                }));
            }
            Reply::Quit => {
                for printer in printers.drain(..) {
                    printer.abort();
                }
                return Ok(());
            }
        }
    }

    for printer in printers {
        if let Err(e) = printer.await {
            error!(error = %e, "output task failed");
        }
    }
    Ok(())
}
