//! Session Commands
//!
//! Front-end operations on the analysis session: editing the input,
//! submitting it, loading samples and browsing history.

use veritas_core::HistoryItem;

use crate::models::response::CommandResponse;
use crate::models::session::{SessionView, SubmitOutcome};
use crate::services::analysis::SampleKind;
use crate::services::session::InFlightGuard;
use crate::state::AppState;
use crate::utils::error::AppError;

/// Current session snapshot
pub async fn get_session_view(state: &AppState) -> CommandResponse<SessionView> {
    CommandResponse::ok(state.session().snapshot().await)
}

/// Replace the input text
pub async fn set_input(state: &AppState, text: String) -> CommandResponse<SessionView> {
    state.session().set_input(text).await;
    get_session_view(state).await
}

/// Append one line to the input text
pub async fn append_input(state: &AppState, line: &str) -> CommandResponse<SessionView> {
    state.session().append_input(line).await;
    get_session_view(state).await
}

/// Run the analysis on the current input.
///
/// Failed and rejected submissions still return the view, which carries the
/// error message. Only a concurrent submission is reported as an error.
pub async fn submit_analysis(state: &AppState) -> CommandResponse<SessionView> {
    let outcome = state.session().submit().await;
    outcome_view(state, outcome).await
}

/// Same as `submit_analysis`, with the in-flight slot already taken.
pub async fn submit_reserved_analysis(
    state: &AppState,
    slot: InFlightGuard,
) -> CommandResponse<SessionView> {
    let outcome = state.session().submit_reserved(slot).await;
    outcome_view(state, outcome).await
}

async fn outcome_view(state: &AppState, outcome: SubmitOutcome) -> CommandResponse<SessionView> {
    match outcome {
        SubmitOutcome::Busy => CommandResponse::err(AppError::Busy.to_string()),
        _ => get_session_view(state).await,
    }
}

pub async fn load_sample(state: &AppState, kind: SampleKind) -> CommandResponse<SessionView> {
    state.session().load_sample(kind).await;
    get_session_view(state).await
}

pub async fn clear_session(state: &AppState) -> CommandResponse<SessionView> {
    state.session().clear().await;
    get_session_view(state).await
}

pub async fn list_history(state: &AppState) -> CommandResponse<Vec<HistoryItem>> {
    CommandResponse::ok(state.session().history().await)
}

/// Bring a history entry back into view.
///
/// `key` is either a 1-based position in the newest-first list or an entry id.
pub async fn show_history_entry(state: &AppState, key: &str) -> CommandResponse<HistoryItem> {
    let key = key.trim();
    let session = state.session();
    let len = session.history().await.len();
    let result = match key.parse::<usize>() {
        Ok(position) if (1..=len).contains(&position) => session.restore_nth(position - 1).await,
        _ => session.restore(key).await,
    };
    result.into()
}
