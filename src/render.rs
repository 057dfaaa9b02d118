//! Terminal Rendering
//!
//! Plain-text versions of the result panel, the history panel and the input
//! area. Functions return strings so they can be tested without a terminal.

use chrono::{Local, TimeZone};
use veritas_core::{AnalysisResult, Classification, HistoryItem, Score};

use crate::models::session::SessionView;

const BAR_WIDTH: usize = 20;

pub const HELP: &str = "\
Type or paste article text; each line is appended to the input.
  :analyze          run the analysis on the current input
  :sample real|fake load a sample article
  :input            show the current input
  :clear            clear input, result and error
  :history          list recent analyses
  :show <n|id>      bring a history entry back into view
  :check            verify the API key against the service
  :config           show the active configuration
  :set <key> <value> save a setting (model, base_url, api_key_env,
                    history_limit, temperature, proxy); 'none' clears
  :help             show this help
  :quit             exit
Start a line with '::' to enter text that begins with ':'.";

/// Horizontal bar for a 0-100 score.
pub fn score_bar(score: Score) -> String {
    let filled = (usize::from(score.value()) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Short badge for the history panel.
pub fn badge(classification: Classification) -> String {
    format!("[{}]", classification)
}

/// Local wall-clock time for an epoch-millisecond timestamp.
pub fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str("== Analysis Complete ==\n");
    out.push_str(&format!(
        "{}  (confidence: {}%)   model: NLP-SVM-V2\n\n",
        result.classification, result.confidence_score
    ));
    out.push_str(&result.summary);
    out.push_str("\n\nLinguistic Feature Vector\n");
    for (label, score) in result.features.labeled() {
        out.push_str(&format!("  {:<15} {} {:>3}\n", label, score_bar(score), score));
    }
    out.push_str("\nKey Indicators\n");
    for indicator in &result.key_indicators {
        out.push_str(&format!("  * {}\n", indicator));
    }
    out.push_str("\nSYSTEM_LOG > VECTOR_ANALYSIS\n  ");
    out.push_str(&result.svm_vector_analysis);
    out.push('\n');
    out
}

pub fn render_history(history: &[HistoryItem]) -> String {
    if history.is_empty() {
        return "Recent Analysis\n  No history yet.\n".to_string();
    }
    let mut out = String::from("Recent Analysis\n");
    for (idx, item) in history.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {:<12} {}  {}\n     {}\n",
            idx + 1,
            badge(item.result.classification),
            format_time(item.timestamp),
            item.id,
            item.excerpt.replace('\n', " ")
        ));
    }
    out
}

/// Input area plus whatever the session currently shows below it.
pub fn render_view(view: &SessionView) -> String {
    let mut out = String::new();
    if view.input_text.is_empty() {
        out.push_str("(input is empty)\n");
    } else {
        out.push_str(&format!(
            "Input ({} chars):\n{}\n",
            view.input_text.chars().count(),
            view.input_text
        ));
    }
    if let Some(error) = &view.error {
        out.push_str(&format!("\n! {}\n", error));
    } else if let Some(result) = &view.result {
        out.push('\n');
        out.push_str(&render_result(result));
    } else if view.is_analyzing {
        out.push_str("\nRunning SVM Classification...\n");
    } else {
        out.push_str("\nReady to analyze. Paste text above to begin.\n");
    }
    out
}
