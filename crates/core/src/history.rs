//! Session History
//!
//! A bounded, newest-first list of past verdicts. Entries are immutable once
//! inserted and the list lives only as long as the session that owns it.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::verdict::AnalysisResult;

/// Default number of entries retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Excerpt length in characters before truncation.
pub const EXCERPT_CHARS: usize = 60;

const ELLIPSIS: &str = "...";

/// Truncate `text` to [`EXCERPT_CHARS`] characters, appending `...` when
/// anything was cut.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// A retained summary of one past analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Time-derived unique identifier
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub excerpt: String,
    pub result: AnalysisResult,
}

/// Newest-first history capped at `limit` entries.
#[derive(Debug, Clone)]
pub struct History {
    items: Vec<HistoryItem>,
    limit: usize,
    last_id: Option<i64>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            limit: DEFAULT_HISTORY_LIMIT,
            last_id: None,
        }
    }
}

impl History {
    /// Create an empty history with the given cap. A cap of zero is rejected.
    pub fn with_limit(limit: usize) -> CoreResult<Self> {
        if limit == 0 {
            return Err(CoreError::config("history limit must be at least 1"));
        }
        Ok(Self {
            limit,
            ..Self::default()
        })
    }

    /// Record a successful analysis at `now_ms`.
    ///
    /// The new entry goes to the front; entries beyond the cap are evicted
    /// from the back and returned.
    pub fn record(
        &mut self,
        now_ms: i64,
        input: &str,
        result: AnalysisResult,
    ) -> (&HistoryItem, Vec<HistoryItem>) {
        // Ids are the timestamp, bumped when two entries share a millisecond.
        let id = match self.last_id {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last_id = Some(id);

        self.items.insert(
            0,
            HistoryItem {
                id: id.to_string(),
                timestamp: now_ms,
                excerpt: excerpt(input),
                result,
            },
        );
        let evicted = if self.items.len() > self.limit {
            self.items.split_off(self.limit)
        } else {
            Vec::new()
        };
        (&self.items[0], evicted)
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Entry at a newest-first position.
    pub fn nth(&self, index: usize) -> Option<&HistoryItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
