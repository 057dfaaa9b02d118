//! Verdict Data Model
//!
//! The structured verdict returned by the inference service. Every type here
//! validates at the deserialization boundary: an unknown classification label
//! or a score outside 0..=100 fails to parse rather than producing a value
//! that silently carries bad data.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Lower and upper bound (inclusive) on the number of key indicators the
/// service is asked to return.
pub const KEY_INDICATOR_RANGE: std::ops::RangeInclusive<usize> = 3..=4;

/// Three-way authenticity verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Real,
    Fake,
    Uncertain,
}

impl Classification {
    /// All labels, in the order they are offered to the service.
    pub const ALL: [Classification; 3] = [
        Classification::Real,
        Classification::Fake,
        Classification::Uncertain,
    ];

    /// Wire label (`REAL`, `FAKE`, `UNCERTAIN`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Real => "REAL",
            Classification::Fake => "FAKE",
            Classification::Uncertain => "UNCERTAIN",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// An integer score constrained to 0..=100.
///
/// The service reports scores as JSON numbers, so fractional values are
/// accepted and rounded to the nearest integer. Non-finite or out-of-range
/// values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    /// Create a score from an integer, rejecting values above 100.
    pub fn new(value: u8) -> CoreResult<Self> {
        if value > Self::MAX {
            return Err(CoreError::ScoreOutOfRange(f64::from(value)));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || !(0.0..=f64::from(Self::MAX)).contains(&value) {
            return Err(CoreError::ScoreOutOfRange(value));
        }
        Ok(Self(value.round() as u8))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Five independent linguistic indicators. They are not required to sum to
/// anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinguisticFeatures {
    /// Higher is more emotional
    pub emotional_tone: Score,
    /// Higher is more clickbait-like
    pub sensationalism: Score,
    /// Higher is more factual/objective
    pub factuality: Score,
    /// Estimated from writing style
    pub source_credibility: Score,
    /// Higher is more biased
    pub bias_level: Score,
}

impl LinguisticFeatures {
    /// Display label and score pairs, in chart order.
    pub fn labeled(&self) -> [(&'static str, Score); 5] {
        [
            ("Emotional Tone", self.emotional_tone),
            ("Sensationalism", self.sensationalism),
            ("Factuality", self.factuality),
            ("Credibility", self.source_credibility),
            ("Bias Level", self.bias_level),
        ]
    }
}

/// A complete verdict for one piece of submitted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub classification: Classification,
    pub confidence_score: Score,
    /// One or two sentence explanation of the verdict
    pub summary: String,
    pub features: LinguisticFeatures,
    pub key_indicators: Vec<String>,
    /// Simulated technical explanation of the decision boundary
    pub svm_vector_analysis: String,
}

impl AnalysisResult {
    /// Parse and validate a verdict from the service's JSON text.
    ///
    /// Any missing field, wrong type, unknown label, out-of-range score or
    /// empty required text rejects the whole payload.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let result: AnalysisResult = serde_json::from_str(text)?;
        result.validate()?;
        Ok(result)
    }

    /// Check the textual fields that serde cannot constrain on its own.
    pub fn validate(&self) -> CoreResult<()> {
        if self.summary.trim().is_empty() {
            return Err(CoreError::validation("summary is empty"));
        }
        if self.svm_vector_analysis.trim().is_empty() {
            return Err(CoreError::validation("svmVectorAnalysis is empty"));
        }
        if self.key_indicators.is_empty() {
            return Err(CoreError::validation("keyIndicators is empty"));
        }
        if self.key_indicators.iter().any(|k| k.trim().is_empty()) {
            return Err(CoreError::validation("keyIndicators contains an empty entry"));
        }
        Ok(())
    }

    /// Whether the indicator count matches what the service was asked for.
    pub fn has_expected_indicator_count(&self) -> bool {
        KEY_INDICATOR_RANGE.contains(&self.key_indicators.len())
    }
}
