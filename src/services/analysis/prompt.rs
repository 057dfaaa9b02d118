//! Fixed Prompt Material
//!
//! The system instruction, the response schema and the two sample articles.

use serde::{Deserialize, Serialize};
use veritas_core::Classification;
use veritas_llm::ResponseSchema;

use crate::utils::error::AppError;

pub const SYSTEM_INSTRUCTION: &str = r#"
You are an advanced NLP (Natural Language Processing) Fake News Detection System.
Your goal is to simulate a pipeline that uses TF-IDF (Term Frequency-Inverse Document Frequency) vectorization and SVM (Support Vector Machine) classification, augmented by deep linguistic analysis.

Analyze the input text for:
1. Lexical patterns typical of fake news (e.g., hyperbole, excessive punctuation, clickbait vocabulary).
2. Semantic consistency and logical flow.
3. Source credibility markers (citations, quotes, specific details vs. vague generalizations).

Return a JSON response with the following structure:
{
  "classification": "REAL" | "FAKE" | "UNCERTAIN",
  "confidenceScore": number (0-100),
  "summary": "A brief 1-2 sentence explanation of the verdict.",
  "features": {
    "emotionalTone": number (0-100, higher is more emotional),
    "sensationalism": number (0-100, higher is more clickbaity),
    "factuality": number (0-100, higher is more factual/objective),
    "sourceCredibility": number (0-100, estimated based on writing style),
    "biasLevel": number (0-100, higher is more biased)
  },
  "keyIndicators": ["List", "of", "3-4", "short", "reasons"],
  "svmVectorAnalysis": "A short technical sentence explaining which vector features (words/phrases) pushed the decision boundary (e.g. 'High frequency of polarizing adjectives and lack of verifying sources pushed the vector into the Fake class hyperplane.')."
}
"#;

pub const SAMPLE_REAL_NEWS: &str = "Scientists have discovered a new species of orchid in the cloud forests of Colombia. The flower, named \"Telipogon diabolicus\" for its devil-like appearance, is critically endangered due to its limited habitat. The discovery was published in the journal PhytoKeys by researchers from the University of Gdansk.";

pub const SAMPLE_FAKE_NEWS: &str = "BREAKING: Secret documents reveal that the moon landing was staged by Hollywood actors in a Nevada desert basement! NASA insiders confirm that the entire Apollo mission was a hoax designed to bankrupt the Soviet Union. \"We never left orbit,\" admits a whistleblower in a shocking new video that the mainstream media refuses to show you! Share this before it gets deleted!";

const FEATURE_FIELDS: [&str; 5] = [
    "emotionalTone",
    "sensationalism",
    "factuality",
    "sourceCredibility",
    "biasLevel",
];

/// Schema the service's JSON answer must follow.
pub fn response_schema() -> ResponseSchema {
    let labels: Vec<&str> = Classification::ALL.iter().map(|c| c.as_str()).collect();

    let features = ResponseSchema::object(
        None,
        FEATURE_FIELDS
            .iter()
            .map(|name| (*name, ResponseSchema::number(Some("0-100"))))
            .collect(),
        &FEATURE_FIELDS,
    );

    ResponseSchema::object(
        None,
        vec![
            ("classification", ResponseSchema::string_enum(None, &labels)),
            ("confidenceScore", ResponseSchema::number(Some("0-100"))),
            ("summary", ResponseSchema::string(None)),
            ("features", features),
            (
                "keyIndicators",
                ResponseSchema::array(None, ResponseSchema::string(None)),
            ),
            ("svmVectorAnalysis", ResponseSchema::string(None)),
        ],
        &[
            "classification",
            "confidenceScore",
            "summary",
            "features",
            "keyIndicators",
            "svmVectorAnalysis",
        ],
    )
}

/// Which built-in sample article to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    Real,
    Fake,
}

impl SampleKind {
    pub fn text(self) -> &'static str {
        match self {
            SampleKind::Real => SAMPLE_REAL_NEWS,
            SampleKind::Fake => SAMPLE_FAKE_NEWS,
        }
    }
}

impl std::str::FromStr for SampleKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" => Ok(SampleKind::Real),
            "fake" => Ok(SampleKind::Fake),
            other => Err(AppError::validation(format!(
                "Unknown sample '{}', expected 'real' or 'fake'",
                other
            ))),
        }
    }
}
