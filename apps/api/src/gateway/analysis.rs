//! Analysis result: document-type label, sentiment and suggestions.
//!
//! Decoding the model's structured reply is a strict step: it either yields a
//! validated `AnalysisResult` or a `DecodeError`, and the caller branches on it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::{strip_code_fences, ResponseSchema};

pub const SENTIMENT_VALUES: [&str; 4] = ["positive", "neutral", "negative", "warning"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisResult {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub sentiment: Sentiment,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Returned without a model call when the input is too short to analyze.
    pub fn unknown() -> Self {
        Self {
            doc_type: "Unknown".to_string(),
            sentiment: Sentiment::Neutral,
            suggestions: vec![],
        }
    }

    /// Returned when the call or the decode fails.
    pub fn fallback() -> Self {
        Self {
            doc_type: "General Document".to_string(),
            sentiment: Sentiment::Neutral,
            suggestions: vec!["Could not analyze document structure.".to_string()],
        }
    }

    /// The output-shape constraint sent with every classify request.
    pub fn schema() -> ResponseSchema {
        ResponseSchema::object(vec![
            ("type", ResponseSchema::string()),
            ("sentiment", ResponseSchema::string_enum(&SENTIMENT_VALUES)),
            ("suggestions", ResponseSchema::array_of(ResponseSchema::string())),
        ])
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("model reply was empty")]
    Empty,

    #[error("model reply did not match the analysis schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("model reply has a blank document type")]
    BlankType,
}

/// Decodes a raw classify reply into a validated result.
pub fn decode_analysis(raw: &str) -> Result<AnalysisResult, DecodeError> {
    let text = strip_code_fences(raw);
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut result: AnalysisResult = serde_json::from_str(text)?;
    result.doc_type = result.doc_type.trim().to_string();
    if result.doc_type.is_empty() {
        return Err(DecodeError::BlankType);
    }
    Ok(result)
}
