//! Model gateway. Turns editor intents into model requests and normalizes replies.
//!
//! Every public operation returns a plain value. Transport errors, API errors and
//! decode failures are logged here and replaced by the operation's fallback, so
//! nothing the model does can leave the document unassignable.

pub mod analysis;
pub mod normalize;
pub mod prompts;

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::gateway::analysis::{decode_analysis, AnalysisResult, DecodeError};
use crate::gateway::normalize::{html_reply, truncate_chars};
use crate::gateway::prompts::{
    render, CLASSIFY_PROMPT_TEMPLATE, DRAFT_PROMPT_TEMPLATE, FILL_PROMPT_TEMPLATE,
    RECONSTRUCT_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{HTML_ONLY_OUTPUT, NOTES_INSTRUCTION};
use crate::llm_client::{LlmError, ModelBackend, ModelRequest};
use crate::models::profile::Profile;

/// Inputs shorter than this are not worth a model call.
pub const MIN_CLASSIFY_CHARS: usize = 10;
/// Classify never sends more than this many chars of the document.
pub const MAX_CLASSIFY_CHARS: usize = 2000;

pub const DRAFT_ERROR_HTML: &str = "<p>Error generating draft.</p>";
pub const RECONSTRUCT_EMPTY_HTML: &str = "<p>Could not process the document.</p>";
pub const RECONSTRUCT_ERROR_HTML: &str = "<p>Error converting document. Please try again.</p>";

/// Largest document accepted for reconstruction. Base64 inflation keeps the
/// request under the model's 20 MB inline limit.
pub const MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;

/// MIME types accepted for reconstruction.
pub const RECONSTRUCT_MIME_TYPES: &[&str] =
    &["application/pdf", "image/png", "image/jpeg", "image/webp"];

#[derive(Debug, Error)]
enum GatewayError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("model reply was empty after normalization")]
    EmptyReply,
}

#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn ModelBackend>,
}

impl Gateway {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    /// Labels the document type and sentiment and suggests improvements.
    /// Inputs under `MIN_CLASSIFY_CHARS` short-circuit to `AnalysisResult::unknown()`.
    pub async fn classify(&self, text: &str) -> AnalysisResult {
        if text.chars().count() < MIN_CLASSIFY_CHARS {
            debug!("Skipping analysis: input shorter than {MIN_CLASSIFY_CHARS} chars");
            return AnalysisResult::unknown();
        }

        match self.try_classify(text).await {
            Ok(result) => result,
            Err(GatewayError::Decode(e)) => {
                warn!("Analysis reply rejected: {e}");
                AnalysisResult::fallback()
            }
            Err(e) => {
                error!("Error analyzing document: {e}");
                AnalysisResult::fallback()
            }
        }
    }

    /// Substitutes profile data into the template's placeholders.
    /// Falls back to returning `html` unchanged.
    pub async fn fill_placeholders(&self, html: &str, profile: &Profile) -> String {
        match self.try_fill(html, profile).await {
            Ok(filled) => filled,
            Err(e) => {
                error!("Error auto-filling template: {e}");
                html.to_string()
            }
        }
    }

    /// Writes a fresh letter from a free-text instruction.
    /// The caller validates that `instruction` is non-empty.
    pub async fn generate_draft(&self, instruction: &str, profile: &Profile) -> String {
        match self.try_draft(instruction, profile).await {
            Ok(draft) => draft,
            Err(e) => {
                error!("Error generating draft: {e}");
                DRAFT_ERROR_HTML.to_string()
            }
        }
    }

    /// Rebuilds a scanned or PDF document as table-based HTML and fills it from the profile.
    pub async fn reconstruct_from_image(
        &self,
        document: Bytes,
        mime_type: &str,
        profile: &Profile,
    ) -> String {
        match self.try_reconstruct(document, mime_type, profile).await {
            Ok(html) => html,
            Err(GatewayError::EmptyReply) => {
                warn!("Reconstruction returned no content");
                RECONSTRUCT_EMPTY_HTML.to_string()
            }
            Err(e) => {
                error!("Error reconstructing document: {e}");
                RECONSTRUCT_ERROR_HTML.to_string()
            }
        }
    }

    async fn try_classify(&self, text: &str) -> Result<AnalysisResult, GatewayError> {
        let prompt = render(
            CLASSIFY_PROMPT_TEMPLATE,
            &[("document", truncate_chars(text, MAX_CLASSIFY_CHARS))],
        );
        let request = ModelRequest::prompt(prompt).with_schema(AnalysisResult::schema());

        let raw = self.backend.generate(&request).await?;
        let result = decode_analysis(&raw)?;
        info!(
            "Document classified as '{}' ({:?})",
            result.doc_type, result.sentiment
        );
        Ok(result)
    }

    async fn try_fill(&self, html: &str, profile: &Profile) -> Result<String, GatewayError> {
        let profile_json = serde_json::to_string(profile)?;
        let prompt = render(
            FILL_PROMPT_TEMPLATE,
            &[
                ("notes_instruction", NOTES_INSTRUCTION),
                ("html_only", HTML_ONLY_OUTPUT),
                ("profile_json", &profile_json),
                ("template_html", html),
            ],
        );

        let raw = self.backend.generate(&ModelRequest::prompt(prompt)).await?;
        html_reply(&raw).ok_or(GatewayError::EmptyReply)
    }

    async fn try_draft(&self, instruction: &str, profile: &Profile) -> Result<String, GatewayError> {
        let profile_json = serde_json::to_string(profile)?;
        let prompt = render(
            DRAFT_PROMPT_TEMPLATE,
            &[
                ("instruction", instruction),
                ("profile_json", &profile_json),
                ("html_only", HTML_ONLY_OUTPUT),
            ],
        );

        let raw = self.backend.generate(&ModelRequest::prompt(prompt)).await?;
        html_reply(&raw).ok_or(GatewayError::EmptyReply)
    }

    async fn try_reconstruct(
        &self,
        document: Bytes,
        mime_type: &str,
        profile: &Profile,
    ) -> Result<String, GatewayError> {
        let profile_json = serde_json::to_string_pretty(profile)?;
        let prompt = render(
            RECONSTRUCT_PROMPT_TEMPLATE,
            &[
                ("notes_instruction", NOTES_INSTRUCTION),
                ("profile_json", &profile_json),
            ],
        );
        debug!(
            "Reconstructing {} document ({} bytes)",
            mime_type,
            document.len()
        );

        let request = ModelRequest::with_attachment(mime_type, document, prompt);
        let raw = self.backend.generate(&request).await?;
        html_reply(&raw).ok_or(GatewayError::EmptyReply)
    }
}
