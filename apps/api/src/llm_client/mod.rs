/// LLM Client: the single point of entry for all Gemini API calls in LetterFlow.
///
/// ARCHITECTURAL RULE: No other module may call the model endpoint directly.
/// Prompts are built by the gateway; this module only moves them over the wire.
///
/// Model: gemini-2.5-flash (hardcoded)
///
/// There is no retry loop and no explicit timeout here. A failed call is terminal
/// for that invocation; the user re-triggers the action.
use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
/// The model used for all LLM calls in LetterFlow.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Request model
// ────────────────────────────────────────────────────────────────────────────

/// One piece of request content. Binary attachments travel inline, base64-encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: Bytes },
}

/// Output-shape constraint imposed on the model reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    String,
    Array,
}

impl ResponseSchema {
    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: None,
            items: None,
            enum_values: None,
            required: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    pub fn string_enum(values: &[&str]) -> Self {
        Self {
            enum_values: Some(values.iter().map(|v| v.to_string()).collect()),
            ..Self::leaf(SchemaType::String)
        }
    }

    pub fn array_of(items: ResponseSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// Object whose fields are all required.
    pub fn object(fields: Vec<(&str, ResponseSchema)>) -> Self {
        let required = fields.iter().map(|(name, _)| name.to_string()).collect();
        let properties = fields
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect();
        Self {
            properties: Some(properties),
            required,
            ..Self::leaf(SchemaType::Object)
        }
    }
}

/// A single generateContent call: ordered content parts plus an optional schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub parts: Vec<Part>,
    pub response_schema: Option<ResponseSchema>,
}

impl ModelRequest {
    /// Plain prompt string, free-text reply.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(text.into())],
            response_schema: None,
        }
    }

    /// Binary attachment followed by the instruction text.
    pub fn with_attachment(mime_type: &str, data: Bytes, text: impl Into<String>) -> Self {
        Self {
            parts: vec![
                Part::InlineData {
                    mime_type: mime_type.to_string(),
                    data,
                },
                Part::Text(text.into()),
            ],
            response_schema: None,
        }
    }

    /// Requests a JSON reply matching `schema`.
    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Concatenated text parts. Inline data is skipped.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_wire(&self) -> GenerateContentRequest<'_> {
        let parts = self
            .parts
            .iter()
            .map(|p| match p {
                Part::Text(text) => WirePart::Text { text },
                Part::InlineData { mime_type, data } => WirePart::InlineData {
                    inline_data: WireBlob {
                        mime_type,
                        data: base64::engine::general_purpose::STANDARD.encode(data),
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![WireContent { role: "user", parts }],
            generation_config: self.response_schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire format (Gemini REST)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    role: &'a str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: WireBlob<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireBlob<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a ResponseSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate. `None` when there is no text at all.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait + Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// The transport seam. The gateway holds an `Arc<dyn ModelBackend>` so tests
/// can script replies without a network.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Sends `request` and returns the raw reply text.
    async fn generate(&self, request: &ModelRequest) -> Result<String, LlmError>;
}

/// The single LLM client used by the gateway. Wraps the Gemini generateContent API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: generate_content_url(api_base),
        }
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    pub async fn call(&self, request: &ModelRequest) -> Result<GenerateContentResponse, LlmError> {
        debug!(
            "Calling {} with {} parts ({} prompt chars)",
            MODEL,
            request.parts.len(),
            request.text().chars().count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request.to_wire())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}", status);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl ModelBackend for LlmClient {
    async fn generate(&self, request: &ModelRequest) -> Result<String, LlmError> {
        self.call(request).await?.text().ok_or(LlmError::EmptyContent)
    }
}

fn generate_content_url(api_base: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        api_base.trim_end_matches('/'),
        MODEL
    )
}

/// Pulls `error.message` out of a Gemini error body, else returns the body as-is.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips a leading ```html / ```json / ``` marker and a trailing ``` from model output.
/// Either end is stripped independently of the other.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    for marker in ["```html", "```json", "```"] {
        if let Some(stripped) = text.strip_prefix(marker) {
            text = stripped;
            break;
        }
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_code_fences_with_html_tag() {
        let input = "```html\n<p>Hello</p>\n```";
        assert_eq!(strip_code_fences(input), "<p>Hello</p>");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_trailing_only() {
        assert_eq!(strip_code_fences("<p>Hi</p>\n```"), "<p>Hi</p>");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        assert_eq!(strip_code_fences("  <p>Hi</p>  "), "<p>Hi</p>");
    }

    #[test]
    fn test_plain_prompt_serializes_without_generation_config() {
        let request = ModelRequest::prompt("Say hi");
        let body = serde_json::to_value(request.to_wire()).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "Say hi"}]}]})
        );
    }

    #[test]
    fn test_attachment_is_base64_inline_data_before_text() {
        let request =
            ModelRequest::with_attachment("application/pdf", Bytes::from_static(b"%PDF"), "Rebuild");
        let body = serde_json::to_value(request.to_wire()).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(parts[0]["inlineData"]["data"], "JVBERg==");
        assert_eq!(parts[1]["text"], "Rebuild");
    }

    #[test]
    fn test_request_text_skips_inline_data() {
        let request =
            ModelRequest::with_attachment("image/png", Bytes::from_static(b"\x89PNG"), "Rebuild");
        assert_eq!(request.text(), "Rebuild");
        assert_eq!(ModelRequest::prompt("Summarize").text(), "Summarize");
    }

    #[test]
    fn test_schema_serializes_as_gemini_object_schema() {
        let schema = ResponseSchema::object(vec![
            ("type", ResponseSchema::string()),
            ("sentiment", ResponseSchema::string_enum(&["positive", "neutral"])),
            ("suggestions", ResponseSchema::array_of(ResponseSchema::string())),
        ]);
        let request = ModelRequest::prompt("Analyze").with_schema(schema);
        let body = serde_json::to_value(request.to_wire()).unwrap();
        let config = &body["generationConfig"];

        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            config["responseSchema"]["properties"]["sentiment"]["enum"],
            json!(["positive", "neutral"])
        );
        assert_eq!(
            config["responseSchema"]["properties"]["suggestions"]["items"]["type"],
            "STRING"
        );
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["type", "sentiment", "suggestions"])
        );
    }

    #[test]
    fn test_response_text_joins_first_candidate_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "<p>Hello "}, {"text": "world</p>"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("<p>Hello world</p>"));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_api_error_message_extracts_gemini_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body.to_string()), "API key not valid");
        assert_eq!(api_error_message("gateway timeout".to_string()), "gateway timeout");
    }

    #[test]
    fn test_generate_content_url_trims_trailing_slash() {
        assert_eq!(
            generate_content_url("http://localhost:9000/"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
