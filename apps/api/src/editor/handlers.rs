//! Axum route handlers for the editor session.
//!
//! These stand in for the gallery, sidebar and toolbar: each one forwards to a
//! controller method and returns the resulting session state.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::editor::canvas::{FormatCommand, Selection};
use crate::editor::controller::{SessionSnapshot, ZoomDirection};
use crate::errors::{AppError, AppJson};
use crate::gateway::MAX_UPLOAD_BYTES;
use crate::models::profile::{Profile, ProfileField};
use crate::state::AppState;
use crate::templates::{self, TemplateSummary};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub field: ProfileField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub command: FormatCommand,
}

#[derive(Debug, Deserialize)]
pub struct ZoomRequest {
    pub direction: ZoomDirection,
}

#[derive(Debug, Serialize)]
pub struct ZoomResponse {
    pub zoom_percent: u16,
    pub scale: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(templates::catalog())
}

/// POST /api/v1/templates/:id/select
///
/// Loads the template, auto-fills it and starts background analysis.
/// Returns once the fill has landed; poll the session for the analysis.
pub async fn handle_select_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let outcome = state.controller.select_template(&template_id).await?;
    Ok(Json(outcome.snapshot))
}

// ────────────────────────────────────────────────────────────────────────────
// Session + profile
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.snapshot().await)
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<Profile> {
    Json(state.controller.profile().await)
}

/// PATCH /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AppJson(update): AppJson<ProfileUpdate>,
) -> Json<Profile> {
    Json(
        state
            .controller
            .set_profile_field(update.field, update.value)
            .await,
    )
}

/// DELETE /api/v1/profile
pub async fn handle_reset_profile(State(state): State<AppState>) -> Json<Profile> {
    Json(state.controller.reset_profile().await)
}

// ────────────────────────────────────────────────────────────────────────────
// Document actions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/document/autofill
pub async fn handle_auto_fill(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let outcome = state.controller.auto_fill().await?;
    Ok(Json(outcome.snapshot))
}

/// POST /api/v1/document/generate
///
/// Refused with 400 when the notes field is empty; no model call is made.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let outcome = state.controller.generate().await?;
    Ok(Json(outcome.snapshot))
}

/// POST /api/v1/document/reconstruct
///
/// Multipart upload with a single `file` field (PDF or image).
pub async fn handle_reconstruct(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SessionSnapshot>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Invalid multipart body", e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| upload_error("Failed to read upload", e))?;
        info!("Received {} upload ({} bytes)", mime_type, data.len());

        let outcome = state.controller.reconstruct(data, &mime_type).await?;
        return Ok(Json(outcome.snapshot));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

fn upload_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Uploads are limited to {} MB",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ))
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// POST /api/v1/document/input
///
/// Serialized canvas markup after a user edit.
pub async fn handle_user_input(
    State(state): State<AppState>,
    AppJson(request): AppJson<InputRequest>,
) -> Json<SessionSnapshot> {
    Json(state.controller.user_edit(request.html).await)
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/canvas/select
pub async fn handle_select(
    State(state): State<AppState>,
    AppJson(selection): AppJson<Selection>,
) -> Json<Selection> {
    Json(
        state
            .controller
            .select(selection.start, selection.end)
            .await,
    )
}

/// POST /api/v1/canvas/format
pub async fn handle_format(
    State(state): State<AppState>,
    AppJson(request): AppJson<FormatRequest>,
) -> Json<SessionSnapshot> {
    Json(state.controller.format(request.command).await)
}

/// POST /api/v1/canvas/zoom
pub async fn handle_zoom(
    State(state): State<AppState>,
    AppJson(request): AppJson<ZoomRequest>,
) -> Json<ZoomResponse> {
    let zoom = state.controller.zoom(request.direction).await;
    Json(ZoomResponse {
        zoom_percent: zoom.percent(),
        scale: zoom.scale(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Export
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/export/download
pub async fn handle_download(State(state): State<AppState>) -> Result<Response, AppError> {
    let export = state.controller.export().await;
    let disposition = HeaderValue::from_str(&export.content_disposition())
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(export.mime_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.html,
    )
        .into_response())
}

/// GET /api/v1/export/print
pub async fn handle_print(State(state): State<AppState>) -> Html<String> {
    Html(state.controller.print_view().await)
}
