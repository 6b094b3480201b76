//! Orchestration controller. Owns the document, the profile and the busy flag,
//! and sequences user actions into gateway calls.
//!
//! Flow for a template pick:
//!   raw template shown (TemplateLoaded) → fill in flight (AutoFilling, busy) →
//!   filled content adopted (Filled) → classify runs in the background.
//!
//! The session lock is never held across a gateway await. Each gateway-bound
//! action takes a ticket from a per-controller sequence; a reply whose ticket is
//! no longer current is dropped without touching any state.
//!
//! Gateway calls run on their own task. A caller that goes away (a dropped HTTP
//! request) only detaches from it; the reply still lands and clears the busy flag.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info};

use crate::editor::canvas::{Canvas, FormatCommand, Selection, Zoom};
use crate::export::Export;
use crate::gateway::analysis::AnalysisResult;
use crate::gateway::normalize::plain_text;
use crate::gateway::{Gateway, RECONSTRUCT_MIME_TYPES};
use crate::models::profile::{Profile, ProfileField};
use crate::templates;

/// Shown before any template is picked.
pub const INITIAL_CONTENT: &str = r#"<div style="font-family: sans-serif; color: #9ca3af; text-align: center; margin-top: 100px;">
<p style="font-size: 24px; margin-bottom: 10px;">Welcome to LetterFlow</p>
<p>Select a template from the gallery to get started.</p>
</div>"#;

/// Plain text must be longer than this before it is sent for analysis.
pub const MIN_ANALYSIS_CHARS: usize = 50;

pub const EMPTY_NOTES_MESSAGE: &str =
    "Please add some notes in 'Smart Context' so I know what to write about!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentPhase {
    Empty,
    TemplateLoaded,
    AutoFilling,
    Filled,
    DraftGenerating,
    DraftGenerated,
    Reconstructing,
    Reconstructed,
    UserEdited,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("{}", EMPTY_NOTES_MESSAGE)]
    EmptyNotes,

    #[error("Unsupported document type '{0}'")]
    UnsupportedDocument(String),

    #[error("Uploaded document is empty")]
    EmptyDocument,

    #[error("gateway task failed: {0}")]
    Task(#[from] JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

/// Point-in-time view of the session, as the toolbar and sidebar see it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub content: String,
    pub live: String,
    pub phase: DocumentPhase,
    pub busy: bool,
    pub analysis: Option<AnalysisResult>,
    pub zoom_percent: u16,
    pub selection: Option<Selection>,
    pub placeholders_remaining: usize,
}

/// Result of a gateway-bound action. `analysis` is the background classify task,
/// if one was started; dropping the handle detaches it.
#[derive(Debug)]
pub struct ActionOutcome {
    pub snapshot: SessionSnapshot,
    pub analysis: Option<JoinHandle<()>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket(u64);

struct Session {
    profile: Profile,
    content: String,
    phase: DocumentPhase,
    busy: bool,
    analysis: Option<AnalysisResult>,
    canvas: Canvas,
    sequence: u64,
}

impl Session {
    fn new() -> Self {
        Self {
            profile: Profile::default(),
            content: INITIAL_CONTENT.to_string(),
            phase: DocumentPhase::Empty,
            busy: false,
            analysis: None,
            canvas: Canvas::new(INITIAL_CONTENT),
            sequence: 0,
        }
    }

    /// Replaces the authoritative content for an external reason and reconciles the canvas.
    fn replace_content(&mut self, content: String, phase: DocumentPhase) {
        self.content = content;
        self.phase = phase;
        self.reconcile();
    }

    fn reconcile(&mut self) -> bool {
        self.canvas.sync_from(&self.content)
    }

    fn begin(&mut self, phase: DocumentPhase) -> Ticket {
        self.sequence += 1;
        self.busy = true;
        self.phase = phase;
        Ticket(self.sequence)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.sequence
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            content: self.content.clone(),
            live: self.canvas.live().to_string(),
            phase: self.phase,
            busy: self.busy,
            analysis: self.analysis.clone(),
            zoom_percent: self.canvas.zoom().percent(),
            selection: self.canvas.selection(),
            placeholders_remaining: templates::placeholders(&self.content).len(),
        }
    }
}

pub struct Controller {
    gateway: Gateway,
    session: Mutex<Session>,
}

impl Controller {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            session: Mutex::new(Session::new()),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Gateway-bound actions
    // ────────────────────────────────────────────────────────────────────────

    /// Shows the raw template immediately, then fills it from the profile and analyzes the result.
    pub async fn select_template(
        self: &Arc<Self>,
        template_id: &str,
    ) -> Result<ActionOutcome, ControllerError> {
        let template = templates::find(template_id)
            .ok_or_else(|| ControllerError::UnknownTemplate(template_id.to_string()))?;

        let (ticket, profile) = {
            let mut session = self.session.lock().await;
            session.replace_content(template.body.to_string(), DocumentPhase::TemplateLoaded);
            let ticket = session.begin(DocumentPhase::AutoFilling);
            (ticket, session.profile.clone())
        };
        info!("Template {} loaded, auto-filling (ticket {})", template.id, ticket.0);

        let gateway = self.gateway.clone();
        self.run_to_completion(ticket, DocumentPhase::Filled, true, async move {
            gateway.fill_placeholders(template.body, &profile).await
        })
        .await
    }

    /// Fills whatever is currently in the document. No analysis follows.
    pub async fn auto_fill(self: &Arc<Self>) -> Result<ActionOutcome, ControllerError> {
        let (ticket, html, profile) = {
            let mut session = self.session.lock().await;
            let ticket = session.begin(DocumentPhase::AutoFilling);
            (ticket, session.content.clone(), session.profile.clone())
        };
        info!("Auto-filling current document (ticket {})", ticket.0);

        let gateway = self.gateway.clone();
        self.run_to_completion(ticket, DocumentPhase::Filled, false, async move {
            gateway.fill_placeholders(&html, &profile).await
        })
        .await
    }

    /// Drafts a new letter from the notes field. Refused locally when the notes are empty.
    pub async fn generate(self: &Arc<Self>) -> Result<ActionOutcome, ControllerError> {
        let (ticket, profile) = {
            let mut session = self.session.lock().await;
            if session.profile.notes_are_empty() {
                return Err(ControllerError::EmptyNotes);
            }
            let ticket = session.begin(DocumentPhase::DraftGenerating);
            (ticket, session.profile.clone())
        };
        info!("Generating draft from notes (ticket {})", ticket.0);

        let gateway = self.gateway.clone();
        self.run_to_completion(ticket, DocumentPhase::DraftGenerated, true, async move {
            gateway.generate_draft(&profile.custom_notes, &profile).await
        })
        .await
    }

    /// Rebuilds an uploaded document as editable HTML, filled from the profile.
    pub async fn reconstruct(
        self: &Arc<Self>,
        document: Bytes,
        mime_type: &str,
    ) -> Result<ActionOutcome, ControllerError> {
        if !RECONSTRUCT_MIME_TYPES.contains(&mime_type) {
            return Err(ControllerError::UnsupportedDocument(mime_type.to_string()));
        }
        if document.is_empty() {
            return Err(ControllerError::EmptyDocument);
        }

        let (ticket, profile) = {
            let mut session = self.session.lock().await;
            let ticket = session.begin(DocumentPhase::Reconstructing);
            (ticket, session.profile.clone())
        };
        info!(
            "Reconstructing uploaded {} ({} bytes, ticket {})",
            mime_type,
            document.len(),
            ticket.0
        );

        let gateway = self.gateway.clone();
        let mime_type = mime_type.to_string();
        self.run_to_completion(ticket, DocumentPhase::Reconstructed, true, async move {
            gateway
                .reconstruct_from_image(document, &mime_type, &profile)
                .await
        })
        .await
    }

    /// Spawns `call` and its completion together, then waits for both.
    async fn run_to_completion<F>(
        self: &Arc<Self>,
        ticket: Ticket,
        phase: DocumentPhase,
        analyze: bool,
        call: F,
    ) -> Result<ActionOutcome, ControllerError>
    where
        F: Future<Output = String> + Send + 'static,
    {
        let controller = Arc::clone(self);
        let task = tokio::spawn(async move {
            let content = call.await;
            controller.complete(ticket, content, phase, analyze).await
        });

        match task.await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!("Gateway task for ticket {} failed: {e}", ticket.0);
                let mut session = self.session.lock().await;
                if session.is_current(ticket) {
                    session.busy = false;
                }
                Err(e.into())
            }
        }
    }

    async fn complete(
        self: &Arc<Self>,
        ticket: Ticket,
        content: String,
        phase: DocumentPhase,
        analyze: bool,
    ) -> ActionOutcome {
        let mut session = self.session.lock().await;
        if !session.is_current(ticket) {
            info!(
                "Discarding stale gateway response (ticket {}, current {})",
                ticket.0, session.sequence
            );
            return ActionOutcome {
                snapshot: session.snapshot(),
                analysis: None,
            };
        }

        session.replace_content(content, phase);
        session.busy = false;
        let snapshot = session.snapshot();
        drop(session);

        let analysis = if analyze {
            let text = plain_text(&snapshot.content);
            if text.chars().count() > MIN_ANALYSIS_CHARS {
                Some(self.spawn_analysis(ticket, text))
            } else {
                debug!("Skipping analysis: plain text too short");
                None
            }
        } else {
            None
        };

        ActionOutcome { snapshot, analysis }
    }

    fn spawn_analysis(self: &Arc<Self>, ticket: Ticket, text: String) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let result = controller.gateway.classify(&text).await;
            let mut session = controller.session.lock().await;
            if session.is_current(ticket) {
                session.analysis = Some(result);
            } else {
                debug!("Discarding stale analysis (ticket {})", ticket.0);
            }
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Local actions
    // ────────────────────────────────────────────────────────────────────────

    /// Adopts markup typed into the canvas as the new document content.
    /// An edit made while a gateway call is in flight supersedes that call.
    pub async fn user_edit(&self, markup: String) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        if session.busy {
            session.sequence += 1;
            session.busy = false;
            info!("User edit supersedes in-flight request");
        }
        let adopted = session.canvas.user_input(markup);
        session.content = adopted;
        session.phase = DocumentPhase::UserEdited;
        session.reconcile();
        session.snapshot()
    }

    pub async fn select(&self, start: usize, end: usize) -> Selection {
        self.session.lock().await.canvas.select(start, end)
    }

    /// Applies a formatting command to the live canvas only.
    pub async fn format(&self, command: FormatCommand) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        if !session.canvas.apply_format(command) {
            debug!("Format {:?} ignored: nothing selected", command);
        }
        session.snapshot()
    }

    pub async fn zoom(&self, direction: ZoomDirection) -> Zoom {
        let mut session = self.session.lock().await;
        let zoom = session.canvas.zoom_mut();
        match direction {
            ZoomDirection::In => zoom.zoom_in(),
            ZoomDirection::Out => zoom.zoom_out(),
        };
        *zoom
    }

    pub async fn profile(&self) -> Profile {
        self.session.lock().await.profile.clone()
    }

    pub async fn set_profile_field(&self, field: ProfileField, value: String) -> Profile {
        let mut session = self.session.lock().await;
        session.profile.set(field, value);
        debug!(
            "Profile field {:?} updated ({} chars)",
            field,
            session.profile.get(field).chars().count()
        );
        session.profile.clone()
    }

    pub async fn reset_profile(&self) -> Profile {
        let mut session = self.session.lock().await;
        session.profile.reset();
        session.profile.clone()
    }

    pub async fn export(&self) -> Export {
        Export::download(&self.session.lock().await.content)
    }

    pub async fn print_view(&self) -> String {
        crate::export::render_print(&self.session.lock().await.content)
    }
}
