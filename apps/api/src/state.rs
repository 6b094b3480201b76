use std::sync::Arc;

use crate::editor::controller::Controller;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editing session. All document and profile mutations go through it.
    pub controller: Arc<Controller>,
}
