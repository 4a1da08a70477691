use std::sync::Arc;

use crate::chat::script::Script;
use crate::config::Config;
use crate::store::RecordStore;
use crate::upload::storage::ResumeStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record store backend. Default: `SqliteStore` over the process-wide pool.
    pub store: Arc<dyn RecordStore>,
    /// Wizard script, built once at startup from the seeded vendors.
    pub script: Arc<Script>,
    /// On-disk directory holding uploaded résumés.
    pub resumes: ResumeStorage,
    pub config: Config,
}
