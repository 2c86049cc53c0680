use std::sync::Arc;

use crate::enhancement::Enhancer;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Created once at startup; lives for the whole process.
    pub store: Arc<ResumeStore>,
    /// Pluggable enhancer. Default: TemplateEnhancer.
    pub enhancer: Arc<dyn Enhancer>,
}
