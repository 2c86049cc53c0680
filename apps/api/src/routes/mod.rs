pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::enhancement::handlers as enhancement;
use crate::state::AppState;
use crate::storage::handlers as storage;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/ai-enhance", post(enhancement::handle_enhance))
        .route("/save-resume", post(storage::handle_save_resume))
        .route("/resume/:id", get(storage::handle_get_resume))
        .route("/resumes", get(storage::handle_list_resumes))
        .with_state(state)
}

/// CORS for the configured frontend origins. Any method and header is allowed
/// for those origins; credentials require mirroring rather than `*`.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'")))
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
