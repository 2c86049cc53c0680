//! Axum route handlers for the Enhancement API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub section: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub success: bool,
    pub enhanced_content: String,
}

/// POST /ai-enhance
///
/// Returns a templated rewrite of `content` for the given section.
pub async fn handle_enhance(
    State(state): State<AppState>,
    AppJson(request): AppJson<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let enhanced_content = state
        .enhancer
        .enhance(&request.section, &request.content)
        .await?;

    Ok(Json(EnhanceResponse {
        success: true,
        enhanced_content,
    }))
}
