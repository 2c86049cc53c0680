//! Axum route handlers for saving and fetching resumes.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::resume::{Resume, StoredResume};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SaveResumeResponse {
    pub success: bool,
    pub message: String,
    pub resume_id: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeDetailResponse {
    pub success: bool,
    pub resume: StoredResume,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub success: bool,
    pub ids: Vec<String>,
    pub count: usize,
}

/// POST /save-resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    AppJson(resume): AppJson<Resume>,
) -> Result<Json<SaveResumeResponse>, AppError> {
    let stored = state.store.save(resume).await?;

    Ok(Json(SaveResumeResponse {
        success: true,
        message: "Resume saved successfully".to_string(),
        resume_id: stored.id,
    }))
}

/// GET /resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<ResumeDetailResponse>, AppError> {
    let resume = state.store.get(&resume_id)?;
    Ok(Json(ResumeDetailResponse {
        success: true,
        resume,
    }))
}

/// GET /resumes
pub async fn handle_list_resumes(State(state): State<AppState>) -> Json<ResumeListResponse> {
    let ids = state.store.list();
    let count = ids.len();
    Json(ResumeListResponse {
        success: true,
        ids,
        count,
    })
}
