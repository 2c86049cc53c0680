use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` extractor whose rejections become `AppError::Validation` (HTTP 400)
/// instead of axum's default 415/422 plain-text responses.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
