/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthError / RepoError / validation error を統一的に変換
 *
 * Body: {"success": false, "error": <status>, "code": "<stable code>", "message": "..."}
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::RepoError;
use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("unprocessable: {message}")]
    Unprocessable { message: String },
    #[error("conflict: {message}")]
    Conflict { message: String },
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(e) => e.status(),
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::Auth(e) => (e.code(), e.to_string()),
            AppError::NotFound { resource } => ("not_found", format!("{resource} not found.")),
            AppError::Unprocessable { message } => ("unprocessable", message),
            AppError::Conflict { message } => ("conflict", message),
            AppError::PayloadTooLarge => ("payload_too_large", "request body is too large".into()),
            AppError::Internal => ("internal_server_error", "internal server error".into()),
        };

        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::conflict("a drink with this title already exists"),
            RepoError::Db(err) => {
                tracing::error!(error = ?err, "database failure");
                AppError::Internal
            }
            RepoError::Recipe(err) => {
                tracing::error!(error = %err, "stored recipe could not be processed");
                AppError::Internal
            }
        }
    }
}
