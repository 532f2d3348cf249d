use crate::classifier::SentimentModel;
use crate::storage::{CommentStore, NewComment};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Longest accepted comment, matching the tokenizer truncation length
pub const MAX_COMMENT_LENGTH: usize = 128;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn SentimentModel>,
    pub store: Arc<CommentStore>,
}

/// Request to classify a product comment
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_comment: Option<String>,
}

impl ClassifyRequest {
    /// Validate the request, producing a comment ready for persistence.
    pub fn validate(self) -> Result<NewComment, String> {
        let product_id = required(self.product_id, "product_id")?;
        let user_id = required(self.user_id, "user_id")?;
        let user_comment = required(self.user_comment, "user_comment")?;

        if user_comment.chars().count() > MAX_COMMENT_LENGTH {
            return Err(format!(
                "El comentario no puede exceder los {MAX_COMMENT_LENGTH} caracteres"
            ));
        }

        Ok(NewComment {
            product_id,
            user_id,
            user_comment,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("El campo '{field}' es obligatorio")),
    }
}

/// A single classification result
#[derive(Debug, Serialize)]
pub struct ClassificationResult {
    pub product_id: String,
    pub user_comment: String,
    pub date_comment: String,
    pub classification: String,
    pub rating: u8,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_comments: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
