use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("HF_API_TOKEN is not configured on the server")]
    MissingToken,

    #[error("Failed to reach HuggingFace: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("{detail}")]
    Upstream { status: u16, detail: String },

    #[error("Unable to decode HuggingFace response")]
    InvalidResponse,

    #[error("HuggingFace did not return translated_text")]
    MissingTranslation,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MissingToken => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::Unreachable(_) | AppError::InvalidResponse | AppError::MissingTranslation => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self);
        } else {
            warn!("Request rejected ({}): {}", status, self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
