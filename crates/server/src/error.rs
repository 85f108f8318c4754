//! Mapping pipeline failures onto HTTP responses.
//!
//! Error bodies have the shape `{"detail": "<message>"}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kindler_core::{ErrorKind, KindlerError};
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Errors returned by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// `send-article` failed somewhere in the pipeline.
    Pipeline(KindlerError),
    /// `cleanup` could not empty the working directory.
    Cleanup(KindlerError),
    /// The request body was missing, not JSON, or lacked a field.
    Rejected(JsonRejection),
}

impl ApiError {
    /// Status code and client-facing detail for this error.
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            Self::Pipeline(err) => match err.kind() {
                ErrorKind::Validation => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
                ErrorKind::Fetch => (StatusCode::BAD_REQUEST, "Failed to download HTML content.".to_string()),
                ErrorKind::Conversion => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to convert HTML to EPUB.".to_string(),
                ),
                ErrorKind::Mail => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to send EPUB file to Kindle.".to_string(),
                ),
                ErrorKind::Internal => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store article.".to_string(),
                ),
            },
            Self::Cleanup(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to clean up files.".to_string()),
            Self::Rejected(rejection) => (rejection.status(), rejection.body_text()),
        }
    }
}

impl From<KindlerError> for ApiError {
    fn from(err: KindlerError) -> Self {
        Self::Pipeline(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pipeline(err) | Self::Cleanup(err) => err.fmt(f),
            Self::Rejected(rejection) => rejection.fmt(f),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(ErrorBody { detail })).into_response()
    }
}
