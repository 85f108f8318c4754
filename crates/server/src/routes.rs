//! Request handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use kindler_core::{Converter, Mailer, validate_url};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// Body of `POST /send-article`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleRequest {
    pub url: String,
}

/// Body of every successful response.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    fn success(message: impl Into<String>) -> Self {
        Self { status: "success".to_string(), message: message.into() }
    }
}

/// `POST /send-article`: fetch, convert and mail one article.
pub async fn send_article<C: Converter, M: Mailer>(
    State(state): State<AppState<C, M>>, payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = payload.inspect_err(|e| error!("Rejected request body: {e}"))?;
    let span = info_span!("send_article", request_id = %Uuid::new_v4(), url = %request.url);

    async move {
        let url = validate_url(&request.url)?;
        let delivery = state
            .kindler
            .send_article(&url)
            .await
            .inspect_err(|e| error!("Failed to send article: {e}"))?;

        info!(epub = %delivery.epub_file, "Article sent");
        Ok(Json(StatusResponse::success(delivery.message())))
    }
    .instrument(span)
    .await
}

/// `POST /cleanup`: delete every file in the working directory.
pub async fn cleanup<C: Converter, M: Mailer>(
    State(state): State<AppState<C, M>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let removed = state.kindler.cleanup().map_err(|e| {
        error!("Error during cleanup: {e}");
        ApiError::Cleanup(e)
    })?;

    info!(removed, "Working directory cleaned");
    Ok(Json(StatusResponse::success("All files deleted from working directory.")))
}
