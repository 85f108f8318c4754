//! HTTP front end for the Kindler pipeline.
//!
//! Two endpoints are exposed:
//!
//! - `POST /send-article` with `{"url": "..."}` delivers one article
//! - `POST /cleanup` empties the working directory

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use kindler_core::{Converter, Kindler, Mailer};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody};
pub use routes::{ArticleRequest, StatusResponse};

/// Shared handler state.
pub struct AppState<C, M> {
    pub kindler: Arc<Kindler<C, M>>,
}

impl<C, M> Clone for AppState<C, M> {
    fn clone(&self) -> Self {
        Self { kindler: Arc::clone(&self.kindler) }
    }
}

/// Builds the application router around a pipeline.
pub fn router<C, M>(kindler: Kindler<C, M>) -> Router
where
    C: Converter + 'static,
    M: Mailer + 'static,
{
    let state = AppState { kindler: Arc::new(kindler) };

    Router::new()
        .route("/send-article", post(routes::send_article::<C, M>))
        .route("/cleanup", post(routes::cleanup::<C, M>))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
