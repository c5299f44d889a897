//! Route registration and shared HTTP error mapping.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use finsight_core::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod chat;
mod ingest;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new().merge(ingest::routes()).merge(chat::routes()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map core errors onto HTTP statuses for the JSON error bodies.
pub(crate) fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::NotInitialized => StatusCode::CONFLICT,
        Error::EmptyContent | Error::NoIndexProduced => StatusCode::UNPROCESSABLE_ENTITY,
        Error::ModelInvocation(_) | Error::EmbeddingBatch(_) | Error::Http(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
