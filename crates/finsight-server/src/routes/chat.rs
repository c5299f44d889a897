//! Question answering, status, and session management routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::routes::error_status;
use crate::state::AppState;
use finsight_chat::AnalysisTask;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ask", post(ask))
        .route("/status", get(status))
        .route("/tasks", get(tasks))
        .route("/reset", post(reset))
}

/// A free-form question, or one of the fixed analytical tasks. When both
/// are present the explicit question wins.
#[derive(Debug, Deserialize)]
struct AskRequest {
    question: Option<String>,
    task: Option<AnalysisTask>,
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    let question = match (req.question, req.task) {
        (Some(q), _) if !q.trim().is_empty() => q,
        (_, Some(task)) => task.prompt().to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "a question or a task is required" })),
            );
        }
    };

    let mut analyst = state.analyst.lock().await;
    match analyst.ask(&question).await {
        Ok(answer) => (StatusCode::OK, Json(json!({ "answer": answer }))),
        Err(e) => (error_status(&e), Json(json!({ "error": e.to_string() }))),
    }
}

async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let analyst = state.analyst.lock().await;
    let status = analyst.status();

    Json(json!({
        "ready": status.ready,
        "indexedChunks": status.indexed_chunks,
        "turns": status.turns,
        "provider": state.config.provider,
    }))
}

async fn tasks() -> Json<serde_json::Value> {
    let tasks: Vec<_> = AnalysisTask::ALL
        .iter()
        .map(|task| {
            json!({
                "id": task,
                "label": task.label(),
                "prompt": task.prompt(),
            })
        })
        .collect();
    Json(json!({ "tasks": tasks }))
}

async fn reset(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut analyst = state.analyst.lock().await;
    analyst.reset();
    Json(json!({ "reset": true }))
}
