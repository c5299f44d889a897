//! Ingestion route: multipart upload in, SSE progress stream out.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::routing::post;
use axum::{Json, Router};
use futures::Stream;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::state::AppState;
use finsight_ingest::SourceDocument;
use finsight_session::IngestReport;

type SseStream = Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ingest", post(ingest))
}

/// SSE event stream emitted while an ingestion runs.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum IngestEvent {
    Progress { value: f64 },
    Report { report: IngestReport },
    Error { error: String },
}

async fn ingest(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Sse<SseStream>, (StatusCode, Json<serde_json::Value>)> {
    let mut documents = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("malformed upload: {e}") })),
        )
    })? {
        let name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("failed to read {name}: {e}") })),
            )
        })?;
        documents.push(SourceDocument::new(name, bytes.to_vec()));
    }

    if documents.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "no documents uploaded" })),
        ));
    }

    info!("Ingesting {} uploaded documents", documents.len());

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<IngestEvent>();
    tokio::spawn(async move {
        let mut analyst = state.analyst.lock().await;
        let progress_tx = tx.clone();
        let result = analyst
            .ingest(&documents, move |value| {
                let _ = progress_tx.send(IngestEvent::Progress { value });
            })
            .await;

        let terminal = match result {
            Ok(report) => IngestEvent::Report { report },
            Err(e) => IngestEvent::Error {
                error: e.to_string(),
            },
        };
        let _ = tx.send(terminal);
    });

    let stream: SseStream = Box::pin(async_stream::stream! {
        while let Some(event) = rx.recv().await {
            let data = serde_json::to_string(&event).unwrap_or_default();
            yield Ok::<_, Infallible>(Event::default().data(data));
        }
    });

    Ok(Sse::new(stream))
}
