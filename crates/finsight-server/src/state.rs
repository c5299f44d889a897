//! Shared application state.

use std::sync::Arc;

use finsight_chat::{HttpChatModel, LanguageModel};
use finsight_core::AnalystConfig;
use finsight_embed::{Embedder, HttpEmbedder};
use finsight_session::Analyst;
use tokio::sync::Mutex;

/// State shared by all route handlers.
///
/// The analyst sits behind one async mutex, held across the whole ingest or
/// ask call. That is the concurrency model: ingestion and answering never
/// interleave on a session.
pub struct AppState {
    pub config: AnalystConfig,
    pub analyst: Mutex<Analyst>,
}

impl AppState {
    pub fn new(config: AnalystConfig) -> Self {
        let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(&config.provider));
        let model: Arc<dyn LanguageModel> = Arc::new(HttpChatModel::new(&config.provider));
        let analyst = Analyst::new(config.clone(), embedder, model);

        Self {
            config,
            analyst: Mutex::new(analyst),
        }
    }
}
