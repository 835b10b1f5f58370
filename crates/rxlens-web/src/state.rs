//! Shared application state for the web server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use rxlens_common::AppConfig;
use rxlens_data::DatasetStore;
use rxlens_knowledge::KnowledgeSource;
use tracing::info;

/// Shared state injected into every Axum handler.
/// Read-only after startup; selection state lives with the client.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub knowledge: Arc<dyn KnowledgeSource>,
    /// Upper bound for each knowledge lookup.
    pub lookup_timeout: Duration,
}

impl AppState {
    pub fn new(store: DatasetStore, knowledge: Arc<dyn KnowledgeSource>, lookup_timeout: Duration) -> Self {
        Self { store: Arc::new(store), knowledge, lookup_timeout }
    }

    /// Load the dataset and build the knowledge source. A dataset that
    /// cannot be loaded is fatal.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store = DatasetStore::load(&config.dataset.path)
            .await
            .with_context(|| format!("failed to load dataset {}", config.dataset.path))?;

        let knowledge = rxlens_knowledge::from_config(&config.knowledge)?;
        info!(source = knowledge.name(), timeout = ?config.knowledge.timeout(), "Knowledge source ready");

        Ok(Self::new(store, knowledge, config.knowledge.timeout()))
    }
}

pub type SharedState = Arc<AppState>;
