use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::extraction::rules::ExtractionRules;
use crate::ranking::boost::BoostRules;
use crate::store::{CandidateStore, JobStore, MemoryStore};

/// Shared handles injected into every screening operation.
///
/// Built once at startup. Cloning is cheap: the embedding model and stores
/// sit behind `Arc`s, so every clone shares the single loaded model.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub embedder: EmbeddingProvider,
    pub candidates: Arc<dyn CandidateStore>,
    pub jobs: Arc<dyn JobStore>,
    pub extraction_rules: ExtractionRules,
    pub boost_rules: BoostRules,
}

impl AppState {
    /// Wires the state around an already-loaded embedder and a fresh in-memory store.
    pub fn new(config: Config, embedder: EmbeddingProvider) -> Self {
        let store = Arc::new(MemoryStore::new());
        let extraction_rules =
            ExtractionRules::default().with_name_scan_lines(config.name_scan_lines);
        let boost_rules = BoostRules::default().with_increment(config.boost_increment);
        Self {
            config,
            embedder,
            candidates: store.clone(),
            jobs: store,
            extraction_rules,
            boost_rules,
        }
    }

    /// Loads the embedding model (once, on a blocking thread) and builds the state.
    pub async fn initialize(config: Config) -> Result<Self> {
        let settings = config.embedding.clone();
        let embedder = tokio::task::spawn_blocking(move || EmbeddingProvider::load(&settings))
            .await
            .context("embedding model loader panicked")?
            .context("failed to load embedding model")?;
        Ok(Self::new(config, embedder))
    }
}
