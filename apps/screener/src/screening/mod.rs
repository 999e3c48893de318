//! Screening workflow: turns uploaded documents into stored candidates and
//! ranks them against job descriptions.
//!
//! Everything CPU-bound (document parsing, extraction, embedding, ranking) runs
//! on tokio's blocking pool; store access stays on the async side.

pub mod ingest;
pub mod jobs;
pub mod maintenance;

pub use self::ingest::{ingest_documents, IngestOutcome};
pub use self::jobs::{create_job, rank_description, rank_job};
pub use self::maintenance::{
    delete_all_candidates, delete_candidate, regenerate_embeddings, seed_demo_candidates,
};

use crate::errors::AppError;

/// Runs a CPU-bound closure on the blocking pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking task failed: {e}")))
}
