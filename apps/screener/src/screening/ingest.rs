use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::documents::extract_document_text;
use crate::embedding::codec::encode_embedding;
use crate::embedding::profile_text::profile_text;
use crate::embedding::{EmbeddingProvider, EmbeddingVector};
use crate::errors::AppError;
use crate::extraction::extract;
use crate::extraction::rules::ExtractionRules;
use crate::models::candidate::CandidateRecord;
use crate::models::profile::ExtractedProfile;
use crate::state::AppState;

use super::run_blocking;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Success,
    Error,
}

/// Per-document result of an ingest batch.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub filename: String,
    pub status: IngestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_data: Option<ExtractedProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl IngestOutcome {
    fn success(filename: String, record: &CandidateRecord, profile: ExtractedProfile) -> Self {
        Self {
            filename,
            status: IngestStatus::Success,
            candidate_id: Some(record.id),
            parsed_data: Some(profile),
            detail: None,
            code: None,
        }
    }

    fn failure(filename: String, err: &AppError) -> Self {
        Self {
            filename,
            status: IngestStatus::Error,
            candidate_id: None,
            parsed_data: None,
            detail: Some(err.to_string()),
            code: Some(err.code().to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == IngestStatus::Success
    }
}

struct PreparedCandidate {
    text: String,
    profile: ExtractedProfile,
    embedding: EmbeddingVector,
}

/// Ingests every document in `paths` and reports one outcome per path, in
/// input order. Documents are processed concurrently, at most
/// `config.ingest_workers` at a time; a failing document never affects the others.
pub async fn ingest_documents(state: &AppState, paths: &[PathBuf]) -> Vec<IngestOutcome> {
    let permits = Arc::new(Semaphore::new(state.config.ingest_workers.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in paths.iter().cloned().enumerate() {
        let state = state.clone();
        let permits = permits.clone();
        tasks.spawn(async move {
            let filename = display_name(&path);
            let outcome = match permits.acquire_owned().await {
                Ok(_permit) => match ingest_one(&state, path).await {
                    Ok((record, profile)) => {
                        info!(document = %filename, candidate_id = record.id, "Candidate ingested");
                        IngestOutcome::success(filename, &record, profile)
                    }
                    Err(e) => {
                        warn!(document = %filename, error = %e, "Failed to ingest document");
                        IngestOutcome::failure(filename, &e)
                    }
                },
                Err(e) => IngestOutcome::failure(
                    filename,
                    &AppError::Internal(anyhow::anyhow!("ingest pool closed: {e}")),
                ),
            };
            (index, outcome)
        });
    }

    let mut outcomes: Vec<Option<IngestOutcome>> = vec![None; paths.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(e) => warn!(error = %e, "Ingest task aborted"),
        }
    }

    outcomes
        .into_iter()
        .zip(paths)
        .map(|(outcome, path)| {
            outcome.unwrap_or_else(|| {
                IngestOutcome::failure(
                    display_name(path),
                    &AppError::Internal(anyhow::anyhow!("ingest task aborted")),
                )
            })
        })
        .collect()
}

async fn ingest_one(
    state: &AppState,
    path: PathBuf,
) -> Result<(CandidateRecord, ExtractedProfile), AppError> {
    let embedder = state.embedder.clone();
    let rules = state.extraction_rules.clone();
    let prepared = run_blocking(move || prepare_candidate(&embedder, &rules, &path)).await??;

    if prepared.embedding.is_empty() {
        warn!("Candidate stored without an embedding; regenerate to make it rankable");
    }
    let record = CandidateRecord::from_profile(
        &prepared.profile,
        &prepared.text,
        encode_embedding(&prepared.embedding),
    );
    let saved = state.candidates.save(record).await?;
    Ok((saved, prepared.profile))
}

fn prepare_candidate(
    embedder: &EmbeddingProvider,
    rules: &ExtractionRules,
    path: &Path,
) -> Result<PreparedCandidate, AppError> {
    let text = extract_document_text(path)?;
    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument);
    }
    let profile = extract(&text, rules);
    let embedding = embedder.embed(&profile_text(&profile));
    Ok(PreparedCandidate {
        text,
        profile,
        embedding,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
