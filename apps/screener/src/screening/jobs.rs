use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::embedding::codec::{decode_embedding, encode_embedding};
use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::models::ranking::{RankableCandidate, RankedCandidate};
use crate::ranking::rank;
use crate::state::AppState;

use super::run_blocking;

/// Stores a job description together with its embedding.
pub async fn create_job(
    state: &AppState,
    title: &str,
    description: &str,
) -> Result<JobRecord, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("job title must not be empty".into()));
    }
    if description.trim().is_empty() {
        return Err(AppError::Validation("job description must not be empty".into()));
    }

    let embedder = state.embedder.clone();
    let text = description.to_string();
    let embedding = run_blocking(move || embedder.embed(&text)).await?;

    let job = state
        .jobs
        .save(JobRecord {
            id: 0,
            title: title.trim().to_string(),
            description: description.to_string(),
            requirements: None,
            embedding: encode_embedding(&embedding),
            created_at: Utc::now(),
        })
        .await?;
    info!(job_id = job.id, title = %job.title, "Job created");
    Ok(job)
}

/// Ranks every stored candidate against a stored job.
pub async fn rank_job(state: &AppState, job_id: i64) -> Result<Vec<RankedCandidate>, AppError> {
    let job = state
        .jobs
        .get(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    rank_description(state, &job.description).await
}

/// Ranks every stored candidate against an ad-hoc job description.
pub async fn rank_description(
    state: &AppState,
    description: &str,
) -> Result<Vec<RankedCandidate>, AppError> {
    let stored = state.candidates.list().await?;

    let rankable: Vec<RankableCandidate> = stored
        .iter()
        .filter_map(|c| match decode_embedding(&c.embedding) {
            Some(embedding) => Some(RankableCandidate {
                id: c.id,
                text: c.resume_text.clone(),
                embedding,
            }),
            None => {
                debug!(candidate_id = c.id, "Skipping candidate with malformed embedding");
                None
            }
        })
        .collect();

    let embedder = state.embedder.clone();
    let rules = state.boost_rules.clone();
    let jd = description.to_string();
    let results = run_blocking(move || rank(&embedder, &rules, &jd, &rankable)).await?;

    let mut by_id: HashMap<i64, _> = stored.into_iter().map(|c| (c.id, c)).collect();
    let ranked: Vec<RankedCandidate> = results
        .into_iter()
        .filter_map(|r| {
            by_id.remove(&r.candidate_id).map(|candidate| RankedCandidate {
                candidate,
                match_score: r.score,
                reasoning: r.reasoning,
            })
        })
        .collect();

    info!(ranked = ranked.len(), "Ranking complete");
    Ok(ranked)
}
