#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::candidate::CandidateRecord;
use crate::models::job::JobRecord;

// ────────────────────────────────────────────────────────────────────────────
// Store traits
// ────────────────────────────────────────────────────────────────────────────

/// Persistence seam for candidates. `save` assigns a fresh id when the record's
/// id is 0 and overwrites the stored record otherwise.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// All candidates, ordered by id.
    async fn list(&self) -> Result<Vec<CandidateRecord>>;

    async fn get(&self, id: i64) -> Result<Option<CandidateRecord>>;

    async fn save(&self, record: CandidateRecord) -> Result<CandidateRecord>;

    /// Replaces only the embedding of an existing candidate. Returns `false`,
    /// storing nothing, when no candidate has that id.
    async fn update_embedding(&self, id: i64, embedding: String) -> Result<bool>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Returns the number of records removed.
    async fn delete_all(&self) -> Result<usize>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list(&self) -> Result<Vec<JobRecord>>;

    async fn get(&self, id: i64) -> Result<Option<JobRecord>>;

    async fn save(&self, record: JobRecord) -> Result<JobRecord>;

    async fn delete(&self, id: i64) -> Result<bool>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory implementation
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store backing both traits. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    candidates: RwLock<BTreeMap<i64, CandidateRecord>>,
    jobs: RwLock<BTreeMap<i64, JobRecord>>,
    next_candidate_id: AtomicI64,
    next_job_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Picks the id for a record being saved and keeps the counter ahead of any
/// explicit id the caller supplied.
fn assign_id(counter: &AtomicI64, requested: i64) -> i64 {
    if requested == 0 {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    } else {
        counter.fetch_max(requested, Ordering::SeqCst);
        requested
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn list(&self) -> Result<Vec<CandidateRecord>> {
        Ok(self.candidates.read().await.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<CandidateRecord>> {
        Ok(self.candidates.read().await.get(&id).cloned())
    }

    async fn save(&self, mut record: CandidateRecord) -> Result<CandidateRecord> {
        let mut candidates = self.candidates.write().await;
        record.id = assign_id(&self.next_candidate_id, record.id);
        candidates.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_embedding(&self, id: i64, embedding: String) -> Result<bool> {
        match self.candidates.write().await.get_mut(&id) {
            Some(record) => {
                record.embedding = embedding;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.candidates.write().await.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<usize> {
        let mut candidates = self.candidates.write().await;
        let removed = candidates.len();
        candidates.clear();
        Ok(removed)
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn list(&self) -> Result<Vec<JobRecord>> {
        Ok(self.jobs.read().await.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<JobRecord>> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn save(&self, mut record: JobRecord) -> Result<JobRecord> {
        let mut jobs = self.jobs.write().await;
        record.id = assign_id(&self.next_job_id, record.id);
        jobs.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.jobs.write().await.remove(&id).is_some())
    }
}
