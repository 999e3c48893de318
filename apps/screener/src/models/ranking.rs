use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateRecord;

/// Transient projection of a candidate handed to the ranking engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RankableCandidate {
    pub id: i64,
    /// Full source text, used for keyword boosting.
    pub text: String,
    /// Empty means "not computed"; such candidates never appear in results.
    pub embedding: Vec<f32>,
}

/// One ranked candidate. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    pub candidate_id: i64,
    /// 0 – 100, rounded to 2 decimals.
    pub score: f64,
    pub reasoning: String,
}

/// A rank result joined back to the stored record it refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate: CandidateRecord,
    pub match_score: f64,
    pub reasoning: String,
}
