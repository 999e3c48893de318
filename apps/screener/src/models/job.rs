use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored job description. `embedding` follows the same JSON-array
/// convention as `CandidateRecord::embedding`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub embedding: String,
    pub created_at: DateTime<Utc>,
}
