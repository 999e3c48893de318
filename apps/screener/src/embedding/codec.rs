//! JSON-array storage form of embedding vectors.

use tracing::warn;

/// Canonical "not computed" embedding.
pub const EMPTY_EMBEDDING_JSON: &str = "[]";

pub fn encode_embedding(vector: &[f32]) -> String {
    match serde_json::to_string(vector) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize embedding; storing empty sentinel");
            EMPTY_EMBEDDING_JSON.to_string()
        }
    }
}

/// Parses a stored embedding. `None` when the JSON is malformed or holds
/// anything other than numbers; `Some(vec![])` for the empty sentinel.
pub fn decode_embedding(json: &str) -> Option<Vec<f32>> {
    serde_json::from_str(json).ok()
}
