use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{Embedder, EmbeddingError, EmbeddingVector};

// Changing either key changes every stored hash embedding.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;

/// Deterministic feature-hashing embedder.
///
/// Lowercased alphanumeric tokens (plus `+`, `#` and `.` so that "c++" and
/// "node.js" survive) are hashed into signed buckets and the result is L2
/// normalised. No model files, no network; texts sharing vocabulary get high
/// cosine similarity. Used offline and in tests.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        hasher.finish()
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|t| t.trim_matches('.').to_lowercase())
        .filter(|t| !t.is_empty())
}

impl Embedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        let mut signed = vec![0.0f32; self.dimension];
        let mut counts = vec![0.0f32; self.dimension];

        for token in tokenize(text) {
            let hash = self.hash_token(&token);
            let idx = (hash % self.dimension as u64) as usize;
            // High bit picks the sign.
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            signed[idx] += sign;
            counts[idx] += 1.0;
        }

        if counts.iter().all(|&c| c == 0.0) {
            return Err(EmbeddingError::NoFeatures);
        }
        // Opposite-signed collisions can cancel to a zero vector; the text
        // still has features, so fall back to plain bucket counts.
        let mut vector = if signed.iter().any(|&v| v != 0.0) { signed } else { counts };

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        for v in &mut vector {
            *v /= norm;
        }
        Ok(vector)
    }
}
