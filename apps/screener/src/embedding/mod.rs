//! Embedding provider: maps text to a fixed-length vector.
//!
//! The model is loaded exactly once at startup into an `EmbeddingProvider`,
//! which is cloned (cheaply, via `Arc`) into every call site that needs it.
//! `EmbeddingProvider::embed` never fails: any backend error is logged and
//! surfaces as the empty vector, the "no embedding available" sentinel.

pub mod codec;
pub mod hashing;
pub mod minilm;
pub mod profile_text;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{EmbeddingBackend, EmbeddingSettings};

pub use self::hashing::HashEmbedder;
pub use self::minilm::MiniLmEmbedder;

/// Ordered, fixed-dimension vector. Empty means "not computed".
pub type EmbeddingVector = Vec<f32>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("inference error: {0}")]
    Inference(#[from] candle_core::Error),

    #[error("model download failed: {0}")]
    Download(#[from] hf_hub::api::sync::ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid model config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("text produced no features to embed")]
    NoFeatures,
}

/// A backend able to turn text into a vector. Implementations must tolerate
/// concurrent calls through `&self`.
pub trait Embedder: Send + Sync {
    /// Backend name, recorded in logs.
    fn name(&self) -> &'static str;

    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError>;
}

/// Process-wide handle to the single loaded embedding backend.
#[derive(Clone)]
pub struct EmbeddingProvider {
    inner: Arc<dyn Embedder>,
}

impl EmbeddingProvider {
    pub fn new<E: Embedder + 'static>(embedder: E) -> Self {
        Self {
            inner: Arc::new(embedder),
        }
    }

    /// Loads the backend selected by configuration. This is the expensive,
    /// once-per-process step; call it from a blocking context.
    pub fn load(settings: &EmbeddingSettings) -> Result<Self, EmbeddingError> {
        let provider = match settings.backend {
            EmbeddingBackend::MiniLm => Self::new(MiniLmEmbedder::load(settings)?),
            EmbeddingBackend::Hash => Self::new(HashEmbedder::new(settings.hash_dimension)),
        };
        info!(
            backend = provider.name(),
            dimension = provider.dimension(),
            "Embedding provider ready"
        );
        Ok(provider)
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    pub fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    /// Embeds `text`, returning `[]` for blank input or on any failure.
    pub fn embed(&self, text: &str) -> EmbeddingVector {
        if text.trim().is_empty() {
            debug!("Skipping embedding for blank text");
            return Vec::new();
        }

        match self.inner.embed(text) {
            Ok(vector) if is_usable(&vector) => vector,
            Ok(vector) => {
                warn!(
                    backend = self.inner.name(),
                    len = vector.len(),
                    "Embedding backend returned an empty or non-finite vector"
                );
                Vec::new()
            }
            Err(e) => {
                warn!(backend = self.inner.name(), error = %e, "Error generating embedding");
                Vec::new()
            }
        }
    }
}

/// A vector can take part in similarity comparisons only if it is non-empty
/// and every component is finite.
pub fn is_usable(vector: &[f32]) -> bool {
    !vector.is_empty() && vector.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn dimension(&self) -> usize {
            3
        }

        fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Err(EmbeddingError::ModelLoad("weights missing".to_string()))
        }
    }

    struct NanEmbedder;

    impl Embedder for NanEmbedder {
        fn name(&self) -> &'static str {
            "nan"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Ok(vec![f32::NAN, 1.0])
        }
    }

    #[test]
    fn test_blank_text_is_empty_vector() {
        let provider = EmbeddingProvider::new(HashEmbedder::new(16));
        assert!(provider.embed("").is_empty());
        assert!(provider.embed("  \n\t").is_empty());
    }

    #[test]
    fn test_backend_error_becomes_empty_vector() {
        let provider = EmbeddingProvider::new(FailingEmbedder);
        assert!(provider.embed("anything").is_empty());
    }

    #[test]
    fn test_non_finite_output_becomes_empty_vector() {
        let provider = EmbeddingProvider::new(NanEmbedder);
        assert!(provider.embed("anything").is_empty());
    }

    #[test]
    fn test_successful_embed_has_backend_dimension() {
        let provider = EmbeddingProvider::new(HashEmbedder::new(32));
        let vector = provider.embed("rust engineer");
        assert_eq!(vector.len(), 32);
        assert_eq!(provider.dimension(), 32);
        assert_eq!(provider.name(), "hash");
    }

    #[test]
    fn test_clones_share_one_backend() {
        let provider = EmbeddingProvider::new(HashEmbedder::new(8));
        let clone = provider.clone();
        assert!(Arc::ptr_eq(&provider.inner, &clone.inner));
    }

    #[test]
    fn test_concurrent_embeds_agree() {
        let provider = EmbeddingProvider::new(HashEmbedder::new(64));
        let expected = provider.embed("agile scrum master");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = provider.clone();
                std::thread::spawn(move || provider.embed("agile scrum master"))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_load_hash_backend_from_settings() {
        let settings = EmbeddingSettings {
            backend: EmbeddingBackend::Hash,
            hash_dimension: 48,
            ..EmbeddingSettings::default()
        };
        let provider = EmbeddingProvider::load(&settings).unwrap();
        assert_eq!(provider.name(), "hash");
        assert_eq!(provider.dimension(), 48);
    }
}
