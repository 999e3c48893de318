//! Local sentence embeddings with all-MiniLM-L6-v2 on Candle.
//!
//! The model directory (or Hugging Face hub snapshot) must contain
//! `config.json`, `tokenizer.json` and `model.safetensors`.

use std::path::{Path, PathBuf};

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use hf_hub::api::sync::Api;
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

use super::{Embedder, EmbeddingError, EmbeddingVector};
use crate::config::EmbeddingSettings;

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHTS_FILE: &str = "model.safetensors";

/// Guards against dividing by a zero norm during normalisation.
const NORM_EPSILON: f64 = 1e-12;

/// Only the field we need from config.json; the full config goes to Candle.
#[derive(Debug, Deserialize)]
struct ModelShape {
    hidden_size: usize,
}

struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

impl ModelFiles {
    fn from_dir(dir: &Path) -> Result<Self, EmbeddingError> {
        let files = Self {
            config: dir.join(CONFIG_FILE),
            tokenizer: dir.join(TOKENIZER_FILE),
            weights: dir.join(WEIGHTS_FILE),
        };
        for path in [&files.config, &files.tokenizer, &files.weights] {
            if !path.exists() {
                return Err(EmbeddingError::ModelLoad(format!(
                    "{} not found",
                    path.display()
                )));
            }
        }
        Ok(files)
    }

    /// Fetches the files into the local hub cache (no-op when already cached).
    fn download(model_id: &str) -> Result<Self, EmbeddingError> {
        info!(model_id, "Fetching embedding model from Hugging Face Hub");
        let repo = Api::new()?.model(model_id.to_string());
        Ok(Self {
            config: repo.get(CONFIG_FILE)?,
            tokenizer: repo.get(TOKENIZER_FILE)?,
            weights: repo.get(WEIGHTS_FILE)?,
        })
    }
}

/// BERT-family sentence embedder: mean pooling over the attention mask,
/// then L2 normalisation, as sentence-transformers does for MiniLM.
pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl MiniLmEmbedder {
    pub fn load(settings: &EmbeddingSettings) -> Result<Self, EmbeddingError> {
        let files = match &settings.model_dir {
            Some(dir) => ModelFiles::from_dir(dir)?,
            None => ModelFiles::download(&settings.model_id)?,
        };

        let device = Device::cuda_if_available(0)?;
        info!(?device, model_id = %settings.model_id, "Loading embedding model");

        let config_json = std::fs::read_to_string(&files.config)?;
        let shape: ModelShape = serde_json::from_str(&config_json)?;
        let config: BertConfig = serde_json::from_str(&config_json)?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: settings.max_tokens,
                ..Default::default()
            }))
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(None);

        // SAFETY: the weights file is opened read-only and must not be modified
        // while mapped; the hub cache and model dirs are treated as immutable.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[files.weights], DTYPE, &device)? };
        let model = BertModel::load(vb, &config)?;

        info!(hidden_size = shape.hidden_size, "Embedding model loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
            dimension: shape.hidden_size,
        })
    }

    fn mean_pool(&self, hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor, EmbeddingError> {
        // hidden: [1, seq, dim]; attention_mask: [1, seq]
        let mask = attention_mask.to_dtype(DTYPE)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        Ok(summed.broadcast_div(&counts)?)
    }

    fn l2_normalize(&self, pooled: &Tensor) -> Result<Tensor, EmbeddingError> {
        let norm = (pooled.sqr()?.sum_keepdim(1)?.sqrt()? + NORM_EPSILON)?;
        Ok(pooled.broadcast_div(&norm)?)
    }
}

impl Embedder for MiniLmEmbedder {
    fn name(&self) -> &'static str {
        "minilm"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;
        if encoding.get_ids().is_empty() {
            return Err(EmbeddingError::NoFeatures);
        }

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = self.mean_pool(&hidden, &attention_mask)?;
        let normalized = self.l2_normalize(&pooled)?;

        Ok(normalized.squeeze(0)?.to_vec1::<f32>()?)
    }
}
