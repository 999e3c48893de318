use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::extraction::rules::NAME_SCAN_LINES;
use crate::ranking::boost::BOOST_INCREMENT;

pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_MAX_TOKENS: usize = 256;
pub const DEFAULT_HASH_DIMENSION: usize = 384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    MiniLm,
    Hash,
}

impl FromStr for EmbeddingBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minilm" => Ok(Self::MiniLm),
            "hash" => Ok(Self::Hash),
            other => Err(anyhow!("unknown embedding backend '{other}' (expected minilm or hash)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingSettings {
    pub backend: EmbeddingBackend,
    pub model_id: String,
    /// Local directory with config.json, tokenizer.json and model.safetensors.
    /// When unset the model is fetched through the Hugging Face hub cache.
    pub model_dir: Option<PathBuf>,
    pub max_tokens: usize,
    pub hash_dimension: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::MiniLm,
            model_id: DEFAULT_MODEL_ID.to_string(),
            model_dir: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            hash_dimension: DEFAULT_HASH_DIMENSION,
        }
    }
}

/// Application configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub embedding: EmbeddingSettings,
    pub boost_increment: f64,
    pub name_scan_lines: usize,
    pub ingest_workers: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = EmbeddingSettings::default();
        Ok(Config {
            embedding: EmbeddingSettings {
                backend: env_or("EMBEDDING_BACKEND", defaults.backend)?,
                model_id: std::env::var("EMBEDDING_MODEL_ID").unwrap_or(defaults.model_id),
                model_dir: std::env::var("EMBEDDING_MODEL_DIR").ok().map(PathBuf::from),
                max_tokens: env_or("EMBEDDING_MAX_TOKENS", defaults.max_tokens)?,
                hash_dimension: env_or("HASH_EMBEDDING_DIM", defaults.hash_dimension)?,
            },
            boost_increment: env_or("BOOST_INCREMENT", BOOST_INCREMENT)?,
            name_scan_lines: env_or("NAME_SCAN_LINES", NAME_SCAN_LINES)?,
            ingest_workers: env_or("INGEST_WORKERS", default_workers())?.max(1),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Parses `key` when set, otherwise returns `default`. A set-but-invalid value is an error.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
