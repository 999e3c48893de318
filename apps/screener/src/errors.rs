use thiserror::Error;

use crate::documents::DocumentError;

/// Application-level error type for the screening workflow.
///
/// The extraction and ranking core never produces these; they come from the
/// collaborators around it (documents, stores) and from request validation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Could not extract text")]
    EmptyDocument,

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, used in per-document ingest reports.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::EmptyDocument => "EMPTY_DOCUMENT",
            AppError::Document(DocumentError::UnsupportedFormat(_)) => "UNSUPPORTED_FORMAT",
            AppError::Document(_) => "DOCUMENT_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
