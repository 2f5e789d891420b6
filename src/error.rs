use thiserror::Error;

/// Errors surfaced by the engine to its callers.
///
/// Enrichment failures never reach this type; [`crate::enrichment::EnrichmentAdapter`]
/// absorbs them and they only show up as `ai_enhanced = false`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Failed to compile keyword pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Product not found for barcode {barcode}")]
    ProductNotFound {
        barcode: String,
        suggestions: Vec<String>,
    },

    #[error("Profile lookup failed: {0}")]
    Profile(String),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
