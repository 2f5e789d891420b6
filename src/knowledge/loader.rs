use std::path::Path;

use super::{AllergenDefinition, KnowledgeBase};
use crate::error::{EngineError, Result};

/// Loads a knowledge base from a JSON array of allergen definitions.
///
/// The file replaces the built-in dictionary entirely; it goes through the same
/// validation as [`KnowledgeBase::new`].
pub fn load_knowledge_base(json_path: &Path) -> Result<KnowledgeBase> {
    if !json_path.exists() {
        return Err(EngineError::KnowledgeBase(format!(
            "knowledge base file not found at: {:?}",
            json_path
        )));
    }

    let raw = std::fs::read_to_string(json_path)?;
    let definitions: Vec<AllergenDefinition> = serde_json::from_str(&raw)?;
    let kb = KnowledgeBase::new(definitions)?;
    tracing::info!(
        path = %json_path.display(),
        allergens = kb.len(),
        "Loaded knowledge base from file"
    );
    Ok(kb)
}

impl KnowledgeBase {
    pub fn from_json_file(json_path: &Path) -> Result<Self> {
        load_knowledge_base(json_path)
    }
}
