//! The allergen knowledge base: a read-only table of allergen definitions.
//!
//! The table is built once (either from the built-in dictionary or from a JSON
//! file) and shared by reference between the matcher and the plan generator.

mod allergens;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealKind {
    pub const ALL: [MealKind; 4] = [
        MealKind::Breakfast,
        MealKind::Lunch,
        MealKind::Dinner,
        MealKind::Snacks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "Breakfast",
            MealKind::Lunch => "Lunch",
            MealKind::Dinner => "Dinner",
            MealKind::Snacks => "Snacks",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealSuggestions {
    #[serde(default)]
    pub breakfast: Vec<String>,
    #[serde(default)]
    pub lunch: Vec<String>,
    #[serde(default)]
    pub dinner: Vec<String>,
    #[serde(default)]
    pub snacks: Vec<String>,
}

impl MealSuggestions {
    pub fn for_meal(&self, meal: MealKind) -> &[String] {
        match meal {
            MealKind::Breakfast => &self.breakfast,
            MealKind::Lunch => &self.lunch,
            MealKind::Dinner => &self.dinner,
            MealKind::Snacks => &self.snacks,
        }
    }
}

/// One canonical allergen and everything the engine knows about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergenDefinition {
    /// Canonical id, e.g. `tree_nuts`.
    pub id: String,
    /// Other names a user may give this allergy ("nuts" for `tree_nuts`).
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Lower-case match keywords, tested in order.
    pub keywords: Vec<String>,
    pub severity: Severity,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
    #[serde(default)]
    pub meal_suggestions: MealSuggestions,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl AllergenDefinition {
    /// Case-insensitive exact match on the id or one of the aliases.
    pub fn is_named(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.id == name || self.aliases.iter().any(|alias| *alias == name)
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    definitions: Vec<AllergenDefinition>,
}

impl KnowledgeBase {
    /// Validates and normalizes a set of definitions into a knowledge base.
    ///
    /// Ids, aliases and keywords are lower-cased and trimmed. Fails when the set is
    /// empty, an id repeats, or a definition has no usable keyword.
    pub fn new(definitions: Vec<AllergenDefinition>) -> Result<Self> {
        if definitions.is_empty() {
            return Err(EngineError::KnowledgeBase(
                "knowledge base contains no allergen definitions".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(definitions.len());
        for mut definition in definitions {
            definition.id = definition.id.trim().to_lowercase();
            if definition.id.is_empty() {
                return Err(EngineError::KnowledgeBase(
                    "allergen definition with an empty id".to_string(),
                ));
            }
            if !seen.insert(definition.id.clone()) {
                return Err(EngineError::KnowledgeBase(format!(
                    "duplicate allergen id '{}'",
                    definition.id
                )));
            }

            definition.aliases = definition
                .aliases
                .iter()
                .map(|alias| alias.trim().to_lowercase())
                .filter(|alias| !alias.is_empty())
                .collect();

            if definition.keywords.iter().any(|kw| kw.trim().is_empty()) {
                return Err(EngineError::KnowledgeBase(format!(
                    "allergen '{}' has a blank keyword",
                    definition.id
                )));
            }
            definition.keywords = definition
                .keywords
                .iter()
                .map(|kw| kw.trim().to_lowercase())
                .collect();
            if definition.keywords.is_empty() {
                return Err(EngineError::KnowledgeBase(format!(
                    "allergen '{}' has no keywords",
                    definition.id
                )));
            }

            normalized.push(definition);
        }

        Ok(Self {
            definitions: normalized,
        })
    }

    /// The built-in dictionary of the eight common food allergens.
    pub fn builtin() -> Result<Self> {
        Self::new(allergens::builtin_definitions())
    }

    pub fn definitions(&self) -> &[AllergenDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Looks up a definition by canonical id only.
    pub fn get(&self, id: &str) -> Option<&AllergenDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Looks up a definition by a user-supplied allergy name (id or alias).
    pub fn lookup(&self, name: &str) -> Option<&AllergenDefinition> {
        self.definitions.iter().find(|d| d.is_named(name))
    }

    /// Safe alternatives for one allergy name; empty when the name is unknown.
    pub fn safe_alternatives(&self, name: &str) -> &[String] {
        self.lookup(name)
            .map(|d| d.alternatives.as_slice())
            .unwrap_or(&[])
    }
}

/// Formats an allergen id for display: `tree_nuts` becomes `Tree Nuts`.
pub fn display_name(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
