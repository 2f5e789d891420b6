use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::knowledge::{AllergenDefinition, KnowledgeBase, Severity};
use crate::profile::UserAllergyProfile;

/// Every keyword hit gets the same confidence; the matcher has no notion of a
/// partial or fuzzy match yet.
pub const MATCH_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergenDetection {
    pub allergen: String,
    pub confidence: f64,
    /// The lower-cased ingredient token that triggered the detection.
    pub source: String,
    /// The knowledge-base keyword that matched inside `source`.
    pub keyword: String,
    pub severity: Severity,
    pub user_allergy: bool,
}

#[derive(Debug)]
struct KeywordPattern {
    keyword: String,
    word_boundary: Regex,
}

impl KeywordPattern {
    fn compile(keyword: &str) -> Result<Self> {
        let word_boundary = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))?;
        Ok(Self {
            keyword: keyword.to_string(),
            word_boundary,
        })
    }

    /// Substring containment or a whole-word hit; either one counts.
    fn matches(&self, lowered_token: &str) -> bool {
        lowered_token.contains(&self.keyword) || self.word_boundary.is_match(lowered_token)
    }
}

/// Whether a single user-supplied allergy name refers to `definition`.
///
/// The name matches when it equals an id or alias, contains the id, is contained
/// in the id, or contains any of the allergen's keywords.
pub fn allergy_name_relates_to(allergy_name: &str, definition: &AllergenDefinition) -> bool {
    let name = allergy_name.trim().to_lowercase();
    if name.is_empty() {
        return false;
    }
    definition.is_named(&name)
        || name.contains(&definition.id)
        || definition.id.contains(&name)
        || definition.keywords.iter().any(|kw| name.contains(kw.as_str()))
}

pub fn profile_flags_allergen(profile: &UserAllergyProfile, definition: &AllergenDefinition) -> bool {
    profile
        .allergies()
        .iter()
        .any(|name| allergy_name_relates_to(name, definition))
}

/// Maps ingredient tokens onto knowledge-base allergens.
#[derive(Debug)]
pub struct IngredientMatcher {
    knowledge_base: Arc<KnowledgeBase>,
    // Parallel to `knowledge_base.definitions()`.
    patterns: Vec<Vec<KeywordPattern>>,
}

impl IngredientMatcher {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Result<Self> {
        let patterns = knowledge_base
            .definitions()
            .iter()
            .map(|definition| {
                definition
                    .keywords
                    .iter()
                    .map(|kw| KeywordPattern::compile(kw))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            knowledge_base,
            patterns,
        })
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Detects allergens in `tokens`, one detection per allergen, in the order the
    /// allergens are first seen in the input.
    pub fn detect(&self, tokens: &[String], profile: &UserAllergyProfile) -> Vec<AllergenDetection> {
        let mut detections = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for token in tokens {
            let lowered = token.trim().to_lowercase();
            if lowered.is_empty() {
                continue;
            }

            for (definition, patterns) in self.knowledge_base.definitions().iter().zip(&self.patterns) {
                if seen.contains(definition.id.as_str()) {
                    continue;
                }
                let Some(hit) = patterns.iter().find(|p| p.matches(&lowered)) else {
                    continue;
                };

                seen.insert(definition.id.as_str());
                detections.push(AllergenDetection {
                    allergen: definition.id.clone(),
                    confidence: MATCH_CONFIDENCE,
                    source: lowered.clone(),
                    keyword: hit.keyword.clone(),
                    severity: definition.severity,
                    user_allergy: profile_flags_allergen(profile, definition),
                });
            }
        }

        tracing::debug!(
            tokens = tokens.len(),
            detections = detections.len(),
            "Ingredient matching complete"
        );
        detections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> IngredientMatcher {
        IngredientMatcher::new(Arc::new(KnowledgeBase::builtin().unwrap())).unwrap()
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_orders_by_first_seen_token() {
        let detections = matcher().detect(
            &tokens(&["Wheat Flour", "sugar", "almonds"]),
            &UserAllergyProfile::default(),
        );
        let ids: Vec<&str> = detections.iter().map(|d| d.allergen.as_str()).collect();
        assert_eq!(ids, vec!["wheat", "tree_nuts"]);
        assert_eq!(detections[0].source, "wheat flour");
        assert_eq!(detections[0].keyword, "wheat");
        assert_eq!(detections[1].keyword, "almond");
        assert!(detections.iter().all(|d| d.confidence == MATCH_CONFIDENCE));
    }

    #[test]
    fn test_detect_deduplicates_per_allergen() {
        let detections = matcher().detect(
            &tokens(&["skimmed milk powder", "butter", "whey"]),
            &UserAllergyProfile::default(),
        );
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].allergen, "milk");
        assert_eq!(detections[0].source, "skimmed milk powder");
    }

    #[test]
    fn test_detect_one_token_many_allergens() {
        // "soy lecithin" carries both the soy keyword and the egg-listed lecithin keyword.
        let detections = matcher().detect(&tokens(&["soy lecithin"]), &UserAllergyProfile::default());
        let ids: Vec<&str> = detections.iter().map(|d| d.allergen.as_str()).collect();
        assert_eq!(ids, vec!["eggs", "soy"]);
    }

    #[test]
    fn test_detect_no_allergens() {
        let detections = matcher().detect(
            &tokens(&["sugar", "salt", "apple"]),
            &UserAllergyProfile::default(),
        );
        assert!(detections.is_empty());
    }

    #[test]
    fn test_user_allergy_flagging() {
        let profile = UserAllergyProfile::new(vec!["nuts".to_string()]);
        let detections = matcher().detect(&tokens(&["wheat flour", "almonds"]), &profile);
        assert!(!detections[0].user_allergy);
        assert!(detections[1].user_allergy);
    }

    #[test]
    fn test_allergy_name_relates_to_is_loose() {
        let kb = KnowledgeBase::builtin().unwrap();
        let milk = kb.get("milk").unwrap();
        let tree_nuts = kb.get("tree_nuts").unwrap();
        let fish = kb.get("fish").unwrap();

        assert!(allergy_name_relates_to("Milk", milk));
        assert!(allergy_name_relates_to("milk products", milk));
        assert!(allergy_name_relates_to("cheese", milk));
        assert!(allergy_name_relates_to("nuts", tree_nuts));
        assert!(allergy_name_relates_to("cashew", tree_nuts));
        // "shellfish" contains the fish keyword: over-flagging is accepted.
        assert!(allergy_name_relates_to("shellfish", fish));
        assert!(!allergy_name_relates_to("pollen", milk));
        assert!(!allergy_name_relates_to("   ", milk));
    }
}
