use super::matcher::AllergenDetection;
use crate::knowledge::KnowledgeBase;

pub const CRITICAL_WARNING: &str =
    "CRITICAL WARNING: This product contains allergens that match your allergy profile!";
pub const DO_NOT_CONSUME: &str =
    "Do NOT consume this product. Consult your healthcare provider immediately.";
pub const CARRY_MEDICATION: &str =
    "Always carry your emergency medication (EpiPen) when trying new foods.";
pub const GENERAL_CAUTION: &str =
    "This product contains common allergens that may affect some individuals.";
pub const CHECK_FULL_LABEL: &str =
    "Check the full ingredient list and consult with an allergist if unsure.";
pub const ALL_CLEAR: &str = "No major allergens detected based on common allergen patterns.";
pub const CROSS_CONTAMINATION_CAVEAT: &str =
    "However, always read full labels as manufacturing processes may introduce cross-contamination.";

pub fn compose_recommendations(detections: &[AllergenDetection], user_match: bool) -> Vec<String> {
    let lines: &[&str] = if user_match {
        &[CRITICAL_WARNING, DO_NOT_CONSUME, CARRY_MEDICATION]
    } else if !detections.is_empty() {
        &[GENERAL_CAUTION, CHECK_FULL_LABEL]
    } else {
        &[ALL_CLEAR, CROSS_CONTAMINATION_CAVEAT]
    };
    lines.iter().map(|line| line.to_string()).collect()
}

/// Safe alternatives for every allergen that matched the user's profile,
/// deduplicated in first-seen order.
pub fn collect_alternatives(detections: &[AllergenDetection], knowledge_base: &KnowledgeBase) -> Vec<String> {
    let mut alternatives: Vec<String> = Vec::new();
    for detection in detections.iter().filter(|d| d.user_allergy) {
        let Some(definition) = knowledge_base.get(&detection.allergen) else {
            continue;
        };
        for alternative in &definition.alternatives {
            if !alternatives.contains(alternative) {
                alternatives.push(alternative.clone());
            }
        }
    }
    alternatives
}
