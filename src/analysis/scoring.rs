use super::matcher::AllergenDetection;
use crate::knowledge::Severity;

pub const MAX_SAFETY_SCORE: u8 = 100;
pub const HIGH_SEVERITY_PENALTY: u32 = 25;
pub const BASE_PENALTY: u32 = 15;
pub const USER_ALLERGY_MULTIPLIER: u32 = 3;

pub fn detection_penalty(detection: &AllergenDetection) -> u32 {
    let base = match detection.severity {
        Severity::High => HIGH_SEVERITY_PENALTY,
        Severity::Medium | Severity::Low => BASE_PENALTY,
    };
    if detection.user_allergy {
        base * USER_ALLERGY_MULTIPLIER
    } else {
        base
    }
}

/// 100 minus the summed penalties, floored at zero.
///
/// The floor is applied once to the total so the result does not depend on the
/// order of the detections.
pub fn safety_score(detections: &[AllergenDetection]) -> u8 {
    let total: u32 = detections.iter().map(detection_penalty).sum();
    u32::from(MAX_SAFETY_SCORE).saturating_sub(total) as u8
}

pub fn user_match(detections: &[AllergenDetection]) -> bool {
    detections.iter().any(|d| d.user_allergy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::matcher::MATCH_CONFIDENCE;

    fn detection(allergen: &str, severity: Severity, user_allergy: bool) -> AllergenDetection {
        AllergenDetection {
            allergen: allergen.to_string(),
            confidence: MATCH_CONFIDENCE,
            source: allergen.to_string(),
            keyword: allergen.to_string(),
            severity,
            user_allergy,
        }
    }

    #[test]
    fn test_empty_detections_score_full() {
        assert_eq!(safety_score(&[]), 100);
        assert!(!user_match(&[]));
    }

    #[test]
    fn test_penalties() {
        assert_eq!(detection_penalty(&detection("milk", Severity::High, false)), 25);
        assert_eq!(detection_penalty(&detection("soy", Severity::Medium, false)), 15);
        assert_eq!(detection_penalty(&detection("mustard", Severity::Low, false)), 15);
        assert_eq!(detection_penalty(&detection("milk", Severity::High, true)), 75);
        assert_eq!(detection_penalty(&detection("soy", Severity::Medium, true)), 45);
    }

    #[test]
    fn test_wheat_and_user_nuts_scores_ten() {
        let detections = vec![
            detection("wheat", Severity::Medium, false),
            detection("tree_nuts", Severity::High, true),
        ];
        assert_eq!(safety_score(&detections), 10);
        assert!(user_match(&detections));
    }

    #[test]
    fn test_score_floors_at_zero_in_any_order() {
        let mut detections = vec![
            detection("milk", Severity::High, true),
            detection("eggs", Severity::High, true),
            detection("soy", Severity::Medium, false),
        ];
        assert_eq!(safety_score(&detections), 0);
        detections.reverse();
        assert_eq!(safety_score(&detections), 0);
    }

    #[test]
    fn test_user_flag_lowers_score() {
        let plain = [detection("fish", Severity::High, false)];
        let flagged = [detection("fish", Severity::High, true)];
        assert!(safety_score(&flagged) < safety_score(&plain));
    }
}
