use allergy_guard::analysis::recommendations::{ALL_CLEAR, CRITICAL_WARNING, GENERAL_CAUTION};
use allergy_guard::api_connection::ApiConnectionError;
use allergy_guard::enrichment::{EnrichmentAdapter, TextGenerator, AI_DISCLAIMER};
use allergy_guard::knowledge::Severity;
use allergy_guard::{AllergyEngine, AnalysisRequest, EngineError, KnowledgeBase, UserAllergyProfile};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
enum Stub {
    Answers(&'static str),
    Fails,
    Hangs,
}

#[async_trait]
impl TextGenerator for Stub {
    async fn generate(&self, _prompt: &str) -> Result<String, ApiConnectionError> {
        match self {
            Stub::Answers(text) => Ok(text.to_string()),
            Stub::Fails => Err(ApiConnectionError::EmptyResponse),
            Stub::Hangs => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok("too late".to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn engine_with(stub: Option<Stub>) -> AllergyEngine {
    let enrichment = match stub {
        Some(stub) => {
            let generator: Arc<dyn TextGenerator> = Arc::new(stub);
            EnrichmentAdapter::new(vec![generator], Duration::from_millis(200))
        }
        None => EnrichmentAdapter::disabled(),
    };
    let kb = Arc::new(KnowledgeBase::builtin().unwrap());
    AllergyEngine::new(kb, enrichment, 3).unwrap()
}

fn profile(names: &[&str]) -> UserAllergyProfile {
    UserAllergyProfile::new(names.iter().map(|s| s.to_string()).collect())
}

fn request(items: &[&str]) -> AnalysisRequest {
    AnalysisRequest::new(items.iter().map(|s| s.to_string()).collect())
}

#[tokio::test]
async fn test_wheat_and_nuts_example() {
    let engine = engine_with(None);
    let result = engine
        .analyze(&request(&["wheat flour", "sugar", "almonds"]), &profile(&["nuts"]))
        .await;

    let found: Vec<(&str, Severity, bool)> = result
        .allergens_detected
        .iter()
        .map(|d| (d.allergen.as_str(), d.severity, d.user_allergy))
        .collect();
    assert_eq!(
        found,
        vec![("wheat", Severity::Medium, false), ("tree_nuts", Severity::High, true)]
    );
    assert_eq!(result.safety_score, 10);
    assert!(result.user_allergies_detected);
    assert_eq!(result.recommendations[0], CRITICAL_WARNING);
    assert_eq!(result.food_name, "Unknown Food");
    assert_eq!(result.ingredients_analyzed, vec!["wheat flour", "sugar", "almonds"]);
}

#[tokio::test]
async fn test_no_keywords_is_all_clear() {
    let engine = engine_with(None);
    let result = engine
        .analyze(&request(&["sugar", "salt", "water"]), &profile(&["milk"]))
        .await;

    assert_eq!(result.safety_score, 100);
    assert!(result.allergens_detected.is_empty());
    assert_eq!(result.recommendations[0], ALL_CLEAR);
    assert!(!result.user_allergies_detected);
}

#[tokio::test]
async fn test_score_stays_in_range_with_many_allergens() {
    let engine = engine_with(None);
    let everything = request(&[
        "milk, egg, salmon, shrimp, almond, peanut, wheat, soy",
    ]);
    let result = engine
        .analyze(&everything, &profile(&["milk", "eggs", "fish", "peanuts"]))
        .await;

    assert_eq!(result.allergens_detected.len(), 8);
    assert_eq!(result.safety_score, 0);
}

#[tokio::test]
async fn test_allergen_reported_once() {
    let engine = engine_with(None);
    let result = engine
        .analyze(&request(&["milk", "butter", "cream cheese"]), &UserAllergyProfile::default())
        .await;

    assert_eq!(result.allergens_detected.len(), 1);
    assert_eq!(result.allergens_detected[0].allergen, "milk");
    assert_eq!(result.allergens_detected[0].source, "milk");
    assert_eq!(result.safety_score, 75);
    assert_eq!(result.recommendations[0], GENERAL_CAUTION);
}

#[tokio::test]
async fn test_user_flag_is_penalized_harder() {
    let engine = engine_with(None);
    let ingredients = request(&["peanut oil"]);
    let flagged = engine.analyze(&ingredients, &profile(&["peanuts"])).await;
    let unflagged = engine.analyze(&ingredients, &profile(&["milk"])).await;

    assert!(flagged.safety_score < unflagged.safety_score);
    assert_eq!(flagged.safety_score, 25);
    assert_eq!(unflagged.safety_score, 75);
}

#[tokio::test]
async fn test_enrichment_never_changes_deterministic_fields() {
    let ingredients = request(&["wheat flour", "soy lecithin"]);
    let user = profile(&["wheat"]);

    let plain = engine_with(None).analyze(&ingredients, &user).await;
    let enriched = engine_with(Some(Stub::Answers("Try rice flour instead.")))
        .analyze(&ingredients, &user)
        .await;
    let failed = engine_with(Some(Stub::Fails)).analyze(&ingredients, &user).await;
    let timed_out = engine_with(Some(Stub::Hangs)).analyze(&ingredients, &user).await;

    for result in [&enriched, &failed, &timed_out] {
        assert_eq!(result.safety_score, plain.safety_score);
        assert_eq!(result.allergens_detected, plain.allergens_detected);
        assert_eq!(result.recommendations, plain.recommendations);
    }

    assert!(enriched.ai_enhanced);
    assert_eq!(enriched.ai_insights.as_deref(), Some("Try rice flour instead."));
    assert!(!failed.ai_enhanced);
    assert!(failed.ai_insights.is_none());
    assert!(!timed_out.ai_enhanced);
}

#[tokio::test]
async fn test_ai_insights_omitted_from_json_when_absent() {
    let result = engine_with(None).analyze(&request(&["rice"]), &UserAllergyProfile::default()).await;
    let value = serde_json::to_value(&result).unwrap();
    assert!(value.get("ai_insights").is_none());
    assert_eq!(value["analysis_method"], "enhanced_pattern_matching");
}

#[tokio::test]
async fn test_analyze_json_rejects_bad_bodies() {
    let engine = engine_with(None);
    let user = UserAllergyProfile::default();

    let missing = engine.analyze_json(&json!({"food_name": "toast"}), &user).await;
    assert!(matches!(missing, Err(EngineError::InvalidInput(_))));

    let wrong_type = engine.analyze_json(&json!({"ingredients": "bread"}), &user).await;
    assert!(matches!(wrong_type, Err(EngineError::InvalidInput(_))));

    let ok = engine
        .analyze_json(&json!({"ingredients": ["bread"], "food_name": "Toast"}), &user)
        .await
        .unwrap();
    assert_eq!(ok.food_name, "Toast");
    assert_eq!(ok.allergens_detected[0].allergen, "wheat");
}

#[tokio::test]
async fn test_milk_plan() {
    let plan = engine_with(None).generate_plan(&profile(&["milk"])).await;
    assert!(plan.restrictions.contains(&"milk".to_string()));
    assert!(plan.alternatives.contains(&"oat milk".to_string()));
    assert!(!plan.meal_plan.is_empty());
    assert!(!plan.ai_enhanced);
}

#[tokio::test]
async fn test_unknown_allergy_plan() {
    let plan = engine_with(None).generate_plan(&profile(&["unicorn-dust"])).await;
    assert_eq!(plan.restrictions, vec!["all unicorn-dust products".to_string()]);
    assert!(plan.alternatives.is_empty());
    assert!(plan.meal_plan.is_empty());
}

#[tokio::test]
async fn test_plan_enrichment_is_prepended_card() {
    let user = profile(&["eggs"]);
    let plain = engine_with(None).generate_plan(&user).await;
    let enriched = engine_with(Some(Stub::Answers("Bake with aquafaba.")))
        .generate_plan(&user)
        .await;

    assert!(enriched.ai_enhanced);
    assert_eq!(enriched.restrictions, plain.restrictions);
    assert_eq!(enriched.meal_plan, plain.meal_plan);
    assert_eq!(enriched.guidance.len(), plain.guidance.len() + 1);
    assert!(enriched.guidance[0].description.starts_with(AI_DISCLAIMER));
}

#[tokio::test]
async fn test_empty_profile_gets_generic_plan() {
    let plan = engine_with(None).generate_plan(&UserAllergyProfile::default()).await;
    assert_eq!(plan.meal_plan.len(), 2);
    assert!(!plan.restrictions.is_empty());
}

#[tokio::test]
async fn test_reply_requires_message() {
    let engine = engine_with(None);
    let empty = engine.reply("   ", &UserAllergyProfile::default(), None).await;
    assert!(matches!(empty, Err(EngineError::InvalidInput(_))));

    let reply = engine
        .reply("What should I do about a severe reaction?", &profile(&["shellfish"]), None)
        .await
        .unwrap();
    assert!(!reply.ai_powered);
    assert!(reply.response.contains("EMERGENCY"));
}

#[test]
fn test_food_safety_and_alternatives() {
    let engine = engine_with(None);
    let user = profile(&["milk"]);
    assert!(!engine.check_food_safety("Vanilla ice cream", &user));
    assert!(engine.check_food_safety("Apple slices", &user));
    assert!(engine.safe_alternatives("dairy").contains(&"oat milk".to_string()));
    assert!(engine.safe_alternatives("unicorn-dust").is_empty());
}

#[tokio::test]
async fn test_identical_inputs_give_identical_results() {
    let engine = engine_with(None);
    let ingredients = request(&["wheat flour", "milk powder", "hazelnut paste"]);
    let user = profile(&["milk", "nuts"]);

    let first = engine.analyze(&ingredients, &user).await;
    let second = engine.analyze(&ingredients, &user).await;
    assert_eq!(first.safety_score, second.safety_score);
    assert_eq!(first.allergens_detected, second.allergens_detected);
    assert_eq!(first.recommendations, second.recommendations);
    assert_eq!(first.alternatives, second.alternatives);

    let plan_a = engine.generate_plan(&user).await;
    let plan_b = engine.generate_plan(&user).await;
    assert_eq!(plan_a.restrictions, plan_b.restrictions);
    assert_eq!(plan_a.meal_plan, plan_b.meal_plan);
}

#[tokio::test]
async fn test_deserialized_profile_ignores_blank_names() {
    let user: UserAllergyProfile = serde_json::from_value(json!(["", "   ", "soy"])).unwrap();
    let plan = engine_with(None).generate_plan(&user).await;
    assert!(plan.restrictions.iter().all(|r| !r.starts_with("all ")));
    assert!(plan.restrictions.contains(&"tofu".to_string()));
}
