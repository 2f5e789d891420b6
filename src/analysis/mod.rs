//! Ingredient analysis: tokens in, a scored safety assessment out.

pub mod matcher;
pub mod recommendations;
pub mod scoring;
pub mod tokenizer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, Result};
use crate::profile::UserAllergyProfile;
pub use matcher::{AllergenDetection, IngredientMatcher};
pub use tokenizer::{clean_ingredients, parse_ingredients_text};

pub const ANALYSIS_METHOD: &str = "enhanced_pattern_matching";
pub const DEFAULT_FOOD_NAME: &str = "Unknown Food";

/// The deterministic part of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub score: u8,
    pub detections: Vec<AllergenDetection>,
    pub user_match: bool,
    pub recommendations: Vec<String>,
    pub alternatives: Vec<String>,
}

pub fn assess(matcher: &IngredientMatcher, tokens: &[String], profile: &UserAllergyProfile) -> SafetyAssessment {
    let detections = matcher.detect(tokens, profile);
    let score = scoring::safety_score(&detections);
    let user_match = scoring::user_match(&detections);
    let recommendations = recommendations::compose_recommendations(&detections, user_match);
    let alternatives = recommendations::collect_alternatives(&detections, matcher.knowledge_base());

    SafetyAssessment {
        score,
        detections,
        user_match,
        recommendations,
        alternatives,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
}

impl AnalysisRequest {
    pub fn new(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            ..Default::default()
        }
    }

    pub fn with_food_name(mut self, food_name: impl Into<String>) -> Self {
        self.food_name = Some(food_name.into());
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Validates a raw request body. `ingredients` must be present and be an array
    /// of strings; anything else is rejected before any analysis runs.
    pub fn from_json(body: &Value) -> Result<Self> {
        let fields = body
            .as_object()
            .ok_or_else(|| EngineError::InvalidInput("request body must be a JSON object".to_string()))?;

        let ingredients = match fields.get("ingredients") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        EngineError::InvalidInput(format!("ingredient at index {} is not a string", idx))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            _ => {
                return Err(EngineError::InvalidInput(
                    "Ingredients array is required".to_string(),
                ))
            }
        };

        let optional_string = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            ingredients,
            food_name: optional_string("food_name"),
            user_id: optional_string("user_id"),
            barcode: optional_string("barcode"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub food_name: String,
    #[serde(default)]
    pub barcode: Option<String>,
    pub allergens_detected: Vec<AllergenDetection>,
    pub ingredients_analyzed: Vec<String>,
    pub safety_score: u8,
    pub recommendations: Vec<String>,
    pub alternatives: Vec<String>,
    pub user_allergies_detected: bool,
    pub ai_enhanced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,
    pub analysis_method: String,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn from_assessment(
        request: &AnalysisRequest,
        ingredients_analyzed: Vec<String>,
        assessment: SafetyAssessment,
        ai_insights: Option<String>,
    ) -> Self {
        Self {
            food_name: request
                .food_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_FOOD_NAME)
                .to_string(),
            barcode: request.barcode.clone(),
            allergens_detected: assessment.detections,
            ingredients_analyzed,
            safety_score: assessment.score,
            recommendations: assessment.recommendations,
            alternatives: assessment.alternatives,
            user_allergies_detected: assessment.user_match,
            ai_enhanced: ai_insights.is_some(),
            ai_insights,
            analysis_method: ANALYSIS_METHOD.to_string(),
            analyzed_at: Utc::now(),
        }
    }
}
