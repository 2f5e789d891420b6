use serde_json::Value;
use std::sync::Arc;

use crate::analysis::{self, clean_ingredients, AnalysisRequest, AnalysisResult, IngredientMatcher};
use crate::assistant::{classify_message, topic_response, AssistantReply};
use crate::config::EngineConfig;
use crate::dietary_plan::{DietaryPlan, PlanGenerator};
use crate::enrichment::{prompts, EnrichmentAdapter};
use crate::error::{EngineError, Result};
use crate::knowledge::KnowledgeBase;
use crate::profile::UserAllergyProfile;

/// Entry point tying the knowledge base, matcher, plan generator and optional
/// enrichment together. Cheap to clone; all shared state is read-only.
#[derive(Debug, Clone)]
pub struct AllergyEngine {
    knowledge_base: Arc<KnowledgeBase>,
    matcher: Arc<IngredientMatcher>,
    enrichment: EnrichmentAdapter,
    plan_items_per_day: usize,
}

impl AllergyEngine {
    pub fn new(
        knowledge_base: Arc<KnowledgeBase>,
        enrichment: EnrichmentAdapter,
        plan_items_per_day: usize,
    ) -> Result<Self> {
        let matcher = IngredientMatcher::new(Arc::clone(&knowledge_base))?;
        Ok(Self {
            knowledge_base,
            matcher: Arc::new(matcher),
            enrichment,
            plan_items_per_day,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let knowledge_base = match &config.knowledge_base_path {
            Some(path) => KnowledgeBase::from_json_file(path)?,
            None => KnowledgeBase::builtin()?,
        };
        Self::new(
            Arc::new(knowledge_base),
            config.enrichment.build_adapter(),
            config.plan_items_per_day,
        )
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    fn plan_generator(&self) -> PlanGenerator<'_> {
        PlanGenerator::new(&self.knowledge_base, self.plan_items_per_day)
    }

    /// Deterministic analysis only; never touches the network.
    pub fn analyze_local(&self, request: &AnalysisRequest, profile: &UserAllergyProfile) -> AnalysisResult {
        let tokens = clean_ingredients(&request.ingredients);
        let assessment = analysis::assess(&self.matcher, &tokens, profile);
        AnalysisResult::from_assessment(request, tokens, assessment, None)
    }

    /// Runs the deterministic analysis alongside the (time-bounded) enrichment call.
    pub async fn analyze(&self, request: &AnalysisRequest, profile: &UserAllergyProfile) -> AnalysisResult {
        let tokens = clean_ingredients(&request.ingredients);
        let prompt = prompts::analysis_prompt(&tokens, profile);

        let (assessment, insight) = tokio::join!(
            async { analysis::assess(&self.matcher, &tokens, profile) },
            self.enrichment.enrich(&prompt)
        );
        let result = AnalysisResult::from_assessment(request, tokens, assessment, insight);

        tracing::info!(
            food_name = %result.food_name,
            allergens_detected = result.allergens_detected.len(),
            safety_score = result.safety_score,
            ai_enhanced = result.ai_enhanced,
            user_allergies_detected = result.user_allergies_detected,
            "Food analysis completed"
        );
        result
    }

    /// Validates a raw JSON request body, then analyzes it.
    pub async fn analyze_json(&self, body: &Value, profile: &UserAllergyProfile) -> Result<AnalysisResult> {
        let request = AnalysisRequest::from_json(body)?;
        Ok(self.analyze(&request, profile).await)
    }

    pub fn generate_plan_local(&self, profile: &UserAllergyProfile) -> DietaryPlan {
        self.plan_generator().generate(profile)
    }

    pub async fn generate_plan(&self, profile: &UserAllergyProfile) -> DietaryPlan {
        let prompt = prompts::plan_prompt(profile);
        let (plan, insight) = tokio::join!(
            async { self.generate_plan_local(profile) },
            self.enrichment.enrich(&prompt)
        );
        let plan = match insight {
            Some(insight) => plan.with_ai_insight(insight),
            None => plan,
        };

        tracing::info!(
            allergies = profile.allergies().len(),
            restrictions = plan.restrictions.len(),
            ai_enhanced = plan.ai_enhanced,
            "Dietary plan generated"
        );
        plan
    }

    pub async fn reply(
        &self,
        message: &str,
        profile: &UserAllergyProfile,
        name: Option<&str>,
    ) -> Result<AssistantReply> {
        if message.trim().is_empty() {
            return Err(EngineError::InvalidInput("Message is required".to_string()));
        }

        let topic = classify_message(message);
        let reply = AssistantReply::new(topic, topic_response(topic, profile, name));
        let insight = self
            .enrichment
            .enrich(&prompts::assistant_prompt(message, profile))
            .await;

        Ok(match insight {
            Some(insight) => reply.with_ai_insight(&insight),
            None => reply,
        })
    }

    pub fn check_food_safety(&self, food_item: &str, profile: &UserAllergyProfile) -> bool {
        self.plan_generator().check_food_safety(food_item, profile)
    }

    pub fn safe_alternatives(&self, allergy: &str) -> Vec<String> {
        self.knowledge_base.safe_alternatives(allergy).to_vec()
    }
}
