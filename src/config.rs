use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::api_connection::endpoints::{DEFAULT_HUGGINGFACE_MODEL, DEFAULT_OPENROUTER_MODEL};
use crate::api_connection::{GenerationSettings, Provider};
use crate::dietary_plan::DEFAULT_ITEMS_PER_DAY;
use crate::enrichment::{EnrichmentAdapter, ProviderGenerator, TextGenerator};

pub const PROVIDERS_ENV_VAR: &str = "ALLERGY_ENRICHMENT_PROVIDERS";
pub const TIMEOUT_ENV_VAR: &str = "ALLERGY_ENRICHMENT_TIMEOUT_SECS";
pub const OPENROUTER_API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
pub const OPENROUTER_MODEL_ENV_VAR: &str = "ALLERGY_OPENROUTER_MODEL";
pub const HF_MODEL_ENV_VAR: &str = "ALLERGY_HF_MODEL";
pub const HF_TOKEN_ENV_VAR: &str = "HF_API_TOKEN";
pub const KNOWLEDGE_BASE_ENV_VAR: &str = "ALLERGY_KNOWLEDGE_BASE";
pub const ITEMS_PER_DAY_ENV_VAR: &str = "ALLERGY_PLAN_ITEMS_PER_DAY";

pub const DEFAULT_ENRICHMENT_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenRouter,
    HuggingFace,
}

impl ProviderKind {
    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "openrouter" => Some(ProviderKind::OpenRouter),
            "huggingface" | "hf" => Some(ProviderKind::HuggingFace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentConfig {
    /// Tried in this order; empty disables enrichment.
    pub providers: Vec<ProviderKind>,
    pub timeout: Duration,
    pub openrouter_model: String,
    pub huggingface_model: String,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_ENRICHMENT_TIMEOUT_SECS),
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            huggingface_model: DEFAULT_HUGGINGFACE_MODEL.to_string(),
        }
    }
}

impl EnrichmentConfig {
    pub fn build_adapter(&self) -> EnrichmentAdapter {
        let settings = GenerationSettings::default();
        let generators: Vec<Arc<dyn TextGenerator>> = self
            .providers
            .iter()
            .map(|kind| {
                let provider = match kind {
                    ProviderKind::OpenRouter => {
                        Provider::openrouter(OPENROUTER_API_KEY_ENV_VAR, &self.openrouter_model)
                    }
                    ProviderKind::HuggingFace => {
                        Provider::huggingface(Some(HF_TOKEN_ENV_VAR), &self.huggingface_model)
                    }
                };
                Arc::new(ProviderGenerator::new(provider, settings)) as Arc<dyn TextGenerator>
            })
            .collect();
        EnrichmentAdapter::new(generators, self.timeout)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub knowledge_base_path: Option<PathBuf>,
    pub plan_items_per_day: usize,
    pub enrichment: EnrichmentConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            knowledge_base_path: None,
            plan_items_per_day: DEFAULT_ITEMS_PER_DAY,
            enrichment: EnrichmentConfig::default(),
        }
    }
}

/// Parses an ordered provider list such as `"openrouter, huggingface"`.
/// `none`, blanks and unknown names are skipped.
pub fn parse_provider_list(raw: &str) -> Vec<ProviderKind> {
    raw.split(',')
        .filter(|name| !name.trim().is_empty() && !name.trim().eq_ignore_ascii_case("none"))
        .filter_map(|name| {
            let kind = ProviderKind::parse(name);
            if kind.is_none() {
                tracing::warn!(provider = name.trim(), "Ignoring unknown enrichment provider");
            }
            kind
        })
        .collect()
}

impl EngineConfig {
    /// Reads `.env` and the process environment. Malformed numbers fall back to
    /// their defaults.
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        let providers = env::var(PROVIDERS_ENV_VAR)
            .map(|raw| parse_provider_list(&raw))
            .unwrap_or_default();
        let timeout = env::var(TIMEOUT_ENV_VAR)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.enrichment.timeout);

        Self {
            knowledge_base_path: env::var(KNOWLEDGE_BASE_ENV_VAR)
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            plan_items_per_day: env::var(ITEMS_PER_DAY_ENV_VAR)
                .ok()
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.plan_items_per_day),
            enrichment: EnrichmentConfig {
                providers,
                timeout,
                openrouter_model: env::var(OPENROUTER_MODEL_ENV_VAR)
                    .unwrap_or(defaults.enrichment.openrouter_model),
                huggingface_model: env::var(HF_MODEL_ENV_VAR)
                    .unwrap_or(defaults.enrichment.huggingface_model),
            },
        }
    }
}
