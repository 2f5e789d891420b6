//! Optional enrichment from external text-generation services.
//!
//! Enrichment never affects scores, detections or restrictions. Every failure
//! (missing key, network error, bad status, empty text, timeout) collapses into
//! `None` and the caller keeps its deterministic result.

pub mod prompts;

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::api_connection::{ApiConnectionError, GenerationSettings, Provider};

/// Prefix placed in front of generated text wherever it is shown to a user.
pub const AI_DISCLAIMER: &str =
    "AI-generated guidance (not medical advice; always follow your allergist's instructions)";

#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    async fn generate(&self, prompt: &str) -> Result<String, ApiConnectionError>;

    fn name(&self) -> &str;
}

/// A [`TextGenerator`] backed by one of the HTTP providers.
#[derive(Debug)]
pub struct ProviderGenerator {
    provider: Provider,
    client: Client,
    settings: GenerationSettings,
}

impl ProviderGenerator {
    pub fn new(provider: Provider, settings: GenerationSettings) -> Self {
        Self {
            provider,
            client: Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl TextGenerator for ProviderGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ApiConnectionError> {
        self.provider
            .generate_text(&self.client, prompt, self.settings)
            .await
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}

/// Tries each generator in order until one produces non-blank text.
///
/// The whole attempt, across all generators, is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct EnrichmentAdapter {
    generators: Vec<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl EnrichmentAdapter {
    pub fn new(generators: Vec<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { generators, timeout }
    }

    pub fn disabled() -> Self {
        Self::new(Vec::new(), Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.generators.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn enrich(&self, prompt: &str) -> Option<String> {
        if self.generators.is_empty() {
            return None;
        }

        // A timeout too large to represent as an instant means no deadline.
        let deadline = Instant::now().checked_add(self.timeout);
        for generator in &self.generators {
            let attempt = generator.generate(prompt);
            let outcome = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, attempt).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        let e = ApiConnectionError::Timeout(self.timeout);
                        tracing::warn!(provider = generator.name(), error = %e, "Enrichment abandoned");
                        return None;
                    }
                },
                None => attempt.await,
            };

            match outcome {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::debug!(provider = generator.name(), "Enrichment succeeded");
                    return Some(text.trim().to_string());
                }
                Ok(_) => {
                    tracing::warn!(provider = generator.name(), "Enrichment returned blank text");
                }
                Err(e) => {
                    tracing::warn!(provider = generator.name(), error = %e, "Enrichment unavailable");
                }
            }
        }
        None
    }
}
