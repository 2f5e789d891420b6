use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::time::Duration;
use thiserror::Error;

use super::endpoints::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, InferenceParameters, InferenceRequest,
    InferenceResponse, Provider, HUGGINGFACE_INFERENCE_URL, OPENROUTER_CHAT_URL,
};

/// Why a call to a text-generation service produced nothing usable.
#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },

    #[error("API returned no usable text")]
    EmptyResponse,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

/// Sampling settings shared by both providers.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSettings {
    pub max_length: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_length: 500,
            temperature: 0.1,
        }
    }
}

fn non_empty(text: Option<&str>) -> Result<String, ApiConnectionError> {
    match text.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApiConnectionError::EmptyResponse),
    }
}

impl Provider {
    pub fn openrouter(api_key_env_var_name: &str, model: &str) -> Self {
        dotenv().ok();
        Self::OpenRouter {
            api_key: api_key_env_var_name.to_string(),
            model: model.to_string(),
        }
    }

    pub fn huggingface(api_token_env_var_name: Option<&str>, model: &str) -> Self {
        Self::HuggingFace {
            api_token: api_token_env_var_name.map(str::to_string),
            model: model.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenRouter { .. } => "openrouter",
            Provider::HuggingFace { .. } => "huggingface",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::OpenRouter { model, .. } | Provider::HuggingFace { model, .. } => model,
        }
    }

    /// Sends `prompt` and returns the trimmed generated text.
    ///
    /// Whitespace-only output is reported as [`ApiConnectionError::EmptyResponse`].
    pub async fn generate_text(
        &self,
        client: &Client,
        prompt: &str,
        settings: GenerationSettings,
    ) -> Result<String, ApiConnectionError> {
        match self {
            Provider::OpenRouter {
                api_key: api_key_env_var_name,
                model,
            } => {
                dotenv().ok();
                let actual_api_key = env::var(api_key_env_var_name)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))?;

                let request = ChatCompletionRequest {
                    model: model.clone(),
                    messages: vec![
                        ChatMessage {
                            role: "system".to_string(),
                            content: "You are an allergy-aware dietary assistant. Keep answers short and practical, and never claim medical certainty.".to_string(),
                        },
                        ChatMessage {
                            role: "user".to_string(),
                            content: prompt.to_string(),
                        },
                    ],
                    temperature: Some(settings.temperature),
                    max_tokens: Some(settings.max_length),
                };

                let site_url = env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
                let app_name = env::var("APP_NAME").unwrap_or_else(|_| "AllergyGuard".to_string());

                let response = client
                    .post(OPENROUTER_CHAT_URL)
                    .bearer_auth(actual_api_key)
                    .header("HTTP-Referer", site_url)
                    .header("X-Title", app_name)
                    .json(&request)
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(api_error(response).await);
                }
                let chat_response = response.json::<ChatCompletionResponse>().await?;
                non_empty(chat_response.first_content())
            }
            Provider::HuggingFace { api_token, model } => {
                let request = InferenceRequest {
                    inputs: prompt.to_string(),
                    parameters: InferenceParameters {
                        max_length: settings.max_length,
                        temperature: settings.temperature,
                        return_full_text: false,
                    },
                };

                let mut builder = client
                    .post(format!("{}/{}", HUGGINGFACE_INFERENCE_URL, model))
                    .json(&request);
                if let Some(token) = api_token.as_deref().and_then(|name| env::var(name).ok()) {
                    builder = builder.bearer_auth(token);
                }
                let response = builder.send().await?;

                if !response.status().is_success() {
                    return Err(api_error(response).await);
                }
                let body = response.text().await?;
                let inference: InferenceResponse = serde_json::from_str(&body)?;
                non_empty(inference.generated_text())
            }
        }
    }
}

async fn api_error(response: reqwest::Response) -> ApiConnectionError {
    let status = response.status();
    let error_body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    ApiConnectionError::ApiError { status, error_body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert!(matches!(non_empty(Some("  \n ")), Err(ApiConnectionError::EmptyResponse)));
        assert!(matches!(non_empty(None), Err(ApiConnectionError::EmptyResponse)));
        assert_eq!(non_empty(Some(" ok ")).unwrap(), "ok");
    }

    #[test]
    fn test_provider_metadata() {
        let provider = Provider::huggingface(None, "microsoft/DialoGPT-medium");
        assert_eq!(provider.name(), "huggingface");
        assert_eq!(provider.model(), "microsoft/DialoGPT-medium");
    }
}
