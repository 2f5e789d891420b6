use serde::{Deserialize, Serialize};

pub const OPENROUTER_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const HUGGINGFACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

pub const DEFAULT_OPENROUTER_MODEL: &str = "qwen/qwen3-32b";
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "microsoft/DialoGPT-medium";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    OpenRouter {
        /// Name of the environment variable holding the key, not the key itself.
        api_key: String,
        model: String,
    },
    HuggingFace {
        /// Optional token variable; the public inference endpoint also works anonymously.
        api_token: Option<String>,
        model: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponseMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
    pub index: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
}

impl ChatCompletionResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct InferenceParameters {
    pub max_length: u32,
    pub temperature: f32,
    pub return_full_text: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: InferenceParameters,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratedText {
    #[serde(default)]
    pub generated_text: Option<String>,
}

/// The inference API answers either with one object or with a list of them.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum InferenceResponse {
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

impl InferenceResponse {
    pub fn generated_text(&self) -> Option<&str> {
        match self {
            InferenceResponse::Single(item) => item.generated_text.as_deref(),
            InferenceResponse::Batch(items) => items.first().and_then(|item| item.generated_text.as_deref()),
        }
    }
}
