use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: i64,
    pub temperature: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl ChatCompletionRequest {
    /// Builds the single-turn request. `presence_penalty` is filled from the
    /// frequency penalty; `cfg.presence_penalty` does not reach the wire.
    pub fn new(cfg: &Config, prompt: impl Into<String>) -> Self {
        Self {
            model: cfg.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature as f32,
            frequency_penalty: cfg.frequency_penalty as f32,
            presence_penalty: cfg.frequency_penalty as f32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub object: Option<String>,
    pub created: Option<i64>,
    pub model: Option<String>,
    pub usage: Option<Usage>,
    pub choices: Option<Vec<Choice>>,
    pub error: Option<ApiErrorBody>,
}

impl ChatCompletionResponse {
    pub fn choices(&self) -> &[Choice] {
        self.choices.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
    pub finish_reason: Option<String>,
    pub index: Option<u32>,
}

impl Choice {
    pub fn content(&self) -> &str {
        self.message
            .as_ref()
            .and_then(|message| message.content.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChoiceMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub code: Option<ApiErrorCode>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// The API documents a numeric code, but live responses also send strings
/// such as `"invalid_api_key"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorCode {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(code) => write!(f, "{code}"),
            Self::Text(code) => write!(f, "{code}"),
        }
    }
}
