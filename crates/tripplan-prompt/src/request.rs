//! Chat-completion request body
use crate::days::infer_days;
use crate::instructions::{compose_user_prompt, system_instruction, PromptMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Sampling settings for the upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// Build the request for a user prompt. Trip length is read from the
/// prompt itself.
pub fn build_chat_request(prompt: &str, mode: PromptMode, options: &ChatOptions) -> ChatRequest {
    let days = infer_days(prompt);

    ChatRequest {
        model: options.model.clone(),
        messages: vec![
            ChatMessage::system(system_instruction()),
            ChatMessage::user(compose_user_prompt(prompt, mode, days)),
        ],
        temperature: options.temperature,
        max_tokens: options.max_tokens,
    }
}
