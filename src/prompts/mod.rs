//! Prompt chains for summarization and language detection.
//!
//! Each chain is a pure function from user text (plus locale, where relevant)
//! to an ordered list of role-tagged messages with fixed few-shot exemplars.
//! The payload serializes to the `messages` / `temperature` fields of an
//! OpenAI-style chat completion request.

mod chains;

pub use chains::{
    chain_lang_detect, chain_summary_agent_name, chain_summary_description,
    chain_summary_generation_title, chain_summary_tags, PromptChain,
};

use serde::{Deserialize, Serialize};

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// User turn
    User,
    /// Assistant turn
    Assistant,
}

/// Single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message content
    pub content: String,
    /// Author role
    pub role: Role,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::System,
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::User,
        }
    }

    /// Assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::Assistant,
        }
    }
}

/// Partial chat request produced by a prompt chain
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatPayload {
    /// Ordered messages
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature, when the chain pins one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatPayload {
    /// Payload with messages only
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
        }
    }

    /// Pin the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Last message, i.e. the one carrying the caller's text
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// Generation modality for title summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Image generation
    Image,
    /// Video generation
    Video,
}

impl Modality {
    /// Lowercase name used inside prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" | "img" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(format!("Unknown modality: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_payload_serialization() {
        let payload = ChatPayload::new(vec![ChatMessage::system("hi")]);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"messages": [{"content": "hi", "role": "system"}]})
        );

        let json = serde_json::to_value(payload.with_temperature(0.0)).unwrap();
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn test_modality_from_str() {
        assert_eq!(Modality::from_str("Image").unwrap(), Modality::Image);
        assert_eq!(Modality::from_str("video").unwrap(), Modality::Video);
        assert!(Modality::from_str("audio").is_err());
    }
}
