// crates/campus-care-server/src/llm/provider.rs
// LLM provider abstraction layer

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ChatResult, Message};

/// Supported chat-completion providers, all spoken to over the OpenAI wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    DeepSeek,
    Gemini,
}

impl Provider {
    /// Parse provider from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "deepseek" => Some(Self::DeepSeek),
            "gemini" | "google" => Some(Self::Gemini),
            _ => None,
        }
    }

    /// Environment variables holding this provider's API key, in lookup order
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            Self::OpenAi => &["OPENAI_API_KEY"],
            Self::DeepSeek => &["DEEPSEEK_API_KEY"],
            Self::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        }
    }

    /// Default model for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::DeepSeek => "deepseek-chat",
            Self::Gemini => "gemini-2.0-flash",
        }
    }

    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::DeepSeek => "https://api.deepseek.com",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        }
    }

    /// Display name used in logs
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::DeepSeek => "DeepSeek",
            Self::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::DeepSeek => write!(f, "deepseek"),
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

/// Trait for LLM clients - "send prompt, get text"
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a chat completion request
    async fn chat(&self, messages: Vec<Message>) -> Result<ChatResult>;

    /// Get the provider type, if backed by a real provider
    fn provider_type(&self) -> Option<Provider>;

    /// Get the model name used by this client
    fn model_name(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Provider::from_str("OpenAI"), Some(Provider::OpenAi));
        assert_eq!(Provider::from_str(" deepseek "), Some(Provider::DeepSeek));
        assert_eq!(Provider::from_str("google"), Some(Provider::Gemini));
        assert_eq!(Provider::from_str("ollama"), None);
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for p in [Provider::OpenAi, Provider::DeepSeek, Provider::Gemini] {
            assert_eq!(Provider::from_str(&p.to_string()), Some(p));
        }
    }

    #[test]
    fn test_base_urls_have_no_trailing_slash() {
        for p in [Provider::OpenAi, Provider::DeepSeek, Provider::Gemini] {
            assert!(!p.default_base_url().ends_with('/'));
            assert!(!p.api_key_env_vars().is_empty());
        }
    }
}
