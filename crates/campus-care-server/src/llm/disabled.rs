// crates/campus-care-server/src/llm/disabled.rs
// Stand-in client used when no provider key is configured

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::provider::{LlmClient, Provider};
use super::{ChatResult, Message};

/// Fails every call, so non-crisis turns get the fallback reply while the
/// crisis gate keeps working.
#[derive(Debug, Clone, Default)]
pub struct DisabledClient {
    reason: String,
}

impl DisabledClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LlmClient for DisabledClient {
    async fn chat(&self, _messages: Vec<Message>) -> Result<ChatResult> {
        bail!("LLM provider disabled: {}", self.reason)
    }

    fn provider_type(&self) -> Option<Provider> {
        None
    }

    fn model_name(&self) -> String {
        "disabled".to_string()
    }
}
