// crates/campus-care-server/src/llm/client.rs
// OpenAI-compatible chat-completion client (OpenAI, DeepSeek, Gemini)

use crate::llm::http_client::LlmHttpClient;
use crate::llm::openai_compat::{ChatRequest, parse_chat_response};
use crate::llm::provider::{LlmClient, Provider};
use crate::llm::{ChatResult, Message};
use anyhow::Result;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

/// Client for any endpoint speaking `POST /chat/completions`
pub struct OpenAiCompatClient {
    provider: Provider,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
    http: LlmHttpClient,
}

impl OpenAiCompatClient {
    /// Client with the provider's default model and URL
    pub fn new(provider: Provider, api_key: String) -> Self {
        Self {
            provider,
            api_key,
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
            max_tokens: 300,
            temperature: 0.7,
            http: LlmHttpClient::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound the reply length and sampling temperature
    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let connect = timeout.min(self.http.connect_timeout);
        self.http = LlmHttpClient::new(timeout, connect);
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatClient {
    #[instrument(skip(self, messages), fields(request_id, provider = %self.provider, model = %self.model, message_count = messages.len()))]
    async fn chat(&self, messages: Vec<Message>) -> Result<ChatResult> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        let provider_name = self.provider.display_name();

        Span::current().record("request_id", request_id.as_str());

        info!(
            request_id = %request_id,
            message_count = messages.len(),
            model = %self.model,
            "Starting {} chat request", provider_name
        );

        let request = ChatRequest::new(&self.model, messages)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let body = serde_json::to_string(&request)?;
        debug!(request_id = %request_id, bytes = body.len(), "{} request built", provider_name);

        let response_body = self
            .http
            .post_json(&request_id, &self.endpoint(), &self.api_key, body)
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let result = parse_chat_response(&response_body, &request_id, duration_ms)?;

        if let Some(ref u) = result.usage {
            info!(
                request_id = %request_id,
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "{} usage stats", provider_name
            );
        }
        info!(
            request_id = %request_id,
            duration_ms,
            content_len = result.content.as_ref().map_or(0, |c| c.len()),
            "{} chat complete", provider_name
        );

        Ok(result)
    }

    fn provider_type(&self) -> Option<Provider> {
        Some(self.provider)
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
