// crates/campus-care-server/src/llm/http_client.rs
// Shared HTTP client configuration for completion providers

use anyhow::{Result, anyhow};
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Default request timeout
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Longest provider error body kept in the error message
const MAX_ERROR_BODY_CHARS: usize = 500;

/// HTTP client for provider calls. One attempt per call: a failed chat turn
/// is answered with the fallback reply, never retried.
pub struct LlmHttpClient {
    client: Client,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for LlmHttpClient {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }
}

impl LlmHttpClient {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            request_timeout,
            connect_timeout,
        }
    }

    /// POST a JSON body with Bearer auth and return the response body on 2xx
    pub async fn post_json(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(request_id = %request_id, error = %e, timeout = e.is_timeout(), "Provider request failed");
                anyhow!("Request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let error_body: String = error_body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!(request_id = %request_id, status = %status, error = %error_body, "Provider returned error status");
            return Err(anyhow!("API error {}: {}", status, error_body));
        }

        Ok(response.text().await?)
    }
}
