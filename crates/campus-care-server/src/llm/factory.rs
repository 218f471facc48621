// crates/campus-care-server/src/llm/factory.rs
// Build the configured completion client

use crate::config::{CareConfig, LlmSettings};
use crate::llm::client::OpenAiCompatClient;
use crate::llm::disabled::DisabledClient;
use crate::llm::provider::LlmClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Create the chat client. Priority for provider and model: config file,
/// then environment, then provider defaults. The key always belongs to the
/// chosen provider. Without one the disabled client is returned so the
/// server still starts.
pub fn build_client(settings: &LlmSettings, file: &CareConfig) -> Arc<dyn LlmClient> {
    if settings.disabled {
        info!("LLM disabled by configuration");
        return Arc::new(DisabledClient::new("disabled by CAMPUS_CARE_DISABLE_LLM"));
    }

    let provider = file.provider().unwrap_or_else(|| settings.provider_or_default());

    let Some(api_key) = settings.key_for(provider) else {
        let vars = provider.api_key_env_vars().join(" or ");
        warn!(provider = %provider, "No API key configured ({}), chat replies will use the fallback message", vars);
        return Arc::new(DisabledClient::new(format!("no API key for {}", provider)));
    };

    let mut client = OpenAiCompatClient::new(provider, api_key)
        .with_sampling(settings.max_tokens, settings.temperature)
        .with_timeout(Duration::from_secs(settings.timeout_secs.max(1)));

    if let Some(model) = file.llm.model.as_ref().or(settings.model.as_ref()) {
        client = client.with_model(model.clone());
    }
    if let Some(ref base_url) = settings.base_url {
        client = client.with_base_url(base_url.clone());
    }

    info!(
        provider = %provider,
        model = %client.model_name(),
        endpoint = %client.endpoint(),
        "LLM client initialized"
    );
    Arc::new(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Provider;

    #[test]
    fn test_no_key_yields_disabled_client() {
        let client = build_client(&LlmSettings::default(), &CareConfig::default());
        assert!(client.provider_type().is_none());
    }

    #[test]
    fn test_disabled_flag_wins_over_key() {
        let settings = LlmSettings {
            api_key: Some("k".into()),
            disabled: true,
            ..Default::default()
        };
        let client = build_client(&settings, &CareConfig::default());
        assert_eq!(client.model_name(), "disabled");
    }

    #[test]
    fn test_env_provider_and_model() {
        let settings = LlmSettings {
            provider: Some(Provider::DeepSeek),
            api_key: Some("k".into()),
            model: Some("deepseek-v3".into()),
            ..Default::default()
        };
        let client = build_client(&settings, &CareConfig::default());
        assert_eq!(client.provider_type(), Some(Provider::DeepSeek));
        assert_eq!(client.model_name(), "deepseek-v3");
    }

    fn gemini_file() -> CareConfig {
        toml::from_str("[llm]\nprovider = \"gemini\"\nmodel = \"gemini-2.0-flash\"\n").unwrap()
    }

    #[test]
    fn test_file_provider_uses_its_own_key() {
        let settings = LlmSettings {
            provider: Some(Provider::OpenAi),
            api_key: Some("sk-openai".into()),
            provider_keys: vec![
                (Provider::OpenAi, "sk-openai".into()),
                (Provider::Gemini, "g-key".into()),
            ],
            model: Some("gpt-4o-mini".into()),
            ..Default::default()
        };
        let client = build_client(&settings, &gemini_file());
        assert_eq!(client.provider_type(), Some(Provider::Gemini));
        assert_eq!(client.model_name(), "gemini-2.0-flash");
    }

    #[test]
    fn test_file_provider_without_key_is_disabled() {
        let settings = LlmSettings {
            provider: Some(Provider::OpenAi),
            api_key: Some("sk-openai".into()),
            provider_keys: vec![(Provider::OpenAi, "sk-openai".into())],
            ..Default::default()
        };
        let client = build_client(&settings, &gemini_file());
        assert!(client.provider_type().is_none());
        assert_eq!(client.model_name(), "disabled");
    }
}
