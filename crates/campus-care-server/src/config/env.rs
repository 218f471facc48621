// crates/campus-care-server/src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::llm::Provider;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, info, warn};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_TOKENS: u32 = 300;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Chat-completion provider settings
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Provider override (CAMPUS_CARE_LLM_PROVIDER)
    pub provider: Option<Provider>,
    /// API key for the selected provider (OPENAI_API_KEY, DEEPSEEK_API_KEY, GEMINI_API_KEY)
    pub api_key: Option<String>,
    /// Every provider key present in the environment, in lookup order
    pub provider_keys: Vec<(Provider, String)>,
    /// Model override (CAMPUS_CARE_LLM_MODEL)
    pub model: Option<String>,
    /// Base URL override (CAMPUS_CARE_LLM_BASE_URL)
    pub base_url: Option<String>,
    /// Reply length bound (CAMPUS_CARE_MAX_TOKENS)
    pub max_tokens: u32,
    /// Sampling temperature (CAMPUS_CARE_TEMPERATURE)
    pub temperature: f32,
    /// Wall-clock bound on one provider call (CAMPUS_CARE_LLM_TIMEOUT_SECS)
    pub timeout_secs: u64,
    /// Force the disabled client (CAMPUS_CARE_DISABLE_LLM)
    pub disabled: bool,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: None,
            api_key: None,
            provider_keys: Vec::new(),
            model: None,
            base_url: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            disabled: false,
        }
    }
}

impl LlmSettings {
    /// Provider to use, defaulting to OpenAI
    pub fn provider_or_default(&self) -> Provider {
        self.provider.unwrap_or(Provider::OpenAi)
    }

    /// Key belonging to `provider`; never another provider's key
    pub fn key_for(&self, provider: Provider) -> Option<String> {
        if self.provider == Some(provider)
            && let Some(ref key) = self.api_key
        {
            return Some(key.clone());
        }
        self.provider_keys
            .iter()
            .find(|(p, _)| *p == provider)
            .map(|(_, key)| key.clone())
    }
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Bind host (CAMPUS_CARE_HOST)
    pub host: String,
    /// Bind port (CAMPUS_CARE_PORT)
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub llm: LlmSettings,
    pub server: ServerSettings,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider_raw = read("CAMPUS_CARE_LLM_PROVIDER");
        let provider = provider_raw.as_deref().and_then(|raw| {
            let parsed = Provider::from_str(raw);
            if parsed.is_none() {
                warn!(value = raw, "Unknown CAMPUS_CARE_LLM_PROVIDER, using default");
            }
            parsed
        });

        let disabled = read("CAMPUS_CARE_DISABLE_LLM")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false);

        let provider_keys: Vec<(Provider, String)> = [Provider::OpenAi, Provider::DeepSeek, Provider::Gemini]
            .into_iter()
            .filter_map(|p| {
                p.api_key_env_vars()
                    .iter()
                    .find_map(|&var| read(var))
                    .map(|key| (p, key))
            })
            .collect();

        // Key lookup follows the chosen provider; with no choice, the first key found wins
        let keyed = match provider {
            Some(p) => provider_keys.iter().find(|(kp, _)| *kp == p),
            None => provider_keys.first(),
        };
        let (provider, api_key) = match keyed {
            Some((p, key)) => (Some(*p), Some(key.clone())),
            None => (provider, None),
        };

        let llm = LlmSettings {
            provider,
            api_key,
            provider_keys,
            model: read("CAMPUS_CARE_LLM_MODEL"),
            base_url: read("CAMPUS_CARE_LLM_BASE_URL"),
            max_tokens: parse_or("CAMPUS_CARE_MAX_TOKENS", read("CAMPUS_CARE_MAX_TOKENS"), DEFAULT_MAX_TOKENS),
            temperature: parse_or("CAMPUS_CARE_TEMPERATURE", read("CAMPUS_CARE_TEMPERATURE"), DEFAULT_TEMPERATURE),
            timeout_secs: parse_or(
                "CAMPUS_CARE_LLM_TIMEOUT_SECS",
                read("CAMPUS_CARE_LLM_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            ),
            disabled,
        };

        let server = ServerSettings {
            host: read("CAMPUS_CARE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("CAMPUS_CARE_PORT", read("CAMPUS_CARE_PORT"), DEFAULT_PORT),
        };

        debug!(
            provider = ?llm.provider,
            has_key = llm.api_key.is_some(),
            max_tokens = llm.max_tokens,
            port = server.port,
            "Environment configuration loaded"
        );

        Self { llm, server }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.llm.disabled {
            validation.add_warning("CAMPUS_CARE_DISABLE_LLM is set. Chat replies will use the fallback message.");
        } else if self.llm.api_key.is_none() {
            let vars = self.llm.provider_or_default().api_key_env_vars().join(" or ");
            validation.add_warning(format!(
                "No LLM API key configured. Set {} (or another provider's key).",
                vars
            ));
        }

        if self.llm.max_tokens == 0 {
            validation.add_error("CAMPUS_CARE_MAX_TOKENS must be greater than 0");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            validation.add_error(format!(
                "CAMPUS_CARE_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            ));
        }
        if self.llm.timeout_secs == 0 {
            validation.add_error("CAMPUS_CARE_LLM_TIMEOUT_SECS must be greater than 0");
        }
        if let Some(ref url) = self.llm.base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            validation.add_error(format!("CAMPUS_CARE_LLM_BASE_URL must be an http(s) URL, got '{}'", url));
        }

        validation
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default {default}");
            default
        }),
    }
}
