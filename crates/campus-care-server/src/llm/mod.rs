// crates/campus-care-server/src/llm/mod.rs
// Chat-completion provider clients (OpenAI-compatible endpoints)

mod client;
mod disabled;
mod factory;
mod http_client;
mod openai_compat;
mod provider;
mod types;

pub use client::OpenAiCompatClient;
pub use disabled::DisabledClient;
pub use factory::build_client;
pub use http_client::LlmHttpClient;
pub use provider::{LlmClient, Provider};
pub use types::{ChatResult, Message, Usage};
