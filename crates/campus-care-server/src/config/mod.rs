// crates/campus-care-server/src/config/mod.rs
// Configuration: environment variables and the optional config file

pub mod env;
pub mod file;

pub use env::{ConfigValidation, EnvConfig, LlmSettings, ServerSettings};
pub use file::CareConfig;
