// crates/campus-care-server/src/lib.rs
// Campus Care - crisis triage, support chat proxy and self-assessment scoring

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod assessment;
pub mod chat;
pub mod config;
pub mod crisis;
pub mod error;
pub mod llm;
pub mod web;

pub use error::{CareError, Result};
