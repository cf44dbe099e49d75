//! Runtime configuration for the generation service.
//!
//! The only external configuration is the API credential for the structured
//! generation service, read once from the process environment in `main.rs`
//! and shared with the handlers as Actix application data.

use std::env;

/// Shared state for the generation endpoints.
#[derive(Clone)]
pub struct GenerationConfig {
    /// API key for the external generation service, from `GEMINI_API_KEY`.
    pub api_key: String,
    /// HTTP client reused across generation calls.
    pub http: reqwest::Client,
}

impl GenerationConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            log::warn!("GEMINI_API_KEY is not set; tutorial generation will fail");
        }
        Self {
            api_key,
            http: reqwest::Client::new(),
        }
    }
}
