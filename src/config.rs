use std::env;

use crate::constants;
use crate::error::ConfigError;

/// Gemini connection settings, read once at session start. Tests construct
/// this directly to point the client at a mock server.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl GeminiConfig {
    /// A missing API key is a fatal initialization error, not something to
    /// recover from mid-session.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            api_key,
            api_base: constants::GEMINI_API_BASE.clone(),
            model: constants::GEMINI_MODEL.clone(),
        })
    }
}
