// Session-wide constants, loaded once from the environment where overridable.

use std::env;

lazy_static::lazy_static! {
    /// Base URL of the Gemini API. Overridable so tests can point at a mock server.
    pub static ref GEMINI_API_BASE: String = env::var("GEMINI_API_BASE")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
    pub static ref GEMINI_MODEL: String = env::var("GEMINI_MODEL")
        .unwrap_or_else(|_| "gemini-2.5-flash".to_string());
}

// Sampling configuration is fixed for the whole session, not per call.
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_K: u32 = 40;
pub const TOP_P: f64 = 0.95;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// File name used when a meal plan is saved to disk.
pub const EXPORT_FILENAME: &str = "prompt_output.json";
