use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::GeminiConfig;
use crate::constants;
use crate::error::AiError;

/// The single outbound collaborator boundary. Injected into the session so
/// tests can script responses without a network.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn send_prompt(&self, prompt: &str) -> Result<String, AiError>;
}

// Structures matching the Gemini generateContent endpoint.
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.api_base, self.config.model, self.config.api_key
        )
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn send_prompt(&self, prompt: &str) -> Result<String, AiError> {
        debug!(prompt_chars = prompt.len(), model = %self.config.model, "sending prompt");

        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            // Sampling settings are session-wide constants, not per-call knobs.
            generation_config: GenerationConfig {
                temperature: constants::TEMPERATURE,
                top_k: constants::TOP_K,
                top_p: constants::TOP_P,
                max_output_tokens: constants::MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|err| AiError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            error!(status, %body, "Gemini API request failed");
            return Err(AiError::Status { status, body });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AiError::Transport(err.to_string()))?;

        let text = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .unwrap_or_default()
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or(AiError::EmptyResponse)?;

        Ok(text.trim().to_string())
    }
}
