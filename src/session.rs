//! One chat session: the transcript, the busy gate, and the model client.
//!
//! Every recoverable failure ends here as a transcript turn. The only
//! errors a caller sees are gating errors (busy, empty input); nothing in
//! this module can abort the session.

use tracing::{info, warn};

use crate::error::{NormalizeError, SessionError};
use crate::gemini::ModelClient;
use crate::meal_plan::MealPlanData;
use crate::normalizer::{self, RESPONSE_SNIPPET_CHARS};
use crate::profile::UserProfile;
use crate::prompt;
use crate::transcript::{Author, ConversationTurn, OfferedAction, Transcript, TurnPayload};

/// The user-visible label for a meal-plan request turn; the full prompt is
/// an implementation detail that would swamp the transcript.
const PLAN_REQUEST_LABEL: &str = "Generate my personalized meal plan";

pub struct ChatSession {
    model: Box<dyn ModelClient>,
    transcript: Transcript,
    busy: bool,
}

impl ChatSession {
    pub fn new(model: Box<dyn ModelClient>) -> Self {
        Self {
            model,
            transcript: Transcript::new(),
            busy: false,
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        self.transcript.turns()
    }

    /// True while a model request is in flight. Mirrors the form's gating:
    /// the presentation layer disables send/submit while this is set.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The most recent structured result, if any plan has been produced.
    pub fn latest_plan(&self) -> Option<&MealPlanData> {
        self.transcript.turns().iter().rev().find_map(|turn| {
            match &turn.payload {
                TurnPayload::StructuredResult(plan) => Some(plan),
                _ => None,
            }
        })
    }

    /// Free-form chat. The reply (or the failure) lands in the transcript.
    pub async fn send_message(&mut self, text: &str) -> Result<(), SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if self.busy {
            return Err(SessionError::Busy);
        }

        self.busy = true;
        self.transcript
            .push(Author::User, TurnPayload::PlainText(text.to_string()));

        let payload = match self.model.send_prompt(text).await {
            Ok(reply) => TurnPayload::PlainText(reply),
            Err(err) => {
                warn!(error = %err, "chat model call failed");
                TurnPayload::PlainText(format!("Error: {err}"))
            }
        };
        self.transcript.push(Author::Assistant, payload);
        self.busy = false;
        Ok(())
    }

    /// Ask the model for a meal plan from a validated profile and run the
    /// reply through the normalizer. Normalization failures degrade to a
    /// plain-text turn carrying the raw response rather than losing it.
    pub async fn request_meal_plan(&mut self, profile: &UserProfile) -> Result<(), SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }

        self.busy = true;
        let request = prompt::build_meal_plan_prompt(profile);
        self.transcript.push(
            Author::User,
            TurnPayload::PlainText(PLAN_REQUEST_LABEL.to_string()),
        );

        match self.model.send_prompt(&request).await {
            Err(err) => {
                warn!(error = %err, "meal plan model call failed");
                self.transcript
                    .push(Author::Assistant, TurnPayload::PlainText(format!("Error: {err}")));
            }
            Ok(raw) => match normalizer::normalize(&raw) {
                Ok(plan) => {
                    info!(meals = plan.meal_plan.len(), "meal plan normalized");
                    self.transcript
                        .push(Author::Assistant, TurnPayload::StructuredResult(plan));
                    self.transcript.push(
                        Author::Assistant,
                        TurnPayload::ActionPrompt(vec![
                            OfferedAction::SaveJson,
                            OfferedAction::NewPlan,
                        ]),
                    );
                }
                Err(err) => {
                    warn!(error = %err, "meal plan response failed normalization");
                    self.transcript.push(
                        Author::Assistant,
                        TurnPayload::PlainText(fallback_text(&raw, &err)),
                    );
                    self.transcript.push(
                        Author::Assistant,
                        TurnPayload::ActionPrompt(vec![OfferedAction::Retry]),
                    );
                }
            },
        }
        self.busy = false;
        Ok(())
    }
}

/// Render a normalization failure as user-facing text that still shows
/// what the model said, truncated when the raw response is long.
fn fallback_text(raw: &str, err: &NormalizeError) -> String {
    match err {
        NormalizeError::Parse {
            snippet,
            original_len,
        } => {
            if *original_len > snippet.chars().count() {
                format!("The reply was not a valid meal plan. Raw response (truncated):\n{snippet}...")
            } else {
                format!("The reply was not a valid meal plan. Raw response:\n{snippet}")
            }
        }
        NormalizeError::Schema(message) => {
            let shown: String = raw.chars().take(RESPONSE_SNIPPET_CHARS).collect();
            if raw.chars().count() > RESPONSE_SNIPPET_CHARS {
                format!("{message}. Raw response (truncated):\n{shown}...")
            } else {
                format!("{message}. Raw response:\n{shown}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_parse_failures_show_the_whole_response() {
        let raw = "not json";
        let err = NormalizeError::Parse {
            snippet: raw.to_string(),
            original_len: raw.chars().count(),
        };
        let text = fallback_text(raw, &err);
        assert!(text.contains("not json"));
        assert!(!text.contains("(truncated)"));
    }

    #[test]
    fn long_parse_failures_get_truncated_framing() {
        let raw = "y".repeat(4000);
        let err = NormalizeError::Parse {
            snippet: raw.chars().take(RESPONSE_SNIPPET_CHARS).collect(),
            original_len: raw.chars().count(),
        };
        let text = fallback_text(&raw, &err);
        assert!(text.contains("(truncated)"));
    }

    #[test]
    fn schema_failures_show_the_message_and_the_raw_text() {
        let raw = r#"{"TDEE_Calculation": {}}"#;
        let err = NormalizeError::Schema("Response missing required fields".to_string());
        let text = fallback_text(raw, &err);
        assert!(text.contains("Response missing required fields"));
        assert!(text.contains("TDEE_Calculation"));
    }
}
