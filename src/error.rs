use thiserror::Error;

/// Fatal initialization failures. Surfaced once by main, never mid-session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY not set; add it to the environment or a .env file")]
    MissingApiKey,
}

/// The model call itself failed. Reported as an assistant error turn,
/// never propagated far enough to abort the session.
#[derive(Debug, Clone, Error)]
pub enum AiError {
    #[error("AI service error: {0}")]
    Transport(String),
    #[error("AI service error: status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("AI service error: response contained no generated text")]
    EmptyResponse,
}

/// Why a raw model response could not be turned into a meal plan.
///
/// `Parse` keeps a bounded prefix of the *original* raw text (not the
/// cleaned-up working string) so the caller can still show the user what
/// the model actually said.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("response was not valid JSON")]
    Parse {
        snippet: String,
        original_len: usize,
    },
    #[error("{0}")]
    Schema(String),
}

/// Per-field validation failures. These are state, not exceptions: they
/// block submission until the user fixes the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldErrorKind {
    Required,
    NegativeValue,
    /// Covers both unrecognized shapes and not-a-number input.
    InvalidFormat,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a model request is already in flight")]
    Busy,
    #[error("message is empty")]
    EmptyMessage,
}
