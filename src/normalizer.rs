//! Turns a raw model response into a typed meal plan.
//!
//! The model is told to return bare JSON but routinely wraps it in
//! markdown fences or surrounds it with prose. The pipeline here strips
//! fence markers globally, cuts the text down to the outermost brace span,
//! parses, and then checks that the three required top-level keys are
//! present before the typed conversion. No retries happen here; that is
//! the caller's call.

use crate::error::NormalizeError;
use crate::meal_plan::MealPlanData;

pub const REQUIRED_KEYS: [&str; 3] = [
    "TDEE_Calculation",
    "Daily_Macro_Targets_Grams",
    "Meal_Plan",
];

/// How much of the original raw text a parse failure carries for display.
pub const RESPONSE_SNIPPET_CHARS: usize = 1000;

pub fn normalize(raw: &str) -> Result<MealPlanData, NormalizeError> {
    let mut text = raw.trim().to_string();

    // Strip every fence marker, not just an assumed single pair, so the
    // cleanup is idempotent even on doubly-wrapped responses.
    if text.contains("```json") {
        text = text.replace("```json", "").replace("```", "");
    } else if text.contains("```") {
        text = text.replace("```", "");
    }

    if let Some(span) = extract_json_object(&text) {
        text = span;
    }

    let value: serde_json::Value =
        serde_json::from_str(text.trim()).map_err(|_| parse_error(raw))?;

    for key in REQUIRED_KEYS {
        if value.get(key).map_or(true, |entry| entry.is_null()) {
            return Err(NormalizeError::Schema(
                "Response missing required fields".to_string(),
            ));
        }
    }

    serde_json::from_value(value)
        .map_err(|err| NormalizeError::Schema(format!("Response shape invalid: {err}")))
}

/// Greedy first-`{` to last-`}` span across the whole (multi-line) string.
/// A heuristic, but one that survives leading and trailing prose; kept
/// private so it can be replaced without touching callers.
fn extract_json_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(text[start..=end].to_string())
}

fn parse_error(raw: &str) -> NormalizeError {
    NormalizeError::Parse {
        snippet: raw.chars().take(RESPONSE_SNIPPET_CHARS).collect(),
        original_len: raw.chars().count(),
    }
}
