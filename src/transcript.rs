use chrono::{DateTime, Utc};

use crate::meal_plan::MealPlanData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// Follow-up actions the assistant can offer after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferedAction {
    SaveJson,
    NewPlan,
    Retry,
}

/// What a turn carries. A tagged union rather than optional extra fields,
/// so renderers must handle every case.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnPayload {
    PlainText(String),
    StructuredResult(MealPlanData),
    ActionPrompt(Vec<OfferedAction>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub id: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub payload: TurnPayload,
}

/// Derives turn ids from the millisecond clock, bumping by one whenever
/// the clock has not advanced, so ids stay unique and ordered even when
/// several turns land in the same instant.
#[derive(Debug, Default)]
pub struct TurnIdGenerator {
    last_ms: i64,
}

impl TurnIdGenerator {
    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let ms = if now > self.last_ms {
            now
        } else {
            self.last_ms + 1
        };
        self.last_ms = ms;
        ms.to_string()
    }
}

/// Append-only ordered log of conversation turns. Insertion order is
/// display order is chronological order; there is no edit or delete.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
    ids: TurnIdGenerator,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and append a turn stamped with the next id.
    pub fn push(&mut self, author: Author, payload: TurnPayload) {
        let turn = ConversationTurn {
            id: self.ids.next_id(),
            author,
            created_at: Utc::now(),
            payload,
        };
        self.turns.push(turn);
    }

    /// Append a caller-constructed turn as-is.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
