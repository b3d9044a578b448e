use crate::utils::error::{DeckviewError, Result};
use serde::{Deserialize, Serialize};

/// Per-deck counts of cards due, as reported by the scheduling service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStat {
    pub new_count: u32,
    pub learn_count: u32,
    pub review_count: u32,
}

/// One deck in an aggregation batch. `stat` is `None` when the per-deck
/// fetch failed; that is a valid state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub name: String,
    pub stat: Option<DeckStat>,
}

impl DeckEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stat: None,
        }
    }
}

/// Ease-of-recall feedback for the spaced-repetition scheduler.
/// Only 1 through 4 are valid; anything else is invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade(u8);

impl Grade {
    pub const AGAIN: Grade = Grade(1);
    pub const HARD: Grade = Grade(2);
    pub const GOOD: Grade = Grade(3);
    pub const EASY: Grade = Grade(4);

    pub fn new(value: i64) -> Result<Self> {
        match value {
            1..=4 => Ok(Grade(value as u8)),
            _ => Err(DeckviewError::InvalidGrade {
                value: value.to_string(),
            }),
        }
    }

    /// Parses user-typed text into a grade.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| DeckviewError::InvalidGrade {
                value: trimmed.to_string(),
            })?;
        Grade::new(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Result of one Selection Flow invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Chosen(DeckEntry),
    Cancelled,
}

/// Review-session state; transitions are enforced by `core::session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewState {
    #[default]
    Idle,
    ShowingQuestion,
    ShowingAnswer,
}

/// A labeled choice presented by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: Option<String>,
}
