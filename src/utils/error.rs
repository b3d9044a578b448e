use crate::domain::model::ReviewState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckviewError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("AnkiConnect error: {message}")]
    Protocol { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Command already registered: {name}")]
    DuplicateCommand { name: String },

    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("Cannot {action} while {from:?}")]
    IllegalTransition {
        from: ReviewState,
        action: &'static str,
    },

    #[error("Answer value not correct: {value}")]
    InvalidGrade { value: String },

    #[error("Answer card process error")]
    AnswerRejected,
}

pub type Result<T> = std::result::Result<T, DeckviewError>;
