pub mod aggregate;
pub mod commands;
pub mod dispatch;
pub mod limiter;
pub mod select;
pub mod session;

pub use crate::domain::model::{DeckEntry, DeckStat, Grade, PickItem, ReviewState, SelectionOutcome};
pub use crate::domain::ports::{ConfigProvider, Notifier, Prompt, ReviewApi, ReviewView};
pub use crate::utils::error::Result;
