use crate::domain::model::{DeckStat, Grade, PickItem};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote review-scheduling API. All calls may fail with a
/// transport or protocol error.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn version(&self) -> Result<String>;
    async fn sync(&self) -> Result<()>;
    async fn deck_names(&self) -> Result<Vec<String>>;
    async fn deck_stat(&self, name: &str) -> Result<DeckStat>;
    async fn answer_card(&self, grade: Grade) -> Result<bool>;
}

/// View collaborator owning deck and card presentation.
#[async_trait]
pub trait ReviewView: Send + Sync {
    async fn decks(&self) -> Result<Vec<String>>;
    async fn open_deck(&self, name: &str) -> Result<()>;
    async fn show_question(&self) -> Result<()>;
    async fn show_answer(&self) -> Result<()>;
    async fn answer_card(&self, grade: Grade, is_fixed_ease: bool) -> Result<bool>;
    async fn undo(&self) -> Result<()>;
    async fn insert_markdown(&self) -> Result<()>;
}

/// Interactive picker and input box. `None` means the user dismissed
/// the prompt; dismissal is a normal outcome, never an error.
#[async_trait]
pub trait Prompt: Send + Sync {
    async fn pick(&self, items: Vec<PickItem>) -> Result<Option<usize>>;
    async fn input(&self, title: &str) -> Result<Option<String>>;
}

/// User-facing messages. Fire-and-forget, infallible.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
}
