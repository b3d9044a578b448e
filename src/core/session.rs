use crate::domain::model::{Grade, ReviewState};
use crate::domain::ports::ReviewView;
use crate::utils::error::{DeckviewError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Drives the review-session state machine (Idle → ShowingQuestion →
/// ShowingAnswer → ShowingQuestion). Presentation is delegated to the
/// view collaborator; only the legal transitions are enforced here.
/// On any failure the state does not advance.
pub struct ReviewSession {
    view: Arc<dyn ReviewView>,
    state: Mutex<ReviewState>,
}

impl ReviewSession {
    pub fn new(view: Arc<dyn ReviewView>) -> Self {
        Self {
            view,
            state: Mutex::new(ReviewState::Idle),
        }
    }

    pub async fn state(&self) -> ReviewState {
        *self.state.lock().await
    }

    /// Loads the deck and puts the first question on screen. Legal
    /// from any state.
    pub async fn open_deck(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        self.view.open_deck(name).await?;
        self.view.show_question().await?;
        *state = ReviewState::ShowingQuestion;
        Ok(())
    }

    /// Legal from any state; repeating it from ShowingQuestion is a
    /// no-op transition, not an error.
    pub async fn show_question(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.view.show_question().await?;
        *state = ReviewState::ShowingQuestion;
        Ok(())
    }

    pub async fn show_answer(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if *state != ReviewState::ShowingQuestion {
            return Err(DeckviewError::IllegalTransition {
                from: *state,
                action: "show answer",
            });
        }
        self.view.show_answer().await?;
        *state = ReviewState::ShowingAnswer;
        Ok(())
    }

    /// Grades the current card. The grade is already validated by
    /// construction; the view rejecting the answer maps to
    /// `AnswerRejected`. On success the view re-shows the next
    /// question.
    pub async fn answer_card(&self, grade: Grade, is_fixed_ease: bool) -> Result<()> {
        let mut state = self.state.lock().await;
        if *state != ReviewState::ShowingAnswer {
            return Err(DeckviewError::IllegalTransition {
                from: *state,
                action: "answer card",
            });
        }
        if !self.view.answer_card(grade, is_fixed_ease).await? {
            return Err(DeckviewError::AnswerRejected);
        }
        *state = ReviewState::ShowingQuestion;
        Ok(())
    }

    /// Delegates undo; the collaborator decides what state the review
    /// ends up in, so the protocol state is left untouched.
    pub async fn undo(&self) -> Result<()> {
        self.view.undo().await
    }

    pub async fn insert_markdown(&self) -> Result<()> {
        let state = self.state.lock().await;
        if *state != ReviewState::ShowingAnswer {
            return Err(DeckviewError::IllegalTransition {
                from: *state,
                action: "insert markdown",
            });
        }
        self.view.insert_markdown().await
    }
}
