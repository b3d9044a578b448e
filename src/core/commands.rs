use crate::core::aggregate::aggregate_deck_stats;
use crate::core::dispatch::{Command, CommandRegistry};
use crate::core::limiter::RequestLimiter;
use crate::core::select::select;
use crate::core::session::ReviewSession;
use crate::domain::model::{Grade, SelectionOutcome};
use crate::domain::ports::{Notifier, Prompt, ReviewApi, ReviewView};
use crate::utils::error::{DeckviewError, Result};
use std::sync::Arc;

/// Everything an operation may touch. Commands capture clones of the
/// handles they need at registration time.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn ReviewApi>,
    pub view: Arc<dyn ReviewView>,
    pub session: Arc<ReviewSession>,
    pub prompt: Arc<dyn Prompt>,
    pub notifier: Arc<dyn Notifier>,
    pub limiter: Arc<RequestLimiter>,
}

/// The four fixed-ease operations differ only in the grade they bind.
const EASE_COMMANDS: [(&str, Grade); 4] = [
    ("answer-card-ease-1", Grade::AGAIN),
    ("answer-card-ease-2", Grade::HARD),
    ("answer-card-ease-3", Grade::GOOD),
    ("answer-card-ease-4", Grade::EASY),
];

/// Registers every operation. Fails fast on a duplicate name, before
/// anything can be invoked.
pub fn register_all(registry: &mut CommandRegistry, c: &Collaborators) -> Result<()> {
    registry.register(version_command(c))?;
    registry.register(sync_command(c))?;
    registry.register(open_deck_command(c))?;
    registry.register(show_question_command(c))?;
    registry.register(show_answer_command(c))?;
    registry.register(answer_card_command(c))?;
    for (name, grade) in EASE_COMMANDS {
        registry.register(fixed_ease_command(c, name, grade))?;
    }
    registry.register(undo_command(c))?;
    registry.register(insert_markdown_command(c))?;
    Ok(())
}

fn version_command(c: &Collaborators) -> Command {
    let api = c.api.clone();
    let notifier = c.notifier.clone();
    let fail_notifier = c.notifier.clone();
    Command::new(
        "version",
        move || {
            let api = api.clone();
            let notifier = notifier.clone();
            Box::pin(async move {
                let version = api.version().await?;
                notifier.info(&format!("AnkiConnect version: {}", version));
                Ok(())
            })
        },
        move |err| {
            tracing::debug!(error = %err, "version check failed");
            fail_notifier.info("AnkiConnect ping failed");
        },
    )
}

fn sync_command(c: &Collaborators) -> Command {
    let api = c.api.clone();
    Command::new(
        "sync",
        move || {
            let api = api.clone();
            Box::pin(async move { api.sync().await })
        },
        // Sync failures stay user-silent; the breadcrumb is the only trace.
        move |err| {
            tracing::debug!(error = %err, "sync failed");
        },
    )
}

fn open_deck_command(c: &Collaborators) -> Command {
    let api = c.api.clone();
    let view = c.view.clone();
    let session = c.session.clone();
    let prompt = c.prompt.clone();
    let limiter = c.limiter.clone();
    let fail_notifier = c.notifier.clone();
    let fail_session = c.session.clone();
    Command::new(
        "open-deck",
        move || {
            let api = api.clone();
            let view = view.clone();
            let session = session.clone();
            let prompt = prompt.clone();
            let limiter = limiter.clone();
            Box::pin(async move {
                let names = view.decks().await?;
                let fetch_api = api.clone();
                let entries = aggregate_deck_stats(names, &limiter, move |name| {
                    let api = fetch_api.clone();
                    async move { api.deck_stat(&name).await }
                })
                .await;

                match select(prompt.as_ref(), entries).await? {
                    SelectionOutcome::Chosen(entry) => session.open_deck(&entry.name).await,
                    SelectionOutcome::Cancelled => Ok(()),
                }
            })
        },
        move |err| {
            tracing::warn!(error = %err, "deck open failed");
            fail_notifier.info("Deck open failed");
            // Best effort to put the view back on a card.
            let session = fail_session.clone();
            tokio::spawn(async move {
                if let Err(err) = session.show_question().await {
                    tracing::debug!(error = %err, "show question after failed open");
                }
            });
        },
    )
}

fn show_question_command(c: &Collaborators) -> Command {
    let session = c.session.clone();
    Command::new(
        "show-question",
        move || {
            let session = session.clone();
            Box::pin(async move { session.show_question().await })
        },
        move |err| {
            tracing::debug!(error = %err, "show question failed");
        },
    )
}

fn show_answer_command(c: &Collaborators) -> Command {
    let session = c.session.clone();
    let notifier = c.notifier.clone();
    Command::new(
        "show-answer",
        move || {
            let session = session.clone();
            Box::pin(async move { session.show_answer().await })
        },
        move |err| match err {
            DeckviewError::IllegalTransition { .. } => notifier.error("Process error"),
            _ => tracing::debug!(error = %err, "show answer failed"),
        },
    )
}

/// The ad-hoc grading operation: the grade is typed into an input box.
/// A dismissed box ends the operation silently.
fn answer_card_command(c: &Collaborators) -> Command {
    let session = c.session.clone();
    let prompt = c.prompt.clone();
    let notifier = c.notifier.clone();
    Command::new(
        "answer-card",
        move || {
            let session = session.clone();
            let prompt = prompt.clone();
            Box::pin(async move {
                let Some(text) = prompt.input("Answer").await? else {
                    return Ok(());
                };
                let grade = Grade::parse(&text)?;
                session.answer_card(grade, false).await
            })
        },
        move |err| match err {
            DeckviewError::InvalidGrade { .. } => notifier.error("Answer value not correct"),
            _ => notifier.error("Answer card process error"),
        },
    )
}

fn fixed_ease_command(c: &Collaborators, name: &'static str, grade: Grade) -> Command {
    let session = c.session.clone();
    let notifier = c.notifier.clone();
    Command::new(
        name,
        move || {
            let session = session.clone();
            Box::pin(async move { session.answer_card(grade, true).await })
        },
        move |_err| {
            notifier.error("Answer card process error");
        },
    )
}

fn undo_command(c: &Collaborators) -> Command {
    let session = c.session.clone();
    Command::new(
        "undo",
        move || {
            let session = session.clone();
            Box::pin(async move { session.undo().await })
        },
        // Undo failures stay user-silent.
        move |err| {
            tracing::debug!(error = %err, "undo failed");
        },
    )
}

fn insert_markdown_command(c: &Collaborators) -> Command {
    let session = c.session.clone();
    let notifier = c.notifier.clone();
    Command::new(
        "insert-markdown",
        move || {
            let session = session.clone();
            Box::pin(async move { session.insert_markdown().await })
        },
        move |err| match err {
            DeckviewError::IllegalTransition { .. } => notifier.error("Process error"),
            _ => tracing::debug!(error = %err, "insert markdown failed"),
        },
    )
}
