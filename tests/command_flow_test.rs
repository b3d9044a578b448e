use async_trait::async_trait;
use deckview::core::commands::{register_all, Collaborators};
use deckview::core::dispatch::CommandRegistry;
use deckview::core::{
    DeckStat, Grade, Notifier, PickItem, Prompt, ReviewApi, ReviewState, ReviewView,
};
use deckview::{DeckviewError, RequestLimiter, Result, ReviewSession};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockApi {
    stats: HashMap<String, DeckStat>,
    fail_version: bool,
    fail_sync: bool,
    sync_calls: Mutex<usize>,
}

#[async_trait]
impl ReviewApi for MockApi {
    async fn version(&self) -> Result<String> {
        if self.fail_version {
            return Err(DeckviewError::Protocol {
                message: "connection refused".to_string(),
            });
        }
        Ok("6".to_string())
    }

    async fn sync(&self) -> Result<()> {
        *self.sync_calls.lock().unwrap() += 1;
        if self.fail_sync {
            return Err(DeckviewError::Protocol {
                message: "sync failed upstream".to_string(),
            });
        }
        Ok(())
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        Ok(self.stats.keys().cloned().collect())
    }

    async fn deck_stat(&self, name: &str) -> Result<DeckStat> {
        self.stats
            .get(name)
            .copied()
            .ok_or_else(|| DeckviewError::Protocol {
                message: format!("no such deck: {}", name),
            })
    }

    async fn answer_card(&self, _grade: Grade) -> Result<bool> {
        Ok(true)
    }
}

#[derive(Default)]
struct MockView {
    deck_names: Vec<String>,
    fail_decks: bool,
    calls: Mutex<Vec<String>>,
}

impl MockView {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl ReviewView for MockView {
    async fn decks(&self) -> Result<Vec<String>> {
        if self.fail_decks {
            return Err(DeckviewError::Protocol {
                message: "view is gone".to_string(),
            });
        }
        Ok(self.deck_names.clone())
    }

    async fn open_deck(&self, name: &str) -> Result<()> {
        self.record(format!("open:{}", name));
        Ok(())
    }

    async fn show_question(&self) -> Result<()> {
        self.record("show_question");
        Ok(())
    }

    async fn show_answer(&self) -> Result<()> {
        self.record("show_answer");
        Ok(())
    }

    async fn answer_card(&self, grade: Grade, is_fixed_ease: bool) -> Result<bool> {
        self.record(format!("answer:{}:{}", grade.value(), is_fixed_ease));
        Ok(true)
    }

    async fn undo(&self) -> Result<()> {
        self.record("undo");
        Ok(())
    }

    async fn insert_markdown(&self) -> Result<()> {
        self.record("insert_markdown");
        Ok(())
    }
}

#[derive(Default)]
struct ScriptedPrompt {
    pick_answer: Option<usize>,
    input_answer: Option<String>,
    seen_items: Mutex<Vec<PickItem>>,
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn pick(&self, items: Vec<PickItem>) -> Result<Option<usize>> {
        *self.seen_items.lock().unwrap() = items;
        Ok(self.pick_answer)
    }

    async fn input(&self, _title: &str) -> Result<Option<String>> {
        Ok(self.input_answer.clone())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("info:{}", message));
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("error:{}", message));
    }
}

struct Harness {
    registry: CommandRegistry,
    session: Arc<ReviewSession>,
    view: Arc<MockView>,
    notifier: Arc<RecordingNotifier>,
    prompt: Arc<ScriptedPrompt>,
    api: Arc<MockApi>,
}

fn harness(api: MockApi, view: MockView, prompt: ScriptedPrompt) -> Harness {
    let api = Arc::new(api);
    let view = Arc::new(view);
    let prompt = Arc::new(prompt);
    let notifier = Arc::new(RecordingNotifier::default());
    let session = Arc::new(ReviewSession::new(view.clone()));
    let limiter = Arc::new(RequestLimiter::new(5).unwrap());

    let mut registry = CommandRegistry::new();
    register_all(
        &mut registry,
        &Collaborators {
            api: api.clone(),
            view: view.clone(),
            session: session.clone(),
            prompt: prompt.clone(),
            notifier: notifier.clone(),
            limiter,
        },
    )
    .unwrap();

    Harness {
        registry,
        session,
        view,
        notifier,
        prompt,
        api,
    }
}

fn stat(new_count: u32) -> DeckStat {
    DeckStat {
        new_count,
        learn_count: 1,
        review_count: 2,
    }
}

#[tokio::test]
async fn test_open_deck_end_to_end() {
    let mut stats = HashMap::new();
    stats.insert("Default".to_string(), stat(4));

    let h = harness(
        MockApi {
            stats,
            ..MockApi::default()
        },
        MockView {
            deck_names: vec!["Default".to_string(), "Broken".to_string()],
            ..MockView::default()
        },
        ScriptedPrompt {
            pick_answer: Some(0),
            ..ScriptedPrompt::default()
        },
    );

    h.registry.invoke("open-deck").await.unwrap();

    // Both decks were offered; only "Default" had a fetchable stat.
    let items = h.prompt.seen_items.lock().unwrap().clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].label, "Default");
    assert!(items[0].description.is_some());
    assert_eq!(items[1].label, "Broken");
    assert!(items[1].description.is_none());

    assert_eq!(h.session.state().await, ReviewState::ShowingQuestion);
    assert_eq!(h.view.calls(), vec!["open:Default", "show_question"]);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_open_deck_cancelled_does_nothing() {
    let h = harness(
        MockApi::default(),
        MockView {
            deck_names: vec!["Default".to_string()],
            ..MockView::default()
        },
        ScriptedPrompt::default(),
    );

    h.registry.invoke("open-deck").await.unwrap();

    assert_eq!(h.session.state().await, ReviewState::Idle);
    assert!(h.view.calls().is_empty());
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_open_deck_failure_is_reported() {
    let h = harness(
        MockApi::default(),
        MockView {
            fail_decks: true,
            ..MockView::default()
        },
        ScriptedPrompt::default(),
    );

    h.registry.invoke("open-deck").await.unwrap();

    assert!(h
        .notifier
        .messages()
        .contains(&"info:Deck open failed".to_string()));
}

#[tokio::test]
async fn test_version_reports_on_success_and_failure() {
    let h = harness(MockApi::default(), MockView::default(), ScriptedPrompt::default());
    h.registry.invoke("version").await.unwrap();
    assert_eq!(h.notifier.messages(), vec!["info:AnkiConnect version: 6"]);

    let h = harness(
        MockApi {
            fail_version: true,
            ..MockApi::default()
        },
        MockView::default(),
        ScriptedPrompt::default(),
    );
    h.registry.invoke("version").await.unwrap();
    assert_eq!(h.notifier.messages(), vec!["info:AnkiConnect ping failed"]);
}

#[tokio::test]
async fn test_sync_failure_is_silent() {
    let h = harness(
        MockApi {
            fail_sync: true,
            ..MockApi::default()
        },
        MockView::default(),
        ScriptedPrompt::default(),
    );

    h.registry.invoke("sync").await.unwrap();

    assert_eq!(*h.api.sync_calls.lock().unwrap(), 1);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_ad_hoc_answer_with_typed_grade() {
    let h = harness(
        MockApi::default(),
        MockView::default(),
        ScriptedPrompt {
            input_answer: Some("3".to_string()),
            ..ScriptedPrompt::default()
        },
    );

    h.session.show_question().await.unwrap();
    h.session.show_answer().await.unwrap();
    h.registry.invoke("answer-card").await.unwrap();

    assert_eq!(h.session.state().await, ReviewState::ShowingQuestion);
    assert!(h.view.calls().contains(&"answer:3:false".to_string()));
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_invalid_typed_grade_is_reported_and_state_stays() {
    let h = harness(
        MockApi::default(),
        MockView::default(),
        ScriptedPrompt {
            input_answer: Some("9".to_string()),
            ..ScriptedPrompt::default()
        },
    );

    h.session.show_question().await.unwrap();
    h.session.show_answer().await.unwrap();
    h.registry.invoke("answer-card").await.unwrap();

    assert_eq!(h.session.state().await, ReviewState::ShowingAnswer);
    assert_eq!(
        h.notifier.messages(),
        vec!["error:Answer value not correct"]
    );
}

#[tokio::test]
async fn test_dismissed_grade_input_is_a_normal_exit() {
    let h = harness(MockApi::default(), MockView::default(), ScriptedPrompt::default());

    h.session.show_question().await.unwrap();
    h.session.show_answer().await.unwrap();
    h.registry.invoke("answer-card").await.unwrap();

    assert_eq!(h.session.state().await, ReviewState::ShowingAnswer);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_fixed_ease_commands_grade_without_prompting() {
    let h = harness(MockApi::default(), MockView::default(), ScriptedPrompt::default());

    h.session.show_question().await.unwrap();
    h.session.show_answer().await.unwrap();
    h.registry.invoke("answer-card-ease-2").await.unwrap();

    assert_eq!(h.session.state().await, ReviewState::ShowingQuestion);
    assert!(h.view.calls().contains(&"answer:2:true".to_string()));
}

#[tokio::test]
async fn test_fixed_ease_from_idle_reports_process_error() {
    let h = harness(MockApi::default(), MockView::default(), ScriptedPrompt::default());

    h.registry.invoke("answer-card-ease-4").await.unwrap();

    assert_eq!(h.session.state().await, ReviewState::Idle);
    assert_eq!(
        h.notifier.messages(),
        vec!["error:Answer card process error"]
    );
}

#[tokio::test]
async fn test_all_operations_are_registered() {
    let h = harness(MockApi::default(), MockView::default(), ScriptedPrompt::default());
    assert_eq!(
        h.registry.command_names(),
        vec![
            "answer-card",
            "answer-card-ease-1",
            "answer-card-ease-2",
            "answer-card-ease-3",
            "answer-card-ease-4",
            "insert-markdown",
            "open-deck",
            "show-answer",
            "show-question",
            "sync",
            "undo",
            "version",
        ]
    );
}

#[tokio::test]
async fn test_registering_twice_fails_fast() {
    let h = harness(MockApi::default(), MockView::default(), ScriptedPrompt::default());
    let mut registry = h.registry;
    let collaborators = Collaborators {
        api: Arc::new(MockApi::default()),
        view: Arc::new(MockView::default()),
        session: h.session.clone(),
        prompt: Arc::new(ScriptedPrompt::default()),
        notifier: Arc::new(RecordingNotifier::default()),
        limiter: Arc::new(RequestLimiter::new(5).unwrap()),
    };
    assert!(matches!(
        register_all(&mut registry, &collaborators),
        Err(DeckviewError::DuplicateCommand { .. })
    ));
}
