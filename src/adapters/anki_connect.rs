use crate::domain::model::{DeckStat, Grade};
use crate::domain::ports::{ReviewApi, ReviewView};
use crate::utils::error::{DeckviewError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

const ANKI_CONNECT_VERSION: u32 = 6;

/// HTTP client for the AnkiConnect JSON-RPC endpoint. Every call is a
/// POST of `{action, version, params}`; the response envelope carries
/// either a `result` or a non-null `error`.
#[derive(Debug, Clone)]
pub struct AnkiConnectClient {
    client: Client,
    endpoint: String,
}

impl AnkiConnectClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn call(&self, action: &str, params: Value) -> Result<Value> {
        tracing::debug!(action, "AnkiConnect request");
        let body = json!({
            "action": action,
            "version": ANKI_CONNECT_VERSION,
            "params": params,
        });

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let envelope: Value = response.json().await?;

        if let Some(message) = envelope.get("error").and_then(Value::as_str) {
            return Err(DeckviewError::Protocol {
                message: message.to_string(),
            });
        }
        Ok(envelope.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Calls a `gui*` action that signals success with a boolean
    /// result; `false` means the review window refused the action.
    async fn gui_call(&self, action: &str, params: Value) -> Result<()> {
        let result = self.call(action, params).await?;
        if result.as_bool() == Some(false) {
            return Err(DeckviewError::Protocol {
                message: format!("{} rejected by the review window", action),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewApi for AnkiConnectClient {
    async fn version(&self) -> Result<String> {
        let result = self.call("version", json!({})).await?;
        match result.as_i64() {
            Some(version) => Ok(version.to_string()),
            None => Err(DeckviewError::Protocol {
                message: "unexpected version payload".to_string(),
            }),
        }
    }

    async fn sync(&self) -> Result<()> {
        self.call("sync", json!({})).await?;
        Ok(())
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        let result = self.call("deckNames", json!({})).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn deck_stat(&self, name: &str) -> Result<DeckStat> {
        let result = self
            .call("getDeckStats", json!({ "decks": [name] }))
            .await?;
        // The result is keyed by deck id; a single-deck query has one entry.
        let stat = result
            .as_object()
            .and_then(|stats| stats.values().next())
            .cloned()
            .ok_or_else(|| DeckviewError::Protocol {
                message: format!("no stats returned for deck {}", name),
            })?;
        Ok(serde_json::from_value(stat)?)
    }

    async fn answer_card(&self, grade: Grade) -> Result<bool> {
        let result = self
            .call("guiAnswerCard", json!({ "ease": grade.value() }))
            .await?;
        Ok(result.as_bool().unwrap_or(false))
    }
}

/// View collaborator driven through AnkiConnect's `gui*` actions: the
/// review window lives in the remote application, this adapter only
/// steers it.
pub struct GuiView {
    client: AnkiConnectClient,
}

impl GuiView {
    pub fn new(client: AnkiConnectClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewView for GuiView {
    async fn decks(&self) -> Result<Vec<String>> {
        self.client.deck_names().await
    }

    async fn open_deck(&self, name: &str) -> Result<()> {
        self.client
            .gui_call("guiDeckReview", json!({ "name": name }))
            .await
    }

    async fn show_question(&self) -> Result<()> {
        self.client.gui_call("guiShowQuestion", json!({})).await
    }

    async fn show_answer(&self) -> Result<()> {
        self.client.gui_call("guiShowAnswer", json!({})).await
    }

    async fn answer_card(&self, grade: Grade, is_fixed_ease: bool) -> Result<bool> {
        tracing::debug!(ease = grade.value(), is_fixed_ease, "answering card");
        self.client.answer_card(grade).await
    }

    async fn undo(&self) -> Result<()> {
        self.client.call("guiUndo", json!({})).await?;
        Ok(())
    }

    /// Prints the current card as markdown. The remote side renders
    /// HTML; this keeps the raw fields, which is what the editor-side
    /// insertion worked from.
    async fn insert_markdown(&self) -> Result<()> {
        let card = self.client.call("guiCurrentCard", json!({})).await?;
        let question = card
            .get("question")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let answer = card
            .get("answer")
            .and_then(Value::as_str)
            .unwrap_or_default();
        println!("### {}\n\n{}", question, answer);
        Ok(())
    }
}
