// Adapters layer: concrete implementations for external systems.

pub mod anki_connect;
pub mod terminal;

pub use anki_connect::{AnkiConnectClient, GuiView};
pub use terminal::{TerminalNotifier, TerminalPrompt};
