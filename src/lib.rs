pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{AnkiConnectClient, GuiView, TerminalNotifier, TerminalPrompt};
pub use config::{CliConfig, Settings};
pub use core::commands::{register_all, Collaborators};
pub use core::dispatch::{Command, CommandRegistry};
pub use core::limiter::RequestLimiter;
pub use core::session::ReviewSession;
pub use utils::error::{DeckviewError, Result};
