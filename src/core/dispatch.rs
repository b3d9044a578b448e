use crate::utils::error::{DeckviewError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

pub type CommandFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;
type ExecuteFn = Box<dyn Fn() -> CommandFuture + Send + Sync>;
type FailureFn = Box<dyn Fn(&DeckviewError) + Send + Sync>;

/// One registered operation: a name, an execution procedure, and a
/// failure handler, stored as data rather than virtual dispatch.
/// The failure handler is infallible by signature.
pub struct Command {
    name: String,
    execute: ExecuteFn,
    on_failure: FailureFn,
}

impl Command {
    pub fn new<E, F>(name: impl Into<String>, execute: E, on_failure: F) -> Self
    where
        E: Fn() -> CommandFuture + Send + Sync + 'static,
        F: Fn(&DeckviewError) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            execute: Box::new(execute),
            on_failure: Box::new(on_failure),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Name-keyed command registry. Every invocation runs under the same
/// try/report-failure protocol: exactly one of `execute` or
/// `on_failure` runs, never both, never neither.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a command. Re-registering a used name is a startup error,
    /// not a silent overwrite.
    pub fn register(&mut self, command: Command) -> Result<()> {
        if self.commands.contains_key(command.name()) {
            return Err(DeckviewError::DuplicateCommand {
                name: command.name().to_string(),
            });
        }
        tracing::debug!(command = command.name(), "registered command");
        self.commands.insert(command.name().to_string(), command);
        Ok(())
    }

    /// Runs the named command. A failing `execute` is routed to the
    /// command's failure handler instead of propagating; only an
    /// unknown name surfaces as an error here.
    pub async fn invoke(&self, name: &str) -> Result<()> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| DeckviewError::UnknownCommand {
                name: name.to_string(),
            })?;

        if let Err(err) = (command.execute)().await {
            tracing::debug!(command = name, error = %err, "command failed");
            (command.on_failure)(&err);
        }
        Ok(())
    }

    /// Removes a binding; invoking the name afterwards fails with
    /// `UnknownCommand`.
    pub fn dispose(&mut self, name: &str) -> Result<()> {
        self.commands
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DeckviewError::UnknownCommand {
                name: name.to_string(),
            })
    }

    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
