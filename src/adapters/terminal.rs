use crate::domain::model::PickItem;
use crate::domain::ports::{Notifier, Prompt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

/// Numbered-list picker and line-input box on stdin/stdout.
pub struct TerminalPrompt;

async fn read_line() -> Result<Option<String>> {
    let mut line = String::new();
    let mut reader = BufReader::new(stdin());
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn flush_prompt(prefix: &str) {
    print!("{}", prefix);
    let _ = std::io::stdout().flush();
}

#[async_trait]
impl Prompt for TerminalPrompt {
    /// An empty line, a non-number, or EOF dismisses the picker.
    async fn pick(&self, items: Vec<PickItem>) -> Result<Option<usize>> {
        for (index, item) in items.iter().enumerate() {
            match &item.description {
                Some(description) => {
                    println!("{:>3}. {}  ({})", index + 1, item.label, description)
                }
                None => println!("{:>3}. {}", index + 1, item.label),
            }
        }
        flush_prompt("> ");

        let answer = match read_line().await? {
            Some(answer) => answer,
            None => return Ok(None),
        };
        match answer.parse::<usize>() {
            Ok(choice) if (1..=items.len()).contains(&choice) => Ok(Some(choice - 1)),
            _ => Ok(None),
        }
    }

    async fn input(&self, title: &str) -> Result<Option<String>> {
        flush_prompt(&format!("{}: ", title));
        match read_line().await? {
            Some(answer) if !answer.is_empty() => Ok(Some(answer)),
            _ => Ok(None),
        }
    }
}

/// Prints notifications straight to the terminal.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}
