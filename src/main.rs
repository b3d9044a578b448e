use clap::Parser;
use deckview::core::commands::{register_all, Collaborators};
use deckview::core::dispatch::CommandRegistry;
use deckview::domain::ports::{ConfigProvider, Notifier, Prompt, ReviewApi, ReviewView};
use deckview::utils::{logger, validation::Validate};
use deckview::{
    AnkiConnectClient, CliConfig, GuiView, RequestLimiter, ReviewSession, Settings,
    TerminalNotifier, TerminalPrompt,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting deckview");

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration could not be resolved: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    if cli.verbose {
        tracing::debug!("Settings: {:?}", settings);
    }

    let client = AnkiConnectClient::new(settings.endpoint().to_string());
    let api: Arc<dyn ReviewApi> = Arc::new(client.clone());
    let view: Arc<dyn ReviewView> = Arc::new(GuiView::new(client));
    let session = Arc::new(ReviewSession::new(view.clone()));
    let prompt: Arc<dyn Prompt> = Arc::new(TerminalPrompt);
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let limiter = Arc::new(RequestLimiter::new(settings.concurrent_requests())?);

    let mut registry = CommandRegistry::new();
    register_all(
        &mut registry,
        &Collaborators {
            api,
            view,
            session,
            prompt,
            notifier,
            limiter,
        },
    )?;

    match &cli.command {
        Some(name) => registry.invoke(name).await?,
        None => run_interactive(&registry).await?,
    }

    Ok(())
}

async fn run_interactive(registry: &CommandRegistry) -> anyhow::Result<()> {
    println!("commands: {}", registry.command_names().join(", "));
    println!("type a command name, or quit to exit");

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        print!("deckview> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if name == "quit" || name == "exit" {
            break;
        }
        if let Err(e) = registry.invoke(name).await {
            eprintln!("error: {}", e);
        }
    }
    Ok(())
}
