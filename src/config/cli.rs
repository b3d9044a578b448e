use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "deckview")]
#[command(about = "Terminal review client for an AnkiConnect-compatible scheduler")]
pub struct CliConfig {
    /// AnkiConnect endpoint. Defaults to the local instance.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Cap on simultaneous AnkiConnect requests (1-5).
    #[arg(long)]
    pub concurrent_requests: Option<usize>,

    /// Optional TOML config file; flags take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Command to invoke once; without it an interactive loop starts.
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,
}
