pub mod cli;
pub mod file;

use crate::core::limiter::DEFAULT_CONCURRENT_REQUESTS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};

pub use cli::CliConfig;
pub use file::FileConfig;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8765";

/// Effective configuration after merging CLI flags, the optional
/// config file, and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub concurrent_requests: usize,
}

impl Settings {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        Ok(Self {
            endpoint: cli
                .endpoint
                .clone()
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            concurrent_requests: cli
                .concurrent_requests
                .or(file.concurrent_requests)
                .unwrap_or(DEFAULT_CONCURRENT_REQUESTS),
        })
    }
}

impl ConfigProvider for Settings {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        // The remote API documents a ceiling of 5 concurrent requests.
        validate_range(
            "concurrent_requests",
            self.concurrent_requests,
            1,
            DEFAULT_CONCURRENT_REQUESTS,
        )?;
        Ok(())
    }
}
