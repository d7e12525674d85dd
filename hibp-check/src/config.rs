use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use hibp_range::{ClientConfig, api_url_from_env};

use crate::error::Error;

#[derive(Parser, Debug)]
#[command(name = "hibp-check")]
#[command(about = "Check passwords against Have I Been Pwned without revealing them")]
pub struct Args {
    /// Generate a password hash file, appending if it exists
    #[arg(short = 'g', long, value_name = "FILE", conflicts_with = "file")]
    pub generate: Option<PathBuf>,

    /// Check a password hash file
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Base URL of the range API (also read from HIBP_API_URL)
    #[arg(long, default_value_t = api_url_from_env())]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Ask the service to pad responses with decoy records
    #[arg(long)]
    pub padding: bool,

    /// Number of hash file lines checked concurrently
    #[arg(short = 'j', long, default_value = "1")]
    pub concurrent_checks: usize,

    /// Disable progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    pub fn into_config(self) -> Result<Config, Error> {
        let client = ClientConfig {
            api_url: self.api_url,
            timeout: Duration::from_secs(self.timeout),
            padding: self.padding,
            ..Default::default()
        };

        let mut config = Config::new(Mode::from_flags(self.generate, self.file)?, client);
        config.concurrent_checks = self.concurrent_checks.max(1);
        config.progress = !self.no_progress;
        Ok(config)
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Prompt for one password and check it.
    Interactive,
    /// Build or extend the hash file at the given path.
    Generate(PathBuf),
    /// Check every digest in the hash file at the given path.
    CheckFile(PathBuf),
}

impl Mode {
    /// Picks the mode from the two mutually exclusive file flags.
    pub fn from_flags(generate: Option<PathBuf>, file: Option<PathBuf>) -> Result<Self, Error> {
        match (generate, file) {
            (Some(_), Some(_)) => Err(Error::InvalidArgs),
            (Some(path), None) => Ok(Mode::Generate(path)),
            (None, Some(path)) => Ok(Mode::CheckFile(path)),
            (None, None) => Ok(Mode::Interactive),
        }
    }
}

/// Everything decided at startup, built once from the command line and passed
/// down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub client: ClientConfig,
    /// Hash file checks kept in flight at once. 1 means strictly sequential.
    pub concurrent_checks: usize,
    pub progress: bool,
}

impl Config {
    pub fn new(mode: Mode, client: ClientConfig) -> Self {
        Self { mode, client, concurrent_checks: 1, progress: true }
    }
}
