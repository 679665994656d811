use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Command line options.
#[derive(Debug, Clone, Parser)]
#[command(name = "bcrisk")]
#[command(about = "Self-assessment for breast cancer risk in the terminal")]
pub struct Config {
    /// Prediction endpoint that receives the form as JSON
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Give up on a prediction request after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// File that receives the application log
    #[arg(long, default_value = "bcrisk.log")]
    pub log_file: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Config {
    /// The endpoint as a URL. Only http and https are accepted.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme `{other}`"),
            }),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
