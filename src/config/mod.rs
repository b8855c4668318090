//! Application configuration management

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::CliOptions;

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Populate the store with the seed catalogue at startup
    pub seed_data: bool,

    /// Seed file to use instead of the embedded catalogue
    pub seed_file: Option<PathBuf>,

    /// Default tracing filter, used when RUST_LOG is unset
    pub log_filter: String,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("HOST")
                .unwrap_or_else(|| "0.0.0.0".to_string())
                .parse()
                .context("Invalid HOST")?,

            port: lookup("PORT")
                .unwrap_or_else(|| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            seed_data: lookup("SEED_DATA")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),

            seed_file: lookup("SEED_FILE").map(PathBuf::from),

            log_filter: lookup("LOG_FILTER")
                .unwrap_or_else(|| "bookshelf=debug,tower_http=debug".to_string()),

            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("pretty") | Some("text") => LogFormat::Pretty,
                _ => LogFormat::Json,
            },
        })
    }

    /// Apply command-line overrides on top of the environment
    pub fn apply_cli(&mut self, options: &CliOptions) {
        if let Some(port) = options.port_override {
            self.port = port;
        }
        if options.no_seed {
            self.seed_data = false;
        }
    }
}
