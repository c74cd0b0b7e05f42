//! Central module for application-wide configuration settings.
//!
//! Settings come from command-line flags, falling back to environment
//! variables (a `.env` file is loaded first by `main`). The Appfigures token
//! is only carried here and handed to the client at construction; nothing
//! reads it from the environment at request time.

use std::net::SocketAddr;

use adapters::appfigures::DEFAULT_BASE_URL;
use adapters::AppfiguresConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "appfigures-backend", version, about = "Appfigures data aggregation service")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Clone)]
pub struct Config {
    /// Appfigures personal access token.
    #[arg(long, env = "APPFIGURES_PAT", hide_env_values = true, global = true)]
    pub appfigures_pat: Option<String>,

    #[arg(long, env = "APPFIGURES_API_BASE", default_value = DEFAULT_BASE_URL, global = true)]
    pub appfigures_base_url: String,

    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000", global = true)]
    pub bind: SocketAddr,

    /// Used when `RUST_LOG` is not set.
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,
}

impl Config {
    pub fn appfigures(&self) -> AppfiguresConfig {
        AppfiguresConfig::new(self.appfigures_pat.clone()).with_base_url(&self.appfigures_base_url)
    }
}

#[derive(Subcommand, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Command {
    /// Serve the HTTP API (default).
    #[default]
    Serve,
    /// Aggregate once and print the result as JSON.
    Fetch,
    /// Check which Appfigures endpoints the token can reach.
    Check,
}
