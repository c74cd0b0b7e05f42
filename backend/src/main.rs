//! Main entry point for the Appfigures aggregation backend.
//!
//! This file loads configuration, initializes logging and then either serves
//! the Axum API or runs one of the diagnostic commands (`fetch`, `check`).

mod api;
mod config;
mod errors;
mod middleware;
mod services;

use std::net::SocketAddr;

use adapters::appfigures::{check_endpoints, CHECK_ENDPOINTS};
use adapters::AppfiguresClient;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::{Cli, Command};
use crate::services::data_aggregator::DataAggregator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.config.log_level);

    let appfigures = cli.config.appfigures();
    info!(
        token = %appfigures.masked_token(),
        base_url = %appfigures.base_url,
        "appfigures configuration loaded"
    );
    let client = AppfiguresClient::new(appfigures);

    match cli.command.unwrap_or_default() {
        Command::Serve => serve(cli.config.bind, client).await,
        Command::Fetch => fetch(client).await,
        Command::Check => {
            check(&client).await;
            Ok(())
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(addr: SocketAddr, client: AppfiguresClient) -> anyhow::Result<()> {
    let app = api::router(AppState::new(client));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {}", addr);

    axum::serve(listener, app).await.context("server error")
}

async fn fetch(client: AppfiguresClient) -> anyhow::Result<()> {
    let data = DataAggregator::new(client).fetch_combined().await?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

async fn check(client: &AppfiguresClient) {
    println!("\n=== Testing with Bearer Token Auth ===");
    for (endpoint, outcome) in check_endpoints(client, &CHECK_ENDPOINTS).await {
        println!("{endpoint}: {outcome}");
    }
}
