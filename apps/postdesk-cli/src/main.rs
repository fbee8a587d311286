//! # Postdesk CLI
//!
//! Entry point: load configuration, wire the post collection, run one command.

use clap::Parser;

mod commands;
mod config;
mod state;
mod telemetry;

use commands::Cli;
use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env()?;
    let state = AppState::new(&config)?;

    commands::run(cli, &state).await
}
