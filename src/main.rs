use std::io;

use anyhow::Context;
use clap::Parser;

use cookalgo::api::{today, HttpApi};
use cookalgo::cli::{self, Args, Commands};
use cookalgo::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "cookalgo=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }

    let args = Args::parse();
    let config = match args.backend_url {
        Some(url) => AppConfig::from_lookup(|key| {
            if key == "BACKEND_URL" {
                Some(url.clone())
            } else {
                std::env::var(key).ok()
            }
        })?,
        None => AppConfig::from_env()?,
    };
    let api = HttpApi::new(&config).context("building backend client")?;
    tracing::info!(api = %api.api_url(), "using backend");

    let stdin = io::stdin();
    let stdout = io::stdout();
    cli::run(
        args.command.unwrap_or(Commands::Dashboard),
        &api,
        today(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
    .await
}
