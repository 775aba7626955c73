mod admin;
mod cli;
mod live;
mod staff_input;

use clap::Parser;
use client::ViewKind;
use tracing_appender::rolling;
use util::config::AppConfig;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.apply_overrides();

    // Load configuration and initialize logging
    let cfg = AppConfig::global().clone();
    let _log_guard = init_logging(&cfg);

    tracing::info!(
        env = %cfg.env,
        mode = %cfg.notifier_mode,
        "Starting {} against {}",
        cfg.project_name,
        cfg.api_base_url
    );

    match cli.command {
        Command::Board => live::run(ViewKind::Board, &cfg).await,
        Command::Staff => live::run(ViewKind::Dashboard, &cfg).await,
        Command::Queue(cmd) => admin::queue(cmd, &cfg).await,
        Command::Ticket(cmd) => admin::ticket(cmd, &cfg).await,
    }
}

fn init_logging(cfg: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &cfg.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    // Frames go to stdout, so console logging goes to stderr.
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true);

    let env_filter = EnvFilter::try_new(&cfg.log_level)
        .unwrap_or_else(|_| EnvFilter::new("display=info,client=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if cfg.log_to_stdout {
        registry.with(console_layer).init();
    } else {
        registry.init();
    }

    guard
}
