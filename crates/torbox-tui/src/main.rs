//! `torbox-dash` — terminal dashboard for a TorBox account.
//!
//! Built on [ratatui](https://ratatui.rs) over `torbox-core`'s
//! [`Dashboard`](torbox_core::Dashboard). Six views are navigable via number
//! keys (1-6): Dashboard, Torrents, Web Downloads, Usenet, Profile and
//! Service Status. The API key is entered on the Dashboard view and is never
//! written to disk.
//!
//! Logs are written to a file so they never corrupt the terminal UI.
//!
//! Entry point: CLI argument parsing, config loading, tracing setup, panic
//! hooks, and app launch.

mod action;
mod app;
mod bridge;
mod clipboard;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use torbox_config::Config;
use torbox_core::Dashboard;

use crate::app::App;

/// Terminal dashboard for managing TorBox torrents, web downloads and usenet jobs.
#[derive(Parser, Debug)]
#[command(name = "torbox-dash", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API root URL (e.g., https://api.torbox.app)
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

/// Set up file-based tracing. Nothing may go to stdout/stderr while the
/// TUI owns the terminal. Hold the returned guard so logs flush on exit.
fn setup_tracing(log_file: &Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "torbox_tui={log_level},torbox_core={log_level},torbox_api={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or(Path::new("."));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("torbox-dash.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file and environment, then CLI overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = torbox_config::load_config(cli.config.as_deref())?;
    if let Some(url) = &cli.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config = resolve_config(&cli)?;

    if cli.write_config {
        let path = cli.config.clone().unwrap_or_else(torbox_config::config_path);
        // Validate before persisting.
        config.to_dashboard_config()?;
        torbox_config::save_config(&config, &path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let _log_guard = setup_tracing(&config.log_file(), cli.verbose);

    let dashboard = Dashboard::new(config.to_dashboard_config()?)?;
    info!(base_url = %dashboard.config().base_url, "starting torbox-dash");

    let mut app = App::new(dashboard);
    app.run().await
}
