//! PPE Tracker MCP Server - Main Entry Point
//!
//! This is the main entry point for the PPE tracker server application.
//! The actual implementation is in the `ppe_tracker` library.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use ppe_tracker::notify::schedule_deadline_scan;
use ppe_tracker::{Config, PpeServerHandler};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// PPE Tracker - personal protective equipment replacement reminders via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the PPE data file (JSON)
    file: PathBuf,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay in milliseconds before the startup deadline scan
    #[arg(long)]
    scan_delay_ms: Option<u64>,

    /// Command used to show desktop notifications (e.g., notify-send)
    #[arg(long)]
    notify_command: Option<String>,

    /// Skip the startup deadline scan
    #[arg(long)]
    no_scan: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();

    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ppe_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(delay) = args.scan_delay_ms {
        config.notifications.scan_delay_ms = delay;
    }
    if let Some(command) = args.notify_command {
        config.notifications.command = Some(command);
    }

    info!(file = %args.file.display(), "Starting PPE tracker");
    let handler = PpeServerHandler::open(&args.file, &config)?;

    let scan = (!args.no_scan).then(|| {
        schedule_deadline_scan(
            handler.shared_store(),
            handler.notifier(),
            config.notifications.scan_delay(),
        )
    });

    serve_stdio(handler).await?;

    if let Some(scan) = scan {
        scan.cancel();
    }
    Ok(())
}
