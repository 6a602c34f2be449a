//! CLI entry point for the panshare client.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use panshare_core::{Backend, HttpBackend};
use tracing::debug;

mod cli;
mod commands;

use cli::{Args, Command};
use commands::{
    run_config_command, run_download_command, run_feedback_command, run_links_command,
    run_list_command, run_promotions_command, run_quota_command, run_show_command,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&args.base_url)?);

    match args.command {
        Command::List => run_list_command(&backend).await,
        Command::Show { id, link_type } => {
            run_show_command(&backend, id, link_type.as_deref()).await
        }
        Command::Download { id, link_type } => {
            run_download_command(&backend, id, link_type.as_deref()).await
        }
        Command::Quota => run_quota_command(&backend).await,
        Command::Config => run_config_command(&backend).await,
        Command::Links => run_links_command(&backend).await,
        Command::Promotions { position } => run_promotions_command(&backend, &position).await,
        Command::Feedback {
            feedback_type,
            content,
            contact,
            resource_id,
        } => run_feedback_command(&backend, feedback_type, content, contact, resource_id).await,
    }
}
