//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

/// Terminal front-end for a link-sharing resource site.
///
/// Panshare browses the site's public resources, resolves which download
/// mirrors are visible, enforces the per-identity download quota, and records
/// visit/download telemetry - the same decisions the web client makes.
#[derive(Parser, Debug)]
#[command(name = "panshare")]
#[command(author, version, about)]
pub struct Args {
    /// Backend base URL (e.g. https://share.example.com)
    #[arg(long, env = "PANSHARE_BASE_URL")]
    pub base_url: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the public resources
    List,
    /// Show a resource page: visible links and quota status
    Show {
        /// Resource id
        id: u64,
        /// Restrict visible links to one storage-provider code (e.g. quark)
        #[arg(long)]
        link_type: Option<String>,
    },
    /// Request a download of a resource and print the authorized link URLs
    Download {
        /// Resource id
        id: u64,
        /// Restrict visible links to one storage-provider code (e.g. quark)
        #[arg(long)]
        link_type: Option<String>,
    },
    /// Show the remaining download allowance for this identity
    Quota,
    /// Show the public site configuration
    Config,
    /// List the enabled partner-site links
    Links,
    /// List active promotions for a page position
    Promotions {
        /// Page position (header, sidebar, footer, content)
        #[arg(long, default_value = "sidebar")]
        position: String,
    },
    /// Submit feedback to the site operators
    Feedback {
        /// Feedback category (bug, suggestion, complaint, ...)
        #[arg(long, default_value = "suggestion")]
        feedback_type: String,
        /// Feedback body
        #[arg(long)]
        content: String,
        /// Optional contact channel for follow-up
        #[arg(long)]
        contact: Option<String>,
        /// Optional resource id the feedback refers to
        #[arg(long)]
        resource_id: Option<u64>,
    },
}
