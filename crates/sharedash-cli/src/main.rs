//! Sharedash CLI - terminal-side controller for self-hosted file sharing servers
//!
//! Sharedash drives a sharing server's upload, delete and link-copy flows
//! from the terminal, with the same feedback surface the server's own
//! dashboard gives: live progress, short-lived status toasts and timed
//! revert of transient labels.
//!
//! ## Quick Start
//!
//! ```bash
//! # Upload a file
//! sharedash upload ./document.pdf
//!
//! # Delete a file by id, with confirmation
//! sharedash delete 42 --name document.pdf
//! ```

#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::Parser;

mod commands;
pub mod ui;

use commands::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Upload(args) => commands::upload::run(args).await,
        Command::Delete(args) => commands::delete::run(args).await,
        Command::CopyLink(args) => commands::copy_link::run(args).await,
        Command::Config(args) => commands::config::run(&args),
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sharedash=info,sharedash_core=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
