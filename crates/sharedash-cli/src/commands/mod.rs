//! CLI command definitions and handlers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod config;
pub mod copy_link;
pub mod delete;
pub mod upload;

/// Load configuration with graceful fallback to defaults.
///
/// If the config file doesn't exist or can't be parsed, commands fall back
/// to defaults rather than refusing to run.
pub fn load_config() -> sharedash_core::config::Config {
    sharedash_core::config::Config::load().unwrap_or_default()
}

/// Sharedash - terminal-side controller for self-hosted file sharing servers
#[derive(Parser)]
#[command(name = "sharedash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand)]
pub enum Command {
    /// Upload a file with live progress
    Upload(UploadArgs),

    /// Delete a file on the server, after confirmation
    Delete(DeleteArgs),

    /// Copy a share link to the clipboard
    CopyLink(CopyLinkArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the upload command
#[derive(clap::Args)]
pub struct UploadArgs {
    /// File to upload
    pub path: PathBuf,

    /// Server base URL (overrides the configured one)
    #[arg(long)]
    pub server: Option<String>,
}

/// Arguments for the delete command
#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Server-side id of the file
    pub file_id: String,

    /// Display name used in the confirmation prompt (defaults to the id)
    #[arg(long)]
    pub name: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Server base URL (overrides the configured one)
    #[arg(long)]
    pub server: Option<String>,
}

/// Arguments for the copy-link command
#[derive(clap::Args)]
pub struct CopyLinkArgs {
    /// Link to copy; server-relative paths are joined against the base URL
    pub url: String,

    /// Server base URL (overrides the configured one)
    #[arg(long)]
    pub server: Option<String>,
}

/// Arguments for the config command
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// What to do with the configuration
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init,
}
