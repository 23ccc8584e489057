//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod history;
pub mod locate;
pub mod search;

use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::get_formatter;
use crate::format::url::UrlFormatter;
use crate::session::Session;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::process::Stdio;

/// Place search and device location lookup
#[derive(Parser)]
#[command(name = "whereabouts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for a place by name
    Search(search::SearchArgs),

    /// Resolve the current device location
    Locate(locate::LocateArgs),

    /// View and manage recent locations
    History(history::HistoryArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::History(args) => history::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Output flags shared by commands that resolve a location
#[derive(Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Copy coordinates to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Open the location in the external map viewer
    #[arg(long)]
    pub open: bool,

    /// Map URL provider (for --open and the url format)
    #[arg(long)]
    pub provider: Option<String>,
}

/// Render the session's current selection and apply the output flags
pub(crate) fn emit_current(
    session: &mut Session,
    config: &Config,
    output: &OutputArgs,
) -> Result<()> {
    let format_name = output.format.as_deref().unwrap_or(&config.defaults.format);
    let location = session.current().ok_or(Error::NoSelection)?;

    // The url format honors an explicit --provider override
    let rendered = if format_name.eq_ignore_ascii_case("url") {
        UrlFormatter.format_with_provider(location, config, output.provider.as_deref())?
    } else {
        let formatter = get_formatter(format_name)
            .ok_or_else(|| Error::Config(format!("Unknown format: {}", format_name)))?;
        formatter.format(location, config)?
    };
    println!("{}", rendered.trim_end());

    if output.copy {
        let text = session.copy_coordinates(&SystemClipboard, Utc::now())?;
        eprintln!("Copied to clipboard: {}", text);
    }

    if output.open {
        let url = session.map_url(config, output.provider.as_deref())?;
        open_in_viewer(&url)?;
        eprintln!("Opened {}", url);
    }

    Ok(())
}

/// Open a URL in the system browser
pub(crate) fn open_in_viewer(url: &str) -> Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    std::process::Command::new(opener)
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(())
}
