//! History command handler
//!
//! View and manage the recent-locations list.

use crate::cli::{emit_current, OutputArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::text::{format_accuracy, format_age};
use crate::history::RecentLocations;
use crate::session::Session;
use chrono::Utc;
use clap::{Args, Subcommand};

/// History command arguments
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommand>,
}

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List recent locations
    List,
    /// Show a stored entry verbatim (1 = most recent)
    Show {
        /// Entry position
        index: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Clear all recent locations
    Clear,
}

/// Run the history command
pub async fn run(args: HistoryArgs) -> Result<()> {
    match args.command.unwrap_or(HistoryCommand::List) {
        HistoryCommand::List => list_recent(),
        HistoryCommand::Show { index, output } => show_entry(index, &output),
        HistoryCommand::Clear => clear_recent(),
    }
}

/// List recent locations
fn list_recent() -> Result<()> {
    let recent = RecentLocations::load()?;

    if recent.is_empty() {
        println!("No recent locations.");
        return Ok(());
    }

    let now = Utc::now();
    println!("Recent locations ({}):\n", recent.len());

    for (i, entry) in recent.entries().iter().enumerate() {
        println!(
            "  {}. {}\n     ({:.4}, {:.4}) | {} | {}\n",
            i + 1,
            entry.name,
            entry.lat,
            entry.lng,
            format_accuracy(entry.accuracy),
            format_age(entry.timestamp, now)
        );
    }

    Ok(())
}

/// Show a stored entry without re-fetching anything
fn show_entry(index: usize, output: &OutputArgs) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::new(RecentLocations::load()?);

    if index == 0 || !session.select_history(index - 1) {
        return Err(Error::Config(format!(
            "No recent location at position {}",
            index
        )));
    }

    emit_current(&mut session, &config, output)
}

/// Clear all recent locations
fn clear_recent() -> Result<()> {
    let mut session = Session::new(RecentLocations::load()?);
    let count = session.history().len();

    session.clear_history();

    println!("Cleared {} recent locations.", count);
    Ok(())
}
