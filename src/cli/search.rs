//! Search command handler
//!
//! Searches for a place by name and resolves a chosen suggestion.

use crate::cli::{emit_current, OutputArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::maps::MapsBackend;
use crate::geo::PlaceSearch;
use crate::history::RecentLocations;
use crate::session::Session;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Place name or address to search for
    #[arg(required = true)]
    pub query: Vec<String>,

    /// List suggestions without resolving one
    #[arg(long, short = 'l')]
    pub list: bool,

    /// Resolve suggestion N (1-based)
    #[arg(long, short = 'p', default_value = "1")]
    pub pick: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let query = args.query.join(" ");

    let backend = MapsBackend::from_config(&config);
    let suggestions = backend.suggest(&query).await?;

    if suggestions.is_empty() {
        eprintln!("No results for '{}'", query);
        std::process::exit(1);
    }

    if args.list {
        println!("Suggestions for '{}':\n", query);
        for (i, suggestion) in suggestions.iter().enumerate() {
            let geometry = match (suggestion.lat, suggestion.lng) {
                (Some(lat), Some(lng)) => format!("({:.4}, {:.4})", lat, lng),
                _ => "(no details)".to_string(),
            };
            println!("  {}. {} {}", i + 1, suggestion.description, geometry);
        }
        return Ok(());
    }

    if args.pick == 0 || args.pick > suggestions.len() {
        return Err(Error::Search(format!(
            "Suggestion {} is out of range (1-{})",
            args.pick,
            suggestions.len()
        )));
    }

    let location = suggestions[args.pick - 1].resolve()?;

    let mut session = Session::new(RecentLocations::load()?);
    session.select_place(location);

    emit_current(&mut session, &config, &args.output)
}
