//! Locate command handler
//!
//! Resolves the current device location and its address.

use crate::cli::{emit_current, OutputArgs};
use crate::config::Config;
use crate::error::Result;
use crate::geo::device::IpLocator;
use crate::geo::maps::MapsBackend;
use crate::geo::resolver::AddressResolver;
use crate::history::RecentLocations;
use crate::session::Session;
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    let config = Config::load()?;

    let locator = match config.locator.provider.as_str() {
        "ip" => Some(IpLocator::new()),
        _ => None,
    };
    let resolver = AddressResolver::new(MapsBackend::from_config(&config));

    let mut session = Session::new(RecentLocations::load()?);
    session
        .locate(locator.as_ref(), &resolver, &config.locate_options())
        .await;

    if let Some(message) = session.error() {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }

    emit_current(&mut session, &config, &args.output)
}
