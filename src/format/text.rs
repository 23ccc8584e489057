//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::{Accuracy, Location};
use chrono::{DateTime, Utc};

/// Text formatter - outputs a human-readable detail panel
pub struct TextFormatter;

/// Render an accuracy value for display
pub fn format_accuracy(accuracy: Accuracy) -> String {
    match accuracy {
        Accuracy::FromSearch => "From search".to_string(),
        Accuracy::Meters(m) if m < 1000.0 => format!("\u{b1}{:.0} m", m),
        Accuracy::Meters(m) => format!("\u{b1}{:.1} km", m / 1000.0),
    }
}

/// Render how long ago a location was resolved
pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(timestamp).num_seconds();

    if secs < 5 {
        return "just now".to_string();
    }
    if secs < 60 {
        return format!("{}s ago", secs);
    }

    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m ago", mins);
    }

    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }

    timestamp.format("%Y-%m-%d").to_string()
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, location: &Location, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("{}\n", location.name));
        output.push_str(&format!(
            "  Coordinates: ({:.6}, {:.6})\n",
            location.lat, location.lng
        ));
        output.push_str(&format!(
            "  Accuracy:    {}\n",
            format_accuracy(location.accuracy)
        ));
        output.push_str(&format!(
            "  Resolved:    {}\n",
            location.timestamp.to_rfc3339()
        ));

        Ok(output)
    }
}
