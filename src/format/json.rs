//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// JSON formatter - outputs the full record as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON record"
    }

    fn format(&self, location: &Location, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(location)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let formatter = JsonFormatter;
        let location = Location::from_search("Central Park", 40.7851, -73.9683).unwrap();
        let config = Config::default();

        let output = formatter.format(&location, &config).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["name"], "Central Park");
        assert_eq!(parsed["accuracy"], "From search");
        assert!(parsed.get("timestamp").is_some());
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
