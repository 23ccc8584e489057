//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// URL formatter - outputs a map URL for the location
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        location: &Location,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        config.format_url(provider, location.lat, location.lng)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL"
    }

    fn format(&self, location: &Location, config: &Config) -> Result<String> {
        self.format_with_provider(location, config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_location() -> Location {
        Location::from_search("NYC", 40.7128, -74.0060).unwrap()
    }

    #[test]
    fn test_url_format_default_provider() {
        let formatter = UrlFormatter;
        let config = Config::default();

        let output = formatter.format(&test_location(), &config).unwrap();

        // Default provider is Google
        assert!(output.contains("google.com/maps"));
        assert!(output.contains("40.7128"));
    }

    #[test]
    fn test_url_format_with_provider() {
        let formatter = UrlFormatter;
        let config = Config::default();

        let output = formatter
            .format_with_provider(&test_location(), &config, Some("openstreetmap"))
            .unwrap();

        assert!(output.contains("openstreetmap.org"));
    }

    #[test]
    fn test_url_format_unknown_provider() {
        let formatter = UrlFormatter;
        let config = Config::default();

        assert!(formatter
            .format_with_provider(&test_location(), &config, Some("unknown"))
            .is_err());
    }

    #[test]
    fn test_url_formatter_info() {
        let formatter = UrlFormatter;
        assert_eq!(formatter.name(), "url");
        assert!(!formatter.description().is_empty());
    }
}
