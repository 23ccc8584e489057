//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/whereabouts/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::geo::LocateOptions;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default values for output
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Place search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Device locator settings
    #[serde(default)]
    pub locator: LocatorConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Place search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Region bias (ISO 3166-1 alpha-2 country code)
    #[serde(default = "default_region")]
    pub region: String,

    /// Maximum number of suggestions per search
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

/// Device locator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Locator provider: "ip" or "none"
    #[serde(default = "default_locator_provider")]
    pub provider: String,

    /// Request the most precise fix available
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,

    /// Locate timeout in seconds
    #[serde(default = "default_locate_timeout")]
    pub timeout_secs: u64,

    /// Maximum cached-fix age in seconds (0 = always fetch fresh)
    #[serde(default = "default_maximum_age")]
    pub maximum_age_secs: u64,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Maps API credential (place search + geocoding)
    #[serde(default)]
    pub maps: String,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_region() -> String {
    DEFAULT_REGION.to_string()
}
fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}
fn default_locator_provider() -> String {
    DEFAULT_LOCATOR_PROVIDER.to_string()
}
fn default_high_accuracy() -> bool {
    DEFAULT_HIGH_ACCURACY
}
fn default_locate_timeout() -> u64 {
    DEFAULT_LOCATE_TIMEOUT_SECS
}
fn default_maximum_age() -> u64 {
    DEFAULT_MAXIMUM_AGE_SECS
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps?q={lat},{lng}".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=18/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

// Implement Default traits
impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            search: SearchConfig::default(),
            locator: LocatorConfig::default(),
            url: UrlConfig::default(),
            api_keys: ApiKeysConfig::default(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            limit: default_search_limit(),
        }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            provider: default_locator_provider(),
            high_accuracy: default_high_accuracy(),
            timeout_secs: default_locate_timeout(),
            maximum_age_secs: default_maximum_age(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["search", "region"] => Some(self.search.region.clone()),
            ["search", "limit"] => Some(self.search.limit.to_string()),

            ["locator", "provider"] => Some(self.locator.provider.clone()),
            ["locator", "high_accuracy"] => Some(self.locator.high_accuracy.to_string()),
            ["locator", "timeout_secs"] => Some(self.locator.timeout_secs.to_string()),
            ["locator", "maximum_age_secs"] => Some(self.locator.maximum_age_secs.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            ["api_keys", "maps"] => Some(self.api_keys.maps.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["search", "region"] => {
                self.search.region = value.to_string();
            }
            ["search", "limit"] => {
                self.search.limit = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid limit value: {}", value)))?;
            }

            ["locator", "provider"] => {
                self.locator.provider = value.to_string();
            }
            ["locator", "high_accuracy"] => {
                self.locator.high_accuracy = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))?;
            }
            ["locator", "timeout_secs"] => {
                self.locator.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }
            ["locator", "maximum_age_secs"] => {
                self.locator.maximum_age_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid age value: {}", value)))?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            ["api_keys", "maps"] => {
                self.api_keys.maps = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "search.region",
            "search.limit",
            "locator.provider",
            "locator.high_accuracy",
            "locator.timeout_secs",
            "locator.maximum_age_secs",
            "url.default",
            "api_keys.maps",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Locate options derived from the locator section
    pub fn locate_options(&self) -> LocateOptions {
        LocateOptions {
            high_accuracy: self.locator.high_accuracy,
            timeout: Duration::from_secs(self.locator.timeout_secs),
            maximum_age: Duration::from_secs(self.locator.maximum_age_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.format, "text");
        assert_eq!(config.search.region, "us");
        assert_eq!(config.search.limit, 5);
        assert_eq!(config.locator.provider, "ip");
        assert_eq!(config.locator.timeout_secs, 10);
        assert_eq!(config.locator.maximum_age_secs, 0);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("search.region"), Some("us".to_string()));

        config.set("search.region", "gb").unwrap();
        assert_eq!(config.get("search.region"), Some("gb".to_string()));

        config.set("locator.timeout_secs", "30").unwrap();
        assert_eq!(config.locator.timeout_secs, 30);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("search.limit", "not_a_number").is_err());
        assert!(config.set("locator.high_accuracy", "maybe").is_err());
    }

    #[test]
    fn test_format_url() {
        let config = Config::default();

        let url = config.format_url(Some("google"), 40.7128, -74.0060).unwrap();
        assert_eq!(url, "https://www.google.com/maps?q=40.7128,-74.006");

        let url = config
            .format_url(Some("openstreetmap"), 40.7128, -74.0060)
            .unwrap();
        assert_eq!(url, "https://www.openstreetmap.org/#map=18/40.7128/-74.006");
    }

    #[test]
    fn test_format_url_default_provider() {
        let config = Config::default();
        let url = config.format_url(None, 40.7128, -74.0060).unwrap();
        assert!(url.contains("google.com"));
    }

    #[test]
    fn test_format_url_unknown_provider() {
        let config = Config::default();
        assert!(config.format_url(Some("unknown"), 40.7128, -74.0060).is_err());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.search.region = "de".to_string();
            config.api_keys.maps = "test-key".to_string();
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.search.region, "de");
            assert_eq!(loaded.api_keys.maps, "test-key");
        });
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(loaded.defaults.format, "text");
        assert_eq!(loaded.locator.provider, "ip");
        assert_eq!(loaded.url.default, "google");
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[locator]"));
        assert!(toml.contains("[url]"));
        assert!(toml.contains("[url.providers]"));
    }

    #[test]
    fn test_locate_options_from_config() {
        let mut config = Config::default();
        config.locator.timeout_secs = 5;
        config.locator.maximum_age_secs = 60;
        config.locator.high_accuracy = false;

        let options = config.locate_options();
        assert!(!options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.maximum_age, Duration::from_secs(60));
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        assert!(keys.contains(&"search.region"));
        assert!(keys.contains(&"locator.provider"));
        assert!(keys.contains(&"api_keys.maps"));
    }
}
