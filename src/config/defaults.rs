//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default search region bias (ISO 3166-1 alpha-2 country code)
pub const DEFAULT_REGION: &str = "us";

/// Default maximum number of suggestions returned per search
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Default device locator provider ("ip" or "none")
pub const DEFAULT_LOCATOR_PROVIDER: &str = "ip";

/// Default high-accuracy flag for device locates
pub const DEFAULT_HIGH_ACCURACY: bool = true;

/// Default device-locate timeout in seconds
pub const DEFAULT_LOCATE_TIMEOUT_SECS: u64 = 10;

/// Default maximum cached-fix age in seconds (0 = always fetch fresh)
pub const DEFAULT_MAXIMUM_AGE_SECS: u64 = 0;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "whereabouts";
