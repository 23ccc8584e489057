//! Centralized constants for the whereabouts crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// External API endpoints
pub mod api {
    /// Hosted geocoding API (reverse geocoding)
    pub const GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// Hosted place text-search API (forward search)
    pub const PLACE_SEARCH_URL: &str =
        "https://maps.googleapis.com/maps/api/place/textsearch/json";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Location resolution settings
pub mod location {
    /// Sentinel address used when reverse geocoding cannot resolve one
    pub const UNKNOWN_LOCATION: &str = "Unknown location";

    /// Estimated accuracy of an IP-derived fix in meters (city scale)
    pub const IP_FIX_ACCURACY_M: f64 = 25_000.0;

    /// Default device-locate timeout in seconds
    pub const LOCATE_TIMEOUT_SECS: u64 = 10;
}

/// Cache settings
pub mod cache {
    /// Cached device-fix file name
    pub const DEVICE_FIX_CACHE_FILE: &str = "device_fix_cache.json";
}
