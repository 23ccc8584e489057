//! IP-based device location
//!
//! Uses ip-api.com as the device geolocation capability. A previous fix is
//! cached on disk and reused only when it is younger than the request's
//! `maximum_age`, so the default options always fetch a fresh fix.

use crate::constants::api::IP_API_URL;
use crate::constants::cache::DEVICE_FIX_CACHE_FILE;
use crate::constants::location::IP_FIX_ACCURACY_M;
use crate::error::{Error, Result};
use crate::geo::{DeviceFix, DeviceLocate, LocateOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// IP geolocation service with an optional fix cache
///
/// IP fixes have a single precision tier; `high_accuracy` is accepted for
/// interface parity and has no effect here.
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    cache_path: Option<PathBuf>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Cached fix data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedFix {
    lat: f64,
    lng: f64,
    accuracy_m: f64,
    timestamp: u64,
}

impl IpLocator {
    /// Create a locator with the default cache path
    pub fn new() -> Self {
        let cache_path = dirs::cache_dir().map(|p| p.join("whereabouts").join(DEVICE_FIX_CACHE_FILE));

        Self {
            client: reqwest::Client::new(),
            cache_path,
        }
    }

    /// Create a locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache_path: Some(cache_path),
        }
    }

    /// Create a locator without caching
    pub fn without_cache() -> Self {
        Self {
            client: reqwest::Client::new(),
            cache_path: None,
        }
    }

    /// Fetch a fresh fix from ip-api.com
    async fn fetch_fix(&self, options: &LocateOptions) -> Result<DeviceFix> {
        let response = self
            .client
            .get(IP_API_URL)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Locate("The request to get device location timed out".to_string())
                } else {
                    Error::Locate(format!("Device location request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(Error::Locate(format!(
                "Device location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            Error::Locate(format!("Failed to parse device location response: {}", e))
        })?;

        if data.status != "success" {
            return Err(Error::Locate(
                data.message
                    .unwrap_or_else(|| "Device location lookup failed".to_string()),
            ));
        }

        let lat = data
            .lat
            .ok_or_else(|| Error::Locate("No latitude in response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| Error::Locate("No longitude in response".to_string()))?;

        Ok(DeviceFix {
            lat,
            lng,
            accuracy_m: IP_FIX_ACCURACY_M,
        })
    }

    /// Load a cached fix if one exists and is young enough
    fn load_cache(&self, options: &LocateOptions) -> Option<DeviceFix> {
        if options.maximum_age.is_zero() {
            return None;
        }

        let cache_path = self.cache_path.as_ref()?;
        if !cache_path.exists() {
            return None;
        }

        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedFix = serde_json::from_str(&content).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        if now.saturating_sub(cached.timestamp) < options.maximum_age.as_secs() {
            Some(DeviceFix {
                lat: cached.lat,
                lng: cached.lng,
                accuracy_m: cached.accuracy_m,
            })
        } else {
            None
        }
    }

    /// Save a fix to the cache
    fn save_cache(&self, fix: &DeviceFix) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let cached = CachedFix {
            lat: fix.lat,
            lng: fix.lng,
            accuracy_m: fix.accuracy_m,
            timestamp,
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLocate for IpLocator {
    async fn locate(&self, options: &LocateOptions) -> Result<DeviceFix> {
        if let Some(fix) = self.load_cache(options) {
            return Ok(fix);
        }

        let fix = self.fetch_fix(options).await?;
        self.save_cache(&fix);

        Ok(fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn options_with_max_age(secs: u64) -> LocateOptions {
        LocateOptions {
            maximum_age: Duration::from_secs(secs),
            ..LocateOptions::default()
        }
    }

    #[test]
    fn test_locator_creation() {
        let locator = IpLocator::new();
        assert!(locator.cache_path.is_some());
    }

    #[test]
    fn test_locator_without_cache() {
        let locator = IpLocator::without_cache();
        assert!(locator.cache_path.is_none());
    }

    #[test]
    fn test_zero_maximum_age_never_reuses_cache() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("test_cache.json");
        let locator = IpLocator::with_cache_path(cache_path);

        let fix = DeviceFix {
            lat: 40.7128,
            lng: -74.0060,
            accuracy_m: IP_FIX_ACCURACY_M,
        };
        locator.save_cache(&fix);

        // Default options have maximum_age = 0
        assert!(locator.load_cache(&LocateOptions::default()).is_none());
    }

    #[test]
    fn test_cache_reused_within_maximum_age() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("test_cache.json");
        let locator = IpLocator::with_cache_path(cache_path);

        let fix = DeviceFix {
            lat: 40.7128,
            lng: -74.0060,
            accuracy_m: IP_FIX_ACCURACY_M,
        };
        locator.save_cache(&fix);

        let loaded = locator.load_cache(&options_with_max_age(3600)).unwrap();
        assert_eq!(loaded, fix);

        locator.clear_cache();
        assert!(locator.load_cache(&options_with_max_age(3600)).is_none());
    }

    #[test]
    fn test_parse_success_response() {
        let json = r#"{"status": "success", "lat": 51.5074, "lon": -0.1278, "city": "London"}"#;
        let data: IpApiResponse = serde_json::from_str(json).unwrap();

        assert_eq!(data.status, "success");
        assert_eq!(data.lat, Some(51.5074));
        assert_eq!(data.lon, Some(-0.1278));
    }

    #[test]
    fn test_parse_failure_response() {
        let json = r#"{"status": "fail", "message": "private range"}"#;
        let data: IpApiResponse = serde_json::from_str(json).unwrap();

        assert_eq!(data.status, "fail");
        assert_eq!(data.message.as_deref(), Some("private range"));
    }

    #[test]
    fn test_cached_fix_serialization() {
        let cached = CachedFix {
            lat: 40.7128,
            lng: -74.0060,
            accuracy_m: 25_000.0,
            timestamp: 1704200000,
        };

        let json = serde_json::to_string(&cached).unwrap();
        let parsed: CachedFix = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.lat, 40.7128);
        assert_eq!(parsed.timestamp, 1704200000);
    }
}
