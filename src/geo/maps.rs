//! Hosted maps API backend (place search + reverse geocoding)
//!
//! Both endpoints share one lazily-built HTTP client keyed by the API
//! credential from configuration. Initialization is idempotent and has no
//! teardown; repeated calls after the first are no-ops.

use crate::config::Config;
use crate::constants::api::{GEOCODING_URL, PLACE_SEARCH_URL};
use crate::error::{Error, Result};
use crate::geo::{PlaceSearch, PlaceSuggestion, ReverseGeocode};
use serde::Deserialize;
use tokio::sync::OnceCell;

const USER_AGENT: &str = "whereabouts/0.1.0";
const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Hosted maps API backend
#[derive(Debug)]
pub struct MapsBackend {
    api_key: String,
    region: String,
    limit: usize,
    client: OnceCell<reqwest::Client>,
}

/// Shared response envelope for both endpoints
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    results: Vec<ApiResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl MapsBackend {
    /// Create a backend with an explicit credential, region, and result limit
    pub fn new(api_key: impl Into<String>, region: impl Into<String>, limit: usize) -> Self {
        Self {
            api_key: api_key.into(),
            region: region.into(),
            limit,
            client: OnceCell::new(),
        }
    }

    /// Create a backend from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_keys.maps.clone(),
            config.search.region.clone(),
            config.search.limit,
        )
    }

    /// One-time asynchronous initialization of the HTTP client
    ///
    /// Idempotent; fails when no API credential is configured.
    pub async fn ensure_loaded(&self) -> Result<&reqwest::Client> {
        if self.api_key.is_empty() {
            return Err(Error::Config(
                "No maps API key configured; set api_keys.maps".to_string(),
            ));
        }

        self.client
            .get_or_try_init(|| async {
                reqwest::Client::builder()
                    .user_agent(USER_AGENT)
                    .build()
                    .map_err(Error::from)
            })
            .await
    }

    fn suggestion_from(result: ApiResult) -> Option<PlaceSuggestion> {
        let description = result.name.or(result.formatted_address)?;
        let point = result.geometry.map(|g| g.location);

        Some(PlaceSuggestion {
            description,
            lat: point.as_ref().map(|p| p.lat),
            lng: point.as_ref().map(|p| p.lng),
        })
    }
}

impl PlaceSearch for MapsBackend {
    async fn suggest(&self, query: &str) -> Result<Vec<PlaceSuggestion>> {
        let client = self.ensure_loaded().await?;

        let url = format!(
            "{}?query={}&region={}&key={}",
            PLACE_SEARCH_URL,
            urlencoding::encode(query),
            self.region,
            self.api_key
        );

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Search(format!("Place search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Search(format!(
                "Place search returned status: {}",
                response.status()
            )));
        }

        let payload: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse place search response: {}", e)))?;

        match payload.status.as_str() {
            STATUS_OK => Ok(payload
                .results
                .into_iter()
                .filter_map(Self::suggestion_from)
                .take(self.limit)
                .collect()),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            other => Err(Error::Search(payload.error_message.unwrap_or_else(|| {
                format!("Place search failed with status: {}", other)
            }))),
        }
    }
}

impl ReverseGeocode for MapsBackend {
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        let client = self.ensure_loaded().await?;

        let url = format!(
            "{}?latlng={},{}&key={}",
            GEOCODING_URL, lat, lng, self.api_key
        );

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Reverse geocode request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Geocoding API returned status: {}",
                response.status()
            )));
        }

        let payload: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse geocoding response: {}", e)))?;

        match payload.status.as_str() {
            STATUS_OK => Ok(payload
                .results
                .into_iter()
                .next()
                .and_then(|r| r.formatted_address)),
            STATUS_ZERO_RESULTS => Ok(None),
            other => Err(Error::Geocoding(payload.error_message.unwrap_or_else(
                || format!("Reverse geocode failed with status: {}", other),
            ))),
        }
    }
}
