//! Geolocation capabilities
//!
//! Narrow trait seams over the external mapping collaborators: place search,
//! reverse geocoding, and device location.

pub mod device;
pub mod maps;
pub mod resolver;

use crate::constants::location::LOCATE_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::location::Location;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A place-search suggestion
///
/// Geometry is optional: the search API can return candidates without a
/// resolvable point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    /// Display name of the candidate
    pub description: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl PlaceSuggestion {
    /// Resolve this suggestion into a [`Location`]
    ///
    /// Fails when the search backend returned no geometry for the candidate.
    pub fn resolve(&self) -> Result<Location> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Location::from_search(&self.description, lat, lng),
            _ => Err(Error::Search(
                "No details available for this place".to_string(),
            )),
        }
    }
}

/// A raw device fix: coordinates plus an accuracy radius in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceFix {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_m: f64,
}

/// Options for a device-locate request
#[derive(Debug, Clone, Copy)]
pub struct LocateOptions {
    /// Request the most precise fix the provider can produce
    pub high_accuracy: bool,
    /// Abort the request after this long
    pub timeout: Duration,
    /// Maximum age of a previously cached fix this request will accept;
    /// zero means a fresh fix is always fetched
    pub maximum_age: Duration,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(LOCATE_TIMEOUT_SECS),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Trait for place-search backends
pub trait PlaceSearch: Send + Sync {
    /// Search for place suggestions matching a text query
    fn suggest(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PlaceSuggestion>>> + Send;
}

/// Trait for reverse-geocoding backends
pub trait ReverseGeocode: Send + Sync {
    /// Reverse geocode coordinates to a formatted address
    ///
    /// Returns `None` when the collaborator has no address for the point.
    fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// Trait for device locators
pub trait DeviceLocate: Send + Sync {
    /// Fetch the current device position
    fn locate(
        &self,
        options: &LocateOptions,
    ) -> impl std::future::Future<Output = Result<DeviceFix>> + Send;
}
