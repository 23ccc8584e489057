//! Resolved location records
//!
//! The normalized value type produced by place search and device locates,
//! and stored in the recent-locations list.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialized label for search-derived accuracy
const FROM_SEARCH_LABEL: &str = "From search";

/// How precisely a location was determined
///
/// Search-derived locations carry no radius; device-derived locations carry
/// an accuracy radius in meters. Persisted form is either the literal string
/// `"From search"` or a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AccuracyRepr", into = "AccuracyRepr")]
pub enum Accuracy {
    /// Resolved from a search suggestion
    FromSearch,
    /// Device-derived accuracy radius in meters
    Meters(f64),
}

/// Wire representation of [`Accuracy`]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AccuracyRepr {
    Meters(f64),
    Label(String),
}

impl From<Accuracy> for AccuracyRepr {
    fn from(accuracy: Accuracy) -> Self {
        match accuracy {
            Accuracy::FromSearch => Self::Label(FROM_SEARCH_LABEL.to_string()),
            Accuracy::Meters(m) => Self::Meters(m),
        }
    }
}

impl TryFrom<AccuracyRepr> for Accuracy {
    type Error = String;

    fn try_from(repr: AccuracyRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            AccuracyRepr::Meters(m) if m.is_finite() && m > 0.0 => Ok(Self::Meters(m)),
            AccuracyRepr::Meters(m) => Err(format!("accuracy must be positive, got {}", m)),
            AccuracyRepr::Label(s) if s == FROM_SEARCH_LABEL => Ok(Self::FromSearch),
            AccuracyRepr::Label(s) => Err(format!("unknown accuracy label: {}", s)),
        }
    }
}

/// A resolved location: display name, coordinates, accuracy, creation instant
///
/// The timestamp is set at creation and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub accuracy: Accuracy,
    pub timestamp: DateTime<Utc>,
}

impl Location {
    /// Create a location resolved from a search suggestion
    pub fn from_search(name: impl Into<String>, lat: f64, lng: f64) -> Result<Self> {
        Self::new(name, lat, lng, Accuracy::FromSearch)
    }

    /// Create a location resolved from a device fix
    pub fn from_device(
        name: impl Into<String>,
        lat: f64,
        lng: f64,
        accuracy_m: f64,
    ) -> Result<Self> {
        if !accuracy_m.is_finite() || accuracy_m <= 0.0 {
            return Err(Error::InvalidLocation(format!(
                "Accuracy must be a positive number of meters, got {}",
                accuracy_m
            )));
        }
        Self::new(name, lat, lng, Accuracy::Meters(accuracy_m))
    }

    fn new(name: impl Into<String>, lat: f64, lng: f64, accuracy: Accuracy) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidLocation("Name must not be empty".to_string()));
        }
        validate_coordinates(lat, lng)?;

        Ok(Self {
            name,
            lat,
            lng,
            accuracy,
            timestamp: Utc::now(),
        })
    }

    /// Coordinate pair as clipboard text: `"<lat>, <lng>"`
    pub fn coords_text(&self) -> String {
        format!("{}, {}", self.lat, self.lng)
    }
}

/// Validate that coordinates are within valid ranges
///
/// Latitude: -90 to 90
/// Longitude: -180 to 180
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<()> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(Error::InvalidCoordinates(
            "Coordinate value is not finite".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidCoordinates(format!(
            "Latitude {} is out of range [-90, 90]",
            lat
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(Error::InvalidCoordinates(format!(
            "Longitude {} is out of range [-180, 180]",
            lng
        )));
    }
    Ok(())
}
