//! Fail-soft address resolution
//!
//! Wraps a reverse-geocoding backend so callers always get a displayable
//! string. Address resolution is best-effort and must not block the flow of
//! a valid coordinate pair, so every failure degrades to the
//! "Unknown location" sentinel instead of propagating.

use crate::constants::location::UNKNOWN_LOCATION;
use crate::geo::ReverseGeocode;
use tracing::debug;

/// Resolves coordinates to a display address, never failing
#[derive(Debug)]
pub struct AddressResolver<G> {
    backend: G,
}

impl<G: ReverseGeocode> AddressResolver<G> {
    pub fn new(backend: G) -> Self {
        Self { backend }
    }

    /// Resolve a coordinate pair to a formatted address
    ///
    /// Any collaborator failure, non-OK status, or empty result yields the
    /// `"Unknown location"` sentinel; the cause is logged at debug level.
    pub async fn resolve(&self, lat: f64, lng: f64) -> String {
        match self.backend.reverse_geocode(lat, lng).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                debug!(lat, lng, "reverse geocode returned no results");
                UNKNOWN_LOCATION.to_string()
            }
            Err(e) => {
                debug!(lat, lng, error = %e, "reverse geocode failed");
                UNKNOWN_LOCATION.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};

    /// Scripted reverse-geocode backend
    struct StubGeocoder {
        outcome: StubOutcome,
    }

    enum StubOutcome {
        Address(String),
        Empty,
        Fail(String),
    }

    impl ReverseGeocode for StubGeocoder {
        async fn reverse_geocode(&self, _lat: f64, _lng: f64) -> Result<Option<String>> {
            match &self.outcome {
                StubOutcome::Address(a) => Ok(Some(a.clone())),
                StubOutcome::Empty => Ok(None),
                StubOutcome::Fail(msg) => Err(Error::Geocoding(msg.clone())),
            }
        }
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let resolver = AddressResolver::new(StubGeocoder {
            outcome: StubOutcome::Address("221B Baker St, London".to_string()),
        });

        let address = resolver.resolve(51.5237, -0.1585).await;
        assert_eq!(address, "221B Baker St, London");
    }

    #[tokio::test]
    async fn test_resolve_empty_falls_back_to_sentinel() {
        let resolver = AddressResolver::new(StubGeocoder {
            outcome: StubOutcome::Empty,
        });

        let address = resolver.resolve(0.0, 0.0).await;
        assert_eq!(address, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_resolve_error_falls_back_to_sentinel() {
        let resolver = AddressResolver::new(StubGeocoder {
            outcome: StubOutcome::Fail("REQUEST_DENIED".to_string()),
        });

        let address = resolver.resolve(40.7128, -74.0060).await;
        assert_eq!(address, UNKNOWN_LOCATION);
    }
}
