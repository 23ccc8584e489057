//! Location session
//!
//! Owns the current selection, error and loading state, and history
//! visibility. Search, locate, and address-resolution capabilities are
//! injected per operation; every new resolution is forwarded to the
//! recent-locations store.

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::resolver::AddressResolver;
use crate::geo::{DeviceLocate, LocateOptions, ReverseGeocode};
use crate::history::RecentLocations;
use crate::location::Location;
use chrono::{DateTime, Duration, Utc};

/// Milliseconds the transient copied indicator stays active
pub const COPIED_RESET_MS: i64 = 2000;

/// Message shown when no device locator is available
pub const NO_LOCATOR_MESSAGE: &str = "Geolocation is not supported on this system";

/// Observable session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Locating,
    Error,
    Resolved,
}

/// Session state for a sequence of lookups
#[derive(Debug)]
pub struct Session {
    recent: RecentLocations,
    current: Option<Location>,
    error: Option<String>,
    locating: bool,
    history_visible: bool,
    copied_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(recent: RecentLocations) -> Self {
        Self {
            recent,
            current: None,
            error: None,
            locating: false,
            history_visible: false,
            copied_at: None,
        }
    }

    /// Current phase, derived from the owned state
    pub fn phase(&self) -> Phase {
        if self.locating {
            Phase::Locating
        } else if self.error.is_some() {
            Phase::Error
        } else if self.current.is_some() {
            Phase::Resolved
        } else {
            Phase::Idle
        }
    }

    /// The current selection, if any
    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// The last operation's error message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Recent locations, most recent first
    pub fn history(&self) -> &[Location] {
        self.recent.entries()
    }

    pub fn history_visible(&self) -> bool {
        self.history_visible
    }

    pub fn toggle_history(&mut self) {
        self.history_visible = !self.history_visible;
    }

    /// A place was chosen from search suggestions
    ///
    /// Sets the current selection, records it in history, clears any error.
    pub fn select_place(&mut self, location: Location) {
        self.error = None;
        self.recent.add(location.clone());
        self.current = Some(location);
    }

    /// Fetch the device position and resolve its address
    ///
    /// No-op while a locate is already in flight. On locator failure the
    /// error carries the collaborator's reason text, the current selection
    /// is cleared, and history is left untouched. Address resolution is
    /// fail-soft: a failed reverse geocode still records the coordinates
    /// under the sentinel name.
    pub async fn locate<D, G>(
        &mut self,
        locator: Option<&D>,
        resolver: &AddressResolver<G>,
        options: &LocateOptions,
    ) where
        D: DeviceLocate,
        G: ReverseGeocode,
    {
        if self.locating {
            return;
        }

        let Some(locator) = locator else {
            self.error = Some(NO_LOCATOR_MESSAGE.to_string());
            return;
        };

        self.locating = true;
        self.error = None;

        match locator.locate(options).await {
            Ok(fix) => {
                let name = resolver.resolve(fix.lat, fix.lng).await;
                match Location::from_device(name, fix.lat, fix.lng, fix.accuracy_m) {
                    Ok(location) => {
                        self.recent.add(location.clone());
                        self.current = Some(location);
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        self.current = None;
                    }
                }
            }
            Err(e) => {
                self.error = Some(match e {
                    Error::Locate(reason) => reason,
                    other => other.to_string(),
                });
                self.current = None;
            }
        }

        self.locating = false;
    }

    /// Redisplay a stored entry verbatim (no re-fetch)
    ///
    /// Hides the history panel. Returns false when the index is out of range.
    pub fn select_history(&mut self, index: usize) -> bool {
        let Some(location) = self.recent.get(index).cloned() else {
            return false;
        };

        self.current = Some(location);
        self.error = None;
        self.history_visible = false;
        true
    }

    /// Empty the store and hide the history panel
    ///
    /// The current selection is left untouched.
    pub fn clear_history(&mut self) {
        self.recent.clear();
        self.history_visible = false;
    }

    /// Copy the current selection's coordinates as `"<lat>, <lng>"`
    ///
    /// A successful copy arms the transient copied indicator.
    pub fn copy_coordinates(
        &mut self,
        clipboard: &impl Clipboard,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let location = self.current.as_ref().ok_or(Error::NoSelection)?;
        let text = location.coords_text();

        clipboard.write_text(&text)?;
        self.copied_at = Some(now);

        Ok(text)
    }

    /// Whether the copied indicator is still active at `now`
    pub fn copied(&self, now: DateTime<Utc>) -> bool {
        self.copied_at
            .is_some_and(|at| now.signed_duration_since(at) < Duration::milliseconds(COPIED_RESET_MS))
    }

    /// External map viewer URL for the current selection
    pub fn map_url(&self, config: &Config, provider: Option<&str>) -> Result<String> {
        let location = self.current.as_ref().ok_or(Error::NoSelection)?;
        config.format_url(provider, location.lat, location.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::DeviceFix;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct MockLocator {
        outcome: std::result::Result<DeviceFix, String>,
    }

    impl DeviceLocate for MockLocator {
        async fn locate(&self, _options: &LocateOptions) -> Result<DeviceFix> {
            match &self.outcome {
                Ok(fix) => Ok(*fix),
                Err(reason) => Err(Error::Locate(reason.clone())),
            }
        }
    }

    struct MockGeocoder {
        outcome: std::result::Result<Option<String>, String>,
    }

    impl ReverseGeocode for MockGeocoder {
        async fn reverse_geocode(&self, _lat: f64, _lng: f64) -> Result<Option<String>> {
            match &self.outcome {
                Ok(address) => Ok(address.clone()),
                Err(status) => Err(Error::Geocoding(status.clone())),
            }
        }
    }

    #[derive(Default)]
    struct MemoryClipboard {
        contents: RefCell<Vec<String>>,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            self.contents.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn write_text(&self, _text: &str) -> Result<()> {
            Err(Error::Clipboard("no tool".to_string()))
        }
    }

    fn test_session() -> (Session, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let recent = RecentLocations::load_from(temp_dir.path().join("recent.json"));
        (Session::new(recent), temp_dir)
    }

    fn test_fix() -> DeviceFix {
        DeviceFix {
            lat: 40.7128,
            lng: -74.0060,
            accuracy_m: 20.0,
        }
    }

    fn good_geocoder() -> AddressResolver<MockGeocoder> {
        AddressResolver::new(MockGeocoder {
            outcome: Ok(Some("New York, NY, USA".to_string())),
        })
    }

    #[test]
    fn test_initial_phase_is_idle() {
        let (session, _temp) = test_session();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.current().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_select_place_resolves_and_records() {
        let (mut session, _temp) = test_session();

        let loc = Location::from_search("Central Park", 40.7851, -73.9683).unwrap();
        session.select_place(loc.clone());

        assert_eq!(session.phase(), Phase::Resolved);
        assert_eq!(session.current(), Some(&loc));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].name, "Central Park");
    }

    #[test]
    fn test_select_place_clears_previous_error() {
        let (mut session, _temp) = test_session();
        session.error = Some("something went wrong".to_string());

        session.select_place(Location::from_search("Anywhere", 1.0, 2.0).unwrap());

        assert!(session.error().is_none());
        assert_eq!(session.phase(), Phase::Resolved);
    }

    #[tokio::test]
    async fn test_locate_success() {
        let (mut session, _temp) = test_session();
        let locator = MockLocator {
            outcome: Ok(test_fix()),
        };

        session
            .locate(Some(&locator), &good_geocoder(), &LocateOptions::default())
            .await;

        assert_eq!(session.phase(), Phase::Resolved);
        let current = session.current().unwrap();
        assert_eq!(current.name, "New York, NY, USA");
        assert_eq!(current.lat, 40.7128);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_locate_with_failed_geocode_still_records() {
        let (mut session, _temp) = test_session();
        let locator = MockLocator {
            outcome: Ok(test_fix()),
        };
        let resolver = AddressResolver::new(MockGeocoder {
            outcome: Err("OVER_QUERY_LIMIT".to_string()),
        });

        session
            .locate(Some(&locator), &resolver, &LocateOptions::default())
            .await;

        assert_eq!(session.phase(), Phase::Resolved);
        let current = session.current().unwrap();
        assert_eq!(current.name, "Unknown location");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].name, "Unknown location");
    }

    #[tokio::test]
    async fn test_locate_failure_clears_selection_keeps_history() {
        let (mut session, _temp) = test_session();

        session.select_place(Location::from_search("Central Park", 40.7851, -73.9683).unwrap());
        assert_eq!(session.history().len(), 1);

        let locator = MockLocator {
            outcome: Err("User denied Geolocation".to_string()),
        };
        session
            .locate(Some(&locator), &good_geocoder(), &LocateOptions::default())
            .await;

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.error(), Some("User denied Geolocation"));
        assert!(session.current().is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_locate_without_locator() {
        let (mut session, _temp) = test_session();

        session
            .locate(
                None::<&MockLocator>,
                &good_geocoder(),
                &LocateOptions::default(),
            )
            .await;

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.error(), Some(NO_LOCATOR_MESSAGE));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_select_history_verbatim() {
        let (mut session, _temp) = test_session();

        let older = Location::from_search("Older", 1.0, 2.0).unwrap();
        let newer = Location::from_search("Newer", 3.0, 4.0).unwrap();
        session.select_place(older.clone());
        session.select_place(newer);
        session.toggle_history();
        assert!(session.history_visible());

        assert!(session.select_history(1));

        assert_eq!(session.current(), Some(&older));
        assert_eq!(session.phase(), Phase::Resolved);
        assert!(!session.history_visible());
    }

    #[test]
    fn test_select_history_out_of_range() {
        let (mut session, _temp) = test_session();
        assert!(!session.select_history(0));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_clear_history_keeps_selection() {
        let (mut session, _temp) = test_session();

        let loc = Location::from_search("Kept", 1.0, 2.0).unwrap();
        session.select_place(loc.clone());
        session.toggle_history();

        session.clear_history();

        assert!(session.history().is_empty());
        assert!(!session.history_visible());
        assert_eq!(session.current(), Some(&loc));
    }

    #[test]
    fn test_copy_coordinates() {
        let (mut session, _temp) = test_session();
        let clipboard = MemoryClipboard::default();
        let now = Utc::now();

        session.select_place(Location::from_search("NYC", 40.7128, -74.006).unwrap());

        let text = session.copy_coordinates(&clipboard, now).unwrap();
        assert_eq!(text, "40.7128, -74.006");
        assert_eq!(clipboard.contents.borrow()[0], "40.7128, -74.006");

        // Indicator active just after the copy, expired after the reset window
        assert!(session.copied(now));
        assert!(session.copied(now + Duration::milliseconds(COPIED_RESET_MS - 1)));
        assert!(!session.copied(now + Duration::milliseconds(COPIED_RESET_MS)));
    }

    #[test]
    fn test_copy_without_selection() {
        let (mut session, _temp) = test_session();
        let clipboard = MemoryClipboard::default();

        let err = session.copy_coordinates(&clipboard, Utc::now()).unwrap_err();
        assert!(matches!(err, Error::NoSelection));
        assert!(clipboard.contents.borrow().is_empty());
    }

    #[test]
    fn test_failed_copy_does_not_arm_indicator() {
        let (mut session, _temp) = test_session();
        let now = Utc::now();

        session.select_place(Location::from_search("NYC", 40.7128, -74.006).unwrap());
        assert!(session.copy_coordinates(&FailingClipboard, now).is_err());
        assert!(!session.copied(now));
    }

    #[test]
    fn test_map_url() {
        let (mut session, _temp) = test_session();
        let config = Config::default();

        session.select_place(Location::from_search("NYC", 40.7128, -74.006).unwrap());

        let url = session.map_url(&config, None).unwrap();
        assert_eq!(url, "https://www.google.com/maps?q=40.7128,-74.006");

        assert!(matches!(
            Session::new(RecentLocations::load_from(
                _temp.path().join("other.json")
            ))
            .map_url(&config, None),
            Err(Error::NoSelection)
        ));
    }
}
