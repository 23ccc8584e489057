//! Recent locations storage
//!
//! Bounded, deduplicated recency list of resolved locations, persisted as a
//! JSON array in the XDG data directory (~/.local/share/whereabouts/).
//! Hydration is best-effort: malformed content is logged and discarded so a
//! corrupt file never breaks startup.

use crate::error::{Error, Result};
use crate::location::Location;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const APP_DIR_NAME: &str = "whereabouts";
const RECENT_FILE_NAME: &str = "recent_locations.json";

/// Maximum number of entries kept in the list
pub const MAX_RECENT_LOCATIONS: usize = 5;

/// Recent locations storage manager
///
/// Entries are ordered most-recent-first and deduplicated by display name.
#[derive(Debug)]
pub struct RecentLocations {
    entries: Vec<Location>,
    path: PathBuf,
}

impl RecentLocations {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))
    }

    /// Get the storage file path
    pub fn storage_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(RECENT_FILE_NAME))
    }

    /// Load recent locations from the default path
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(Self::storage_path()?))
    }

    /// Load recent locations from a specific path
    ///
    /// A missing file yields an empty list. Malformed or unreadable content
    /// is logged and yields an empty list rather than an error.
    pub fn load_from(path: PathBuf) -> Self {
        let entries = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "failed to parse recent locations, starting empty"
                        );
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to read recent locations, starting empty"
                    );
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Self { entries, path }
    }

    /// Add a location to the front of the list
    ///
    /// Any existing entry with the same name is removed first, so a repeated
    /// name refreshes its position (and fields) rather than duplicating. The
    /// list is truncated to [`MAX_RECENT_LOCATIONS`] and the whole list is
    /// persisted. Returns the new state.
    pub fn add(&mut self, location: Location) -> &[Location] {
        self.entries.retain(|e| e.name != location.name);
        self.entries.insert(0, location);
        self.entries.truncate(MAX_RECENT_LOCATIONS);
        self.persist();
        &self.entries
    }

    /// Clear all entries and remove the storage file
    pub fn clear(&mut self) {
        self.entries.clear();
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %e, "failed to remove recent locations file");
            }
        }
    }

    /// Get all entries, most recent first
    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    /// Get an entry by position (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&Location> {
        self.entries.get(index)
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the whole list to disk
    ///
    /// Persistence failures must not crash the caller; they are logged and
    /// the in-memory state stays authoritative for this process.
    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(path = %self.path.display(), error = %e, "failed to create data directory");
                return;
            }
        }

        match serde_json::to_string_pretty(&self.entries) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    warn!(path = %self.path.display(), error = %e, "failed to write recent locations");
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to serialize recent locations");
            }
        }
    }
}
