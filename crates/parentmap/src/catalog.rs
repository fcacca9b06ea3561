//! The venue catalog.
//!
//! A catalog is an ordered, id-unique list of venues loaded from one or more
//! JSON dataset files. Two file shapes are accepted: a bare array of venues, or
//! the export envelope written by [`Catalog::write`]:
//!
//! ```json
//! { "metadata": { "exported_at": "...", "total_count": 2, "version": "1.0" },
//!   "locations": [ ... ] }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::venue::Venue;

/// Version tag written into export metadata.
pub const EXPORT_VERSION: &str = "1.0";

/// Metadata block of an exported dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// When the export was produced.
    pub exported_at: DateTime<Utc>,
    /// Number of venues in `locations`.
    pub total_count: usize,
    /// Export format version.
    pub version: String,
}

/// An exported dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    /// Export metadata.
    pub metadata: ExportMetadata,
    /// The venues.
    pub locations: Vec<Venue>,
}

#[derive(Deserialize)]
struct Envelope {
    locations: Vec<Venue>,
}

/// Ordered collection of venues with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    venues: Vec<Venue>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is neither a venue array nor an export
    /// envelope.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.extend(parse_dataset(json)?);
        Ok(catalog)
    }

    /// Load a single dataset file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_all([path])
    }

    /// Load and merge several dataset files in order.
    ///
    /// When an id repeats, the first occurrence is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or parsed.
    pub fn load_all<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut catalog = Self::new();

        for path in paths {
            let path = path.as_ref();
            debug!("Loading dataset from {}", path.display());

            let json = std::fs::read_to_string(path).map_err(|source| Error::DatasetRead {
                path: path.to_path_buf(),
                source,
            })?;
            let venues = parse_dataset(&json).map_err(|err| match err {
                Error::Json(source) => Error::DatasetParse {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })?;

            let count = venues.len();
            let added = catalog.extend(venues);
            info!(
                "Loaded {added} of {count} venues from {}",
                path.display()
            );
        }

        Ok(catalog)
    }

    /// Add a venue. Returns `false` and keeps the existing record if the id
    /// is already present.
    pub fn insert(&mut self, venue: Venue) -> bool {
        if self.index.contains_key(&venue.id) {
            warn!("Duplicate venue id {}, keeping first occurrence", venue.id);
            return false;
        }
        self.index.insert(venue.id.clone(), self.venues.len());
        self.venues.push(venue);
        true
    }

    /// Add many venues; returns how many were new.
    pub fn extend(&mut self, venues: impl IntoIterator<Item = Venue>) -> usize {
        venues
            .into_iter()
            .map(|venue| self.insert(venue))
            .filter(|added| *added)
            .count()
    }

    /// Look up a venue by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Venue> {
        self.index.get(id).map(|&i| &self.venues[i])
    }

    /// Look up a venue by id, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VenueNotFound`] if no venue has this id.
    pub fn require(&self, id: &str) -> Result<&Venue> {
        self.get(id).ok_or_else(|| Error::venue_not_found(id))
    }

    /// Venues in insertion order.
    #[must_use]
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Iterate venues in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Venue> {
        self.venues.iter()
    }

    /// Number of venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Build the export envelope, stamped with the current time.
    #[must_use]
    pub fn export(&self) -> Export {
        Export {
            metadata: ExportMetadata {
                exported_at: Utc::now(),
                total_count: self.venues.len(),
                version: EXPORT_VERSION.to_string(),
            },
            locations: self.venues.clone(),
        }
    }

    /// Write the export envelope as pretty-printed JSON.
    ///
    /// Creates parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot
    /// be written.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.export())?;
        std::fs::write(&path, json)?;
        info!("Exported {} venues to {}", self.len(), path.display());
        Ok(path)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Venue;
    type IntoIter = std::slice::Iter<'a, Venue>;

    fn into_iter(self) -> Self::IntoIter {
        self.venues.iter()
    }
}

// The shape is decided first so that record errors keep their line and column.
fn parse_dataset(json: &str) -> Result<Vec<Venue>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        Ok(serde_json::from_str(json)?)
    } else if value.get("locations").is_some() {
        let envelope: Envelope = serde_json::from_str(json)?;
        Ok(envelope.locations)
    } else {
        Err(Error::Json(serde::de::Error::custom(
            "expected an array of venues or an object with a `locations` array",
        )))
    }
}
