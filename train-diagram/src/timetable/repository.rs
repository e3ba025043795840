//! Timetable repositories.
//!
//! A repository produces a [`StationDataset`] plus the per-file failures it
//! ran into. The directory-backed implementation reads one JSON file per
//! station (or combined files keyed by station name); the in-memory one
//! serves fixtures.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use tracing::{debug, warn};

use crate::domain::{ScheduleRecord, StationDataset};

use super::error::LoadError;

/// Destination used when a record carries none.
pub const DEFAULT_FALLBACK_DESTINATION: &str = "不明";

/// Outcome of loading every timetable a repository knows about.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Everything that loaded successfully.
    pub dataset: StationDataset,
    /// Files (or the directory) that could not be loaded.
    pub errors: Vec<LoadError>,
}

impl LoadReport {
    /// Whether every file loaded without error.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Source of station timetables.
///
/// This abstraction keeps the renderer independent of where timetables are
/// stored, and lets tests supply fixtures.
pub trait TimetableRepository {
    /// Load all station timetables.
    ///
    /// Never fails as a whole: unreadable sources are reported in
    /// [`LoadReport::errors`] and skipped.
    fn load_all(&self) -> LoadReport;
}

/// Repository backed by a directory of `.json` timetable files.
///
/// Each file is either a flat array of records, whose station name comes
/// from the file name (`shibuya_timetable.json` → `Shibuya`), or an object
/// mapping station names to record arrays.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    dir: PathBuf,
    fallback_destination: String,
}

impl DirectoryRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fallback_destination: DEFAULT_FALLBACK_DESTINATION.to_string(),
        }
    }

    /// Set the destination substituted for records that have none.
    pub fn with_fallback_destination(mut self, destination: impl Into<String>) -> Self {
        self.fallback_destination = destination.into();
        self
    }

    /// The directory this repository reads.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List `.json` files in the directory, sorted by path.
    fn json_files(&self, errors: &mut Vec<LoadError>) -> Option<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(source) => {
                errors.push(LoadError::MissingDirectory {
                    path: self.dir.clone(),
                    source,
                });
                return None;
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    errors.push(LoadError::ReadDir {
                        path: self.dir.clone(),
                        source,
                    });
                    continue;
                }
            };

            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();
        Some(files)
    }

    /// Read one file into `(station, records)` pairs.
    fn load_file(&self, path: &Path) -> Result<Vec<(String, Vec<ScheduleRecord>)>, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let malformed = |source: serde_json::Error| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        };

        let value: serde_json::Value = serde_json::from_str(&json).map_err(malformed)?;
        let mut stations = match value {
            serde_json::Value::Array(_) => {
                let records: Vec<ScheduleRecord> =
                    serde_json::from_value(value).map_err(malformed)?;
                let station = station_name_from_path(path).ok_or_else(|| {
                    LoadError::StationName {
                        path: path.to_path_buf(),
                    }
                })?;
                vec![(station, records)]
            }
            serde_json::Value::Object(_) => {
                let keyed: BTreeMap<String, Vec<ScheduleRecord>> =
                    serde_json::from_value(value).map_err(malformed)?;
                keyed.into_iter().collect()
            }
            _ => {
                return Err(malformed(serde_json::Error::custom(
                    "expected an array of records or an object keyed by station",
                )));
            }
        };

        for (_, records) in &mut stations {
            for record in records.iter_mut() {
                if record.destination.is_empty() {
                    record.destination.clone_from(&self.fallback_destination);
                }
            }
        }

        Ok(stations)
    }
}

impl TimetableRepository for DirectoryRepository {
    fn load_all(&self) -> LoadReport {
        let mut report = LoadReport::default();

        let Some(files) = self.json_files(&mut report.errors) else {
            warn!(dir = ?self.dir, "Timetable directory unavailable, nothing loaded");
            return report;
        };

        for path in files {
            match self.load_file(&path) {
                Ok(stations) => {
                    for (station, records) in stations {
                        debug!(file = ?path, station = %station, records = records.len(), "Loaded timetable");
                        report.dataset.extend_station(station, records);
                    }
                }
                Err(e) => {
                    warn!(file = ?path, error = %e, "Skipping timetable file");
                    report.errors.push(e);
                }
            }
        }

        report
    }
}

/// Repository serving a fixed dataset.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    dataset: StationDataset,
}

impl InMemoryRepository {
    pub fn new(dataset: StationDataset) -> Self {
        Self { dataset }
    }
}

impl TimetableRepository for InMemoryRepository {
    fn load_all(&self) -> LoadReport {
        LoadReport {
            dataset: self.dataset.clone(),
            errors: Vec::new(),
        }
    }
}

/// Load every timetable file in `dir`.
pub fn load(dir: impl Into<PathBuf>) -> LoadReport {
    DirectoryRepository::new(dir).load_all()
}

/// Station name for a flat record file: the file stem up to the first `_`,
/// capitalized: first character upper-cased, the rest lower-cased.
fn station_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.split('_').next().unwrap_or(stem);
    let mut chars = name.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
}
