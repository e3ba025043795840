//! Loading station timetables.
//!
//! Timetables arrive as JSON files produced by the scraper, one per station
//! or one combined file keyed by station name. Loading is forgiving: a bad
//! file is reported and skipped, never fatal.

mod error;
mod repository;

pub use error::LoadError;
pub use repository::{
    DEFAULT_FALLBACK_DESTINATION, DirectoryRepository, InMemoryRepository, LoadReport,
    TimetableRepository, load,
};
