//! Timetable loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading timetable files.
///
/// None of these abort a load: each is recorded against the file it
/// concerns and loading continues with the remaining files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source directory does not exist or cannot be listed
    #[error("timetable directory {path:?} unavailable: {source}")]
    MissingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory entry could not be read
    #[error("failed to read entry in {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A timetable file could not be read
    #[error("failed to read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A timetable file is not a record array or a station-keyed object
    #[error("malformed timetable file {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A flat record file whose name yields no station name
    #[error("cannot derive a station name from {path:?}")]
    StationName { path: PathBuf },
}

impl LoadError {
    /// The file or directory the error concerns.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::MissingDirectory { path, .. }
            | LoadError::ReadDir { path, .. }
            | LoadError::ReadFile { path, .. }
            | LoadError::Malformed { path, .. }
            | LoadError::StationName { path } => path.as_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoadError::StationName {
            path: PathBuf::from("time_tables/.json"),
        };
        assert_eq!(
            err.to_string(),
            "cannot derive a station name from \"time_tables/.json\""
        );

        let err = LoadError::MissingDirectory {
            path: PathBuf::from("nowhere"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("\"nowhere\" unavailable"));
        assert_eq!(err.path(), std::path::Path::new("nowhere"));
    }
}
