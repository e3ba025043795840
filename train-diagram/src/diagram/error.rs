//! Diagram error types.
//!
//! Record-level errors ([`RecordError`]) never abort a render; they are
//! collected in the render summary. Only configuration and resource errors
//! are fatal.

use std::path::PathBuf;

use crate::domain::MalformedTimeError;

/// A coordinate request outside the diagram's domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutOfRangeError {
    /// Minutes after the range start fall outside `[0, total]`
    #[error("time offset {offset} min outside diagram range 0..={total} min")]
    Time { offset: i64, total: i64 },

    /// Station index is not below the station count
    #[error("station index {index} outside 0..{total}")]
    Station { index: usize, total: usize },
}

/// Why a single schedule record produced no marker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    MalformedTime(#[from] MalformedTimeError),

    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),
}

/// Invalid diagram configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A time range bound could not be parsed
    #[error("invalid time range bound {input:?}: {reason}")]
    InvalidTimeBound { input: String, reason: &'static str },

    /// The time range end is not after its start
    #[error("time range {start}-{end} is empty")]
    EmptyTimeRange { start: String, end: String },

    /// Hour gridline step of zero
    #[error("hour grid step must be at least 1")]
    ZeroGridStep,

    /// Marker radius not a positive finite number
    #[error("marker radius must be positive, got {0}")]
    InvalidMarkerRadius(f64),

    /// Margins leave no room for the plot
    #[error("margins leave no room for the plot")]
    DegeneratePlotArea,

    /// A colour table file could not be read
    #[error("failed to read colour table {path:?}: {source}")]
    ColorTableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A colour table file is not an object of `#rrggbb` strings
    #[error("malformed colour table {path:?}: {source}")]
    ColorTableJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to set up a resource the document needs. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ResourceInitError {
    /// Font settings unusable
    #[error("invalid font: {0}")]
    InvalidFont(&'static str),

    /// Font file could not be read
    #[error("failed to read font file {path:?}: {source}")]
    FontFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font file extension not embeddable
    #[error("unsupported font format {path:?}: expected ttf, otf, woff or woff2")]
    UnsupportedFontFormat { path: PathBuf },

    /// Output path has no file name
    #[error("invalid output path {path:?}")]
    InvalidOutputPath { path: PathBuf },

    /// Output file could not be created
    #[error("failed to create output for {path:?}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document template failed to render
    #[error("failed to render document: {0}")]
    Template(#[from] askama::Error),

    /// Writing the document failed
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving the finished document into place failed
    #[error("failed to persist {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The station list is empty
    #[error("at least one station is required")]
    NoStations,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("resource initialization failed: {0}")]
    ResourceInit(#[from] ResourceInitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = OutOfRangeError::Time {
            offset: -10,
            total: 60,
        };
        assert_eq!(
            err.to_string(),
            "time offset -10 min outside diagram range 0..=60 min"
        );

        let err = OutOfRangeError::Station { index: 3, total: 2 };
        assert_eq!(err.to_string(), "station index 3 outside 0..2");

        let err = RenderError::NoStations;
        assert_eq!(err.to_string(), "at least one station is required");

        let err = RenderError::from(ResourceInitError::InvalidFont("empty family"));
        assert_eq!(
            err.to_string(),
            "resource initialization failed: invalid font: empty family"
        );

        let err = RenderError::from(ConfigError::ZeroGridStep);
        assert_eq!(
            err.to_string(),
            "invalid configuration: hour grid step must be at least 1"
        );
    }

    #[test]
    fn record_error_is_transparent() {
        let err = RecordError::from(OutOfRangeError::Station { index: 1, total: 1 });
        assert_eq!(err.to_string(), "station index 1 outside 0..1");
    }
}
