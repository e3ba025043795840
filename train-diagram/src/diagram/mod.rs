//! Train diagram layout and output.
//!
//! A diagram plots time of day along the horizontal axis and stations, in
//! route order, down the vertical axis. Each scheduled departure becomes a
//! marker coloured by train category.
//!
//! ```
//! use train_diagram::diagram::{ColorTable, DiagramConfig, DiagramRenderer, FontResource};
//! use train_diagram::domain::{ScheduleRecord, StationDataset};
//!
//! let mut dataset = StationDataset::new();
//! dataset.extend_station("渋谷", [ScheduleRecord::new("05:03", "急行", "元町・中華街")]);
//!
//! let config = DiagramConfig::default();
//! let font = FontResource::init(&config.font).unwrap();
//! let renderer = DiagramRenderer::new(config, ColorTable::default(), font).unwrap();
//!
//! let (diagram, summary) = renderer.layout(&dataset, &["渋谷", "中目黒"]).unwrap();
//! assert_eq!(diagram.station_lines.len(), 2);
//! assert_eq!(summary.markers, 1);
//! ```

mod config;
mod document;
mod error;
mod font;
mod geometry;
mod palette;
mod render;
mod station_axis;
mod time_axis;

pub use config::{
    DiagramConfig, FontConfig, Margins, OutOfRangePolicy, POINTS_PER_MM, PageSize, PlotArea,
    TimeRange, mm,
};
pub use document::{render_svg, write_svg};
pub use error::{ConfigError, OutOfRangeError, RecordError, RenderError, ResourceInitError};
pub use font::{EmbeddedFont, FontResource};
pub use geometry::{Anchor, Diagram, GridLine, Label, Marker, Point};
pub use palette::ColorTable;
pub use render::{DiagramRenderer, RenderSummary, RenderedDocument, SkippedRecord, render};
pub use station_axis::StationAxis;
pub use time_axis::{HourTick, TimeAxis};
