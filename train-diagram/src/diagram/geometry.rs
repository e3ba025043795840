//! Drawing primitives of a laid-out diagram.
//!
//! Everything here is in page coordinates (points, origin bottom-left,
//! y up). A [`Diagram`] is pure geometry: two layouts of the same input are
//! equal position for position, whatever document they are later written to.

use crate::domain::{ClockTime, Color};

use super::config::{PageSize, PlotArea};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A straight gridline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Baseline anchor point.
    pub at: Point,
    pub anchor: Anchor,
}

/// One train at one station.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
    pub station: String,
    pub time: ClockTime,
    pub category: String,
    pub destination: String,
}

/// A fully laid-out train diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub page: PageSize,
    pub area: PlotArea,
    /// One horizontal line per station, top row first.
    pub station_lines: Vec<GridLine>,
    /// One vertical line per hour tick, earliest first.
    pub time_lines: Vec<GridLine>,
    pub station_labels: Vec<Label>,
    pub time_labels: Vec<Label>,
    pub markers: Vec<Marker>,
}

impl Diagram {
    /// Every label, stations first.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.station_labels.iter().chain(&self.time_labels)
    }
}
