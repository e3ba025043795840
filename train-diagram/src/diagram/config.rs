//! Diagram configuration.

use std::fmt;
use std::path::PathBuf;

use super::error::ConfigError;

/// PostScript points per millimetre.
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimetres to points.
pub fn mm(value: f64) -> f64 {
    value * POINTS_PER_MM
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4, portrait.
    pub const A4: PageSize = PageSize {
        width: 210.0 * POINTS_PER_MM,
        height: 297.0 * POINTS_PER_MM,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: mm(30.0),
            bottom: mm(30.0),
            // Wide enough for station names set right-aligned against the plot.
            left: mm(25.0),
            right: mm(15.0),
        }
    }
}

/// The plot rectangle inside the margins, in page coordinates.
///
/// Page coordinates put the origin at the bottom-left corner with y growing
/// upward, so `upper > lower`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub right: f64,
    pub lower: f64,
    pub upper: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.upper - self.lower
    }
}

/// The time span covered by the horizontal axis.
///
/// Bounds are minutes after midnight of the operating day and may run past
/// 24:00 (up to 47:59), so a range such as 05:00-26:00 covers the first two
/// hours of the next calendar day.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: u32,
    end: u32,
}

impl TimeRange {
    /// Latest representable bound, 47:59.
    const MAX_BOUND: u32 = 48 * 60 - 1;

    /// Create a range from minute bounds.
    pub fn new(start_minutes: u32, end_minutes: u32) -> Result<Self, ConfigError> {
        if start_minutes >= 24 * 60 {
            return Err(ConfigError::InvalidTimeBound {
                input: format_bound(start_minutes),
                reason: "start must be before 24:00",
            });
        }
        if end_minutes > Self::MAX_BOUND {
            return Err(ConfigError::InvalidTimeBound {
                input: format_bound(end_minutes),
                reason: "end must be at most 47:59",
            });
        }
        if end_minutes <= start_minutes {
            return Err(ConfigError::EmptyTimeRange {
                start: format_bound(start_minutes),
                end: format_bound(end_minutes),
            });
        }
        Ok(Self {
            start: start_minutes,
            end: end_minutes,
        })
    }

    /// Parse a range from two `HH:MM` bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_diagram::diagram::TimeRange;
    ///
    /// let range = TimeRange::parse("05:00", "24:00").unwrap();
    /// assert_eq!(range.total_minutes(), 19 * 60);
    ///
    /// assert!(TimeRange::parse("06:00", "05:00").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        Self::new(parse_bound(start)?, parse_bound(end)?)
    }

    /// Start, in minutes after midnight.
    pub fn start_minutes(&self) -> u32 {
        self.start
    }

    /// End, in minutes after midnight of the start day.
    pub fn end_minutes(&self) -> u32 {
        self.end
    }

    pub fn total_minutes(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the range runs past midnight.
    pub fn crosses_midnight(&self) -> bool {
        self.end > 24 * 60
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: 5 * 60,
            end: 24 * 60,
        }
    }
}

impl fmt::Debug for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeRange({self})")
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_bound(self.start), format_bound(self.end))
    }
}

/// Parse an `HH:MM` range bound; hours may exceed 23.
fn parse_bound(input: &str) -> Result<u32, ConfigError> {
    let invalid = |reason| ConfigError::InvalidTimeBound {
        input: input.to_string(),
        reason,
    };

    let (h, m) = input.trim().split_once(':').ok_or_else(|| invalid("expected HH:MM"))?;
    let all_digits = |s: &str| !s.is_empty() && s.len() <= 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(h) || m.len() != 2 || !all_digits(m) {
        return Err(invalid("expected HH:MM"));
    }

    let hour: u32 = h.parse().map_err(|_| invalid("invalid hour"))?;
    let minute: u32 = m.parse().map_err(|_| invalid("invalid minute"))?;
    if minute >= 60 {
        return Err(invalid("minute must be 0-59"));
    }
    Ok(hour * 60 + minute)
}

fn format_bound(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Font used for station and hour labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    /// Font family name. Must cover the station names (CJK for Japanese lines).
    pub family: String,

    /// Label size in points.
    pub size: f64,

    /// Optional TTF/OTF/WOFF/WOFF2 file embedded into the document, so the
    /// diagram renders the same on machines without the family installed.
    pub file: Option<PathBuf>,
}

impl FontConfig {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            file: None,
        }
    }

    /// Embed a font file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::new("HeiseiKakuGo-W5", 10.0)
    }
}

/// What to do with a marker whose time falls outside the diagram's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRangePolicy {
    /// Drop the marker and report the record as skipped.
    #[default]
    Skip,
    /// Pin the marker to the nearest edge of the plot.
    Clamp,
}

/// Configuration for one diagram render.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    pub page: PageSize,
    pub margins: Margins,
    pub time_range: TimeRange,

    /// Hours between vertical gridlines. Gridlines fall on hours divisible
    /// by this step.
    pub hour_grid_step: u32,

    /// Marker radius in points.
    pub marker_radius: f64,

    pub font: FontConfig,
    pub out_of_range: OutOfRangePolicy,
}

impl DiagramConfig {
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_hour_grid_step(mut self, step: u32) -> Self {
        self.hour_grid_step = step;
        self
    }

    pub fn with_font(mut self, font: FontConfig) -> Self {
        self.font = font;
        self
    }

    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    /// The plot rectangle left inside the margins.
    pub fn plot_area(&self) -> Result<PlotArea, ConfigError> {
        let area = PlotArea {
            left: self.margins.left,
            right: self.page.width - self.margins.right,
            lower: self.margins.bottom,
            upper: self.page.height - self.margins.top,
        };
        if !(area.width() > 0.0 && area.height() > 0.0) {
            return Err(ConfigError::DegeneratePlotArea);
        }
        Ok(area)
    }

    /// Check the settings that have no type-level guarantee.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hour_grid_step == 0 {
            return Err(ConfigError::ZeroGridStep);
        }
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(ConfigError::InvalidMarkerRadius(self.marker_radius));
        }
        self.plot_area()?;
        Ok(())
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            margins: Margins::default(),
            time_range: TimeRange::default(),
            hour_grid_step: 2,
            marker_radius: mm(1.0),
            font: FontConfig::default(),
            out_of_range: OutOfRangePolicy::Skip,
        }
    }
}
