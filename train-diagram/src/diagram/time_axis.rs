//! Horizontal axis: time of day to page x.

use crate::domain::{ClockTime, MINUTES_PER_DAY, MalformedTimeError, parse_time_label};

use super::config::{PlotArea, TimeRange};
use super::error::OutOfRangeError;

/// A whole-hour gridline position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourTick {
    /// Hour of the operating day; may exceed 23 for ranges past midnight.
    pub hour: u32,
    pub x: f64,
}

impl HourTick {
    /// `"HH:00"` label for the tick.
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Maps clock times onto the plot's horizontal extent.
///
/// The axis is one continuous timeline from the range start to the range
/// end. When the range runs past midnight, times earlier than the start
/// are placed on the following day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    range: TimeRange,
    left: f64,
    right: f64,
}

impl TimeAxis {
    pub fn new(range: TimeRange, area: &PlotArea) -> Self {
        Self {
            range,
            left: area.left,
            right: area.right,
        }
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Length of the axis in minutes.
    pub fn total_minutes(&self) -> i64 {
        i64::from(self.range.total_minutes())
    }

    /// Points per minute.
    pub fn scale(&self) -> f64 {
        (self.right - self.left) / self.total_minutes() as f64
    }

    /// Minutes from the range start to `time`. Negative, or beyond
    /// [`total_minutes`](Self::total_minutes), when outside the range.
    pub fn offset_of(&self, time: ClockTime) -> i64 {
        let start = i64::from(self.range.start_minutes());
        let mut minutes = i64::from(time.minutes_of_day());
        if minutes < start && self.range.crosses_midnight() {
            minutes += i64::from(MINUTES_PER_DAY);
        }
        minutes - start
    }

    /// Parse a time label and return its offset from the range start.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_diagram::diagram::{DiagramConfig, TimeAxis, TimeRange};
    ///
    /// let config = DiagramConfig::default();
    /// let axis = TimeAxis::new(TimeRange::default(), &config.plot_area().unwrap());
    ///
    /// assert_eq!(axis.to_offset_minutes("05:03").unwrap(), 3);
    /// assert_eq!(axis.to_offset_minutes("6時台10分").unwrap(), 70);
    /// assert!(axis.to_offset_minutes("bad").is_err());
    /// ```
    pub fn to_offset_minutes(&self, label: &str) -> Result<i64, MalformedTimeError> {
        Ok(self.offset_of(parse_time_label(label)?))
    }

    /// Page x for an offset, or an error when it lies outside the range.
    pub fn to_x(&self, offset: i64) -> Result<f64, OutOfRangeError> {
        let total = self.total_minutes();
        if offset < 0 || offset > total {
            return Err(OutOfRangeError::Time { offset, total });
        }
        Ok(self.left + offset as f64 * self.scale())
    }

    /// Page x for an offset, pinned to the nearest end of the axis.
    pub fn clamp_x(&self, offset: i64) -> f64 {
        let clamped = offset.clamp(0, self.total_minutes());
        self.left + clamped as f64 * self.scale()
    }

    /// Whole hours within the range (both ends included) divisible by `step`.
    pub fn hour_ticks(&self, step: u32) -> Vec<HourTick> {
        if step == 0 {
            return Vec::new();
        }
        let start = self.range.start_minutes();
        let first_hour = start.div_ceil(60);
        let last_hour = self.range.end_minutes() / 60;

        (first_hour..=last_hour)
            .filter(|hour| hour % step == 0)
            .map(|hour| HourTick {
                hour,
                x: self.left + f64::from(hour * 60 - start) * self.scale(),
            })
            .collect()
    }
}
