//! Wall-clock times as they appear on station timetables.
//!
//! Timetable sources spell the same minute in more than one way: the
//! canonical `"HH:MM"` form, and the hour-bucket form printed on Japanese
//! station boards (`"5時台03分"`, i.e. the 5 o'clock row, minute 03). Both are
//! normalized here by a single parser into a [`ClockTime`].

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when a time label cannot be decomposed into an hour and a
/// minute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed time label {label:?}: {reason}")]
pub struct MalformedTimeError {
    label: String,
    reason: &'static str,
}

impl MalformedTimeError {
    fn new(label: &str, reason: &'static str) -> Self {
        Self {
            label: label.to_string(),
            reason,
        }
    }

    /// The label that failed to parse.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Short description of what was wrong with the label.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A time of day with minute precision.
///
/// Always within `00:00..=23:59`, so `minutes_of_day` is in `[0, 1440)`.
///
/// # Examples
///
/// ```
/// use train_diagram::domain::ClockTime;
///
/// let t = ClockTime::parse("5時台03分").unwrap();
/// assert_eq!(t, ClockTime::parse("05:03").unwrap());
/// assert_eq!(t.to_string(), "05:03");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Create a time from an hour and minute, if both are in range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Parse any supported time label. See [`parse_time_label`].
    pub fn parse(label: &str) -> Result<Self, MalformedTimeError> {
        parse_time_label(label)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_of_day(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse a timetable time label into a [`ClockTime`].
///
/// Accepted shapes:
///
/// - `"HH:MM"` or `"H:MM"`
/// - `"<H>時台<MM>分"` (hour bucket followed by a minute suffix)
/// - `"<H>時<MM>分"`
///
/// Surrounding whitespace is ignored. Anything else, including an hour
/// outside 0-23 or a minute outside 0-59, is a [`MalformedTimeError`].
///
/// # Examples
///
/// ```
/// use train_diagram::domain::parse_time_label;
///
/// assert_eq!(parse_time_label("23:59").unwrap().minutes_of_day(), 1439);
/// assert_eq!(parse_time_label("5時台3分").unwrap().minutes_of_day(), 303);
/// assert!(parse_time_label("bad").is_err());
/// assert!(parse_time_label("24:00").is_err());
/// ```
pub fn parse_time_label(label: &str) -> Result<ClockTime, MalformedTimeError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(MalformedTimeError::new(label, "empty label"));
    }

    let (hour_str, minute_str) = if let Some((h, m)) = trimmed.split_once(':') {
        if m.len() != 2 {
            return Err(MalformedTimeError::new(label, "expected two minute digits"));
        }
        (h, m)
    } else if let Some((h, rest)) = trimmed.split_once('時') {
        let rest = rest.strip_prefix('台').unwrap_or(rest);
        let m = rest
            .strip_suffix('分')
            .ok_or_else(|| MalformedTimeError::new(label, "missing 分 suffix"))?;
        (h, m)
    } else {
        return Err(MalformedTimeError::new(label, "no hour separator"));
    };

    let hour = parse_digits(hour_str).ok_or_else(|| MalformedTimeError::new(label, "invalid hour"))?;
    let minute =
        parse_digits(minute_str).ok_or_else(|| MalformedTimeError::new(label, "invalid minute"))?;

    if hour >= 24 {
        return Err(MalformedTimeError::new(label, "hour must be 0-23"));
    }
    if minute >= 60 {
        return Err(MalformedTimeError::new(label, "minute must be 0-59"));
    }

    ClockTime::new(hour, minute).ok_or_else(|| MalformedTimeError::new(label, "invalid time"))
}

/// Parse one or two ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_labels() {
        let t = parse_time_label("05:03").unwrap();
        assert_eq!(t.hour(), 5);
        assert_eq!(t.minute(), 3);

        let t = parse_time_label("0:00").unwrap();
        assert_eq!(t.minutes_of_day(), 0);

        let t = parse_time_label("23:59").unwrap();
        assert_eq!(t.minutes_of_day(), MINUTES_PER_DAY - 1);
    }

    #[test]
    fn parse_hour_bucket_labels() {
        assert_eq!(
            parse_time_label("5時台03分").unwrap(),
            ClockTime::new(5, 3).unwrap()
        );
        assert_eq!(
            parse_time_label("23時台5分").unwrap(),
            ClockTime::new(23, 5).unwrap()
        );
        assert_eq!(
            parse_time_label("7時45分").unwrap(),
            ClockTime::new(7, 45).unwrap()
        );
    }

    #[test]
    fn both_encodings_agree() {
        for hour in 0..24 {
            for minute in [0, 1, 9, 30, 59] {
                let canonical = format!("{hour:02}:{minute:02}");
                let bucket = format!("{hour}時台{minute:02}分");
                assert_eq!(
                    parse_time_label(&canonical).unwrap(),
                    parse_time_label(&bucket).unwrap()
                );
            }
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            parse_time_label(" 06:10\n").unwrap(),
            ClockTime::new(6, 10).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in [
            "", "bad", "0503", "05:3", "05:003", "x5:03", "24:00", "05:60", "5時台03",
            "時台03分", "5時台分", "１時台03分", "-1:30",
        ] {
            assert!(
                parse_time_label(label).is_err(),
                "{label:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_carries_label_and_reason() {
        let err = parse_time_label("05:60").unwrap_err();
        assert_eq!(err.label(), "05:60");
        assert_eq!(err.reason(), "minute must be 0-59");
        assert_eq!(
            err.to_string(),
            "malformed time label \"05:60\": minute must be 0-59"
        );
    }

    #[test]
    fn from_naive_time_drops_seconds() {
        let naive = NaiveTime::from_hms_opt(14, 30, 59).unwrap();
        let t = ClockTime::from(naive);
        assert_eq!(t.to_string(), "14:30");
        assert_eq!(t.minutes_of_day(), 14 * 60 + 30);
    }

    #[test]
    fn ordering_follows_wall_clock() {
        let a = ClockTime::new(5, 59).unwrap();
        let b = ClockTime::new(6, 0).unwrap();
        assert!(a < b);
    }
}
