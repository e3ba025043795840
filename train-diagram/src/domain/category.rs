//! Train service categories.

use std::fmt;

use super::Color;

/// A train service tier, as printed on timetables.
///
/// The known variants cover the categories found on the lines we draw;
/// anything else is carried verbatim in [`TrainCategory::Other`]. Parsing is
/// exact: no case folding or whitespace trimming.
///
/// # Examples
///
/// ```
/// use train_diagram::domain::TrainCategory;
///
/// assert_eq!(TrainCategory::parse("急行"), TrainCategory::Express);
/// assert_eq!(TrainCategory::parse("各停"), TrainCategory::Local);
/// assert_eq!(
///     TrainCategory::parse("各駅停車"),
///     TrainCategory::Other("各駅停車".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrainCategory {
    /// 特急
    LimitedExpress,
    /// 急行
    Express,
    /// 各停
    Local,
    /// 通勤特急
    CommuterLimitedExpress,
    /// Fライナ
    FLiner,
    /// Any label not listed above.
    Other(String),
}

impl TrainCategory {
    /// Every known category, in drawing-priority order.
    pub const KNOWN: [TrainCategory; 5] = [
        TrainCategory::LimitedExpress,
        TrainCategory::Express,
        TrainCategory::Local,
        TrainCategory::CommuterLimitedExpress,
        TrainCategory::FLiner,
    ];

    /// Classify a timetable label.
    pub fn parse(label: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.label() == label)
            .unwrap_or_else(|| TrainCategory::Other(label.to_string()))
    }

    /// The label as it appears in timetable records.
    pub fn label(&self) -> &str {
        match self {
            TrainCategory::LimitedExpress => "特急",
            TrainCategory::Express => "急行",
            TrainCategory::Local => "各停",
            TrainCategory::CommuterLimitedExpress => "通勤特急",
            TrainCategory::FLiner => "Fライナ",
            TrainCategory::Other(label) => label,
        }
    }

    /// Built-in colour for a known category. `Other` has none.
    pub fn default_color(&self) -> Option<Color> {
        match self {
            TrainCategory::LimitedExpress => Some(Color::RED),
            TrainCategory::Express => Some(Color::BLUE),
            TrainCategory::Local => Some(Color::BLACK),
            TrainCategory::CommuterLimitedExpress => Some(Color::GREEN),
            TrainCategory::FLiner => Some(Color::RED),
            TrainCategory::Other(_) => None,
        }
    }
}

impl fmt::Display for TrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_round_trip() {
        for category in TrainCategory::KNOWN {
            assert_eq!(TrainCategory::parse(category.label()), category);
            assert!(category.default_color().is_some());
        }
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(
            TrainCategory::parse(" 急行"),
            TrainCategory::Other(" 急行".to_string())
        );
        assert_eq!(
            TrainCategory::parse("fライナ"),
            TrainCategory::Other("fライナ".to_string())
        );
    }

    #[test]
    fn other_has_no_builtin_color() {
        assert_eq!(TrainCategory::parse("rapid").default_color(), None);
        assert_eq!(TrainCategory::parse("rapid").to_string(), "rapid");
    }
}
