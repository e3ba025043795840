//! Vertical axis: station rank to page y.

use super::config::PlotArea;
use super::error::OutOfRangeError;

/// Spaces stations evenly between the plot's upper and lower edges.
///
/// Index 0 is the top row. Order is whatever the caller supplies; the axis
/// does no sorting or deduplication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationAxis {
    lower: f64,
    upper: f64,
}

impl StationAxis {
    pub fn new(area: &PlotArea) -> Self {
        Self {
            lower: area.lower,
            upper: area.upper,
        }
    }

    /// Distance between adjacent rows, or `None` for fewer than two stations.
    pub fn spacing(&self, total: usize) -> Option<f64> {
        (total >= 2).then(|| (self.upper - self.lower) / (total - 1) as f64)
    }

    /// Page y for the station at `index` out of `total`.
    ///
    /// A single station sits midway between the edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_diagram::diagram::{PlotArea, StationAxis};
    ///
    /// let area = PlotArea { left: 0.0, right: 100.0, lower: 0.0, upper: 90.0 };
    /// let axis = StationAxis::new(&area);
    ///
    /// assert_eq!(axis.to_y(0, 4).unwrap(), 90.0);
    /// assert_eq!(axis.to_y(3, 4).unwrap(), 0.0);
    /// assert_eq!(axis.to_y(0, 1).unwrap(), 45.0);
    /// assert!(axis.to_y(4, 4).is_err());
    /// ```
    pub fn to_y(&self, index: usize, total: usize) -> Result<f64, OutOfRangeError> {
        if index >= total {
            return Err(OutOfRangeError::Station { index, total });
        }
        Ok(match self.spacing(total) {
            Some(spacing) => self.upper - index as f64 * spacing,
            None => (self.upper + self.lower) / 2.0,
        })
    }

    /// Page y of every row, top first.
    pub fn positions(&self, total: usize) -> Vec<f64> {
        (0..total)
            .filter_map(|index| self.to_y(index, total).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> StationAxis {
        StationAxis::new(&PlotArea {
            left: 0.0,
            right: 500.0,
            lower: 100.0,
            upper: 700.0,
        })
    }

    #[test]
    fn first_station_on_upper_edge_last_on_lower() {
        let axis = axis();
        assert_eq!(axis.to_y(0, 2).unwrap(), 700.0);
        assert_eq!(axis.to_y(1, 2).unwrap(), 100.0);
        assert_eq!(axis.to_y(1, 3).unwrap(), 400.0);
    }

    #[test]
    fn single_station_is_centred() {
        assert_eq!(axis().to_y(0, 1).unwrap(), 400.0);
        assert_eq!(axis().spacing(1), None);
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(
            axis().to_y(2, 2),
            Err(OutOfRangeError::Station { index: 2, total: 2 })
        );
        assert!(axis().to_y(0, 0).is_err());
    }

    #[test]
    fn positions_cover_every_row() {
        assert_eq!(axis().positions(4), [700.0, 500.0, 300.0, 100.0]);
        assert!(axis().positions(0).is_empty());
    }
}
