//! Timetable records and per-station datasets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ClockTime, MalformedTimeError, TrainCategory, parse_time_label};

/// One scheduled train at one station.
///
/// Field names follow the scraped timetable files (`時刻`, `種別`, `行き先`);
/// the English names are accepted as aliases. The time label is kept as
/// written and parsed on demand, so a malformed label only affects the
/// record that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(rename = "時刻", alias = "time")]
    pub time: String,

    #[serde(rename = "種別", alias = "category")]
    pub category: String,

    #[serde(rename = "行き先", alias = "destination", default)]
    pub destination: String,
}

impl ScheduleRecord {
    pub fn new(
        time: impl Into<String>,
        category: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            category: category.into(),
            destination: destination.into(),
        }
    }

    /// Parse the time label.
    pub fn clock_time(&self) -> Result<ClockTime, MalformedTimeError> {
        parse_time_label(&self.time)
    }

    /// Classify the category label.
    pub fn train_category(&self) -> TrainCategory {
        TrainCategory::parse(&self.category)
    }
}

/// Schedule records keyed by station name, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationDataset {
    stations: HashMap<String, Vec<ScheduleRecord>>,
}

impl StationDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records to a station, creating it if needed.
    pub fn extend_station(
        &mut self,
        station: impl Into<String>,
        records: impl IntoIterator<Item = ScheduleRecord>,
    ) {
        self.stations
            .entry(station.into())
            .or_default()
            .extend(records);
    }

    /// Records for a station. A station that was never loaded has none.
    pub fn records(&self, station: &str) -> &[ScheduleRecord] {
        self.stations.get(station).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, station: &str) -> bool {
        self.stations.contains_key(station)
    }

    /// Station names in sorted order.
    pub fn station_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stations.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Total number of records across all stations.
    pub fn record_count(&self) -> usize {
        self.stations.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<ScheduleRecord>)> for StationDataset {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ScheduleRecord>)>>(iter: I) -> Self {
        let mut dataset = StationDataset::new();
        for (station, records) in iter {
            dataset.extend_station(station, records);
        }
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_japanese_keys() {
        let json = r#"{"時刻": "5時台03分", "種別": "急行", "行き先": "元町・中華街"}"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.time, "5時台03分");
        assert_eq!(record.train_category(), TrainCategory::Express);
        assert_eq!(record.destination, "元町・中華街");
        assert_eq!(record.clock_time().unwrap().to_string(), "05:03");
    }

    #[test]
    fn deserialize_english_aliases() {
        let json = r#"{"time": "05:03", "category": "rapid", "destination": "X"}"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, ScheduleRecord::new("05:03", "rapid", "X"));
    }

    #[test]
    fn destination_is_optional() {
        let record: ScheduleRecord =
            serde_json::from_str(r#"{"time": "bad", "category": "x"}"#).unwrap();
        assert_eq!(record.destination, "");
        assert!(record.clock_time().is_err());
    }

    #[test]
    fn missing_station_has_no_records() {
        let dataset = StationDataset::new();
        assert!(dataset.records("渋谷").is_empty());
        assert!(!dataset.contains("渋谷"));
    }

    #[test]
    fn extend_station_appends_in_order() {
        let mut dataset = StationDataset::new();
        dataset.extend_station("A", [ScheduleRecord::new("06:00", "各停", "X")]);
        dataset.extend_station("A", [ScheduleRecord::new("05:00", "各停", "X")]);

        let times: Vec<&str> = dataset.records("A").iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, ["06:00", "05:00"]);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.record_count(), 2);
    }

    #[test]
    fn station_names_are_sorted() {
        let dataset: StationDataset = [
            ("B".to_string(), vec![]),
            ("A".to_string(), vec![]),
        ]
        .into_iter()
        .collect();
        assert_eq!(dataset.station_names(), ["A", "B"]);
    }
}
