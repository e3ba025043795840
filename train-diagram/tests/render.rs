use std::path::Path;

use tempfile::tempdir;
use train_diagram::diagram::{
    ColorTable, DiagramConfig, DiagramRenderer, FontConfig, FontResource, OutOfRangePolicy,
    RecordError, RenderError, ResourceInitError, TimeRange, render,
};
use train_diagram::domain::{Color, ScheduleRecord, StationDataset};
use train_diagram::timetable::{InMemoryRepository, TimetableRepository, load};

fn renderer(config: DiagramConfig) -> DiagramRenderer {
    let font = FontResource::init(&config.font).unwrap();
    DiagramRenderer::new(config, ColorTable::default(), font).unwrap()
}

fn one_hour() -> DiagramConfig {
    DiagramConfig::default().with_time_range(TimeRange::parse("05:00", "06:00").unwrap())
}

fn dataset(station: &str, records: &[(&str, &str)]) -> StationDataset {
    let mut dataset = StationDataset::new();
    dataset.extend_station(
        station,
        records
            .iter()
            .map(|(time, category)| ScheduleRecord::new(*time, *category, "元町・中華街")),
    );
    dataset
}

/// The document without its generation timestamp.
fn stable_contents(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with("<metadata>"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn marker_lands_on_station_row_at_its_time() {
    let renderer = renderer(one_hour());
    let data = dataset("A", &[("05:03", "急行")]);

    let (diagram, summary) = renderer.layout(&data, &["A", "B"]).unwrap();

    let area = renderer.plot_area();
    assert_eq!(summary.markers, 1);
    assert!(summary.skipped.is_empty());
    let marker = &diagram.markers[0];
    let expected_x = area.left + 3.0 * (area.right - area.left) / 60.0;
    assert!((marker.center.x - expected_x).abs() < 1e-9);
    assert_eq!(marker.center.y, area.upper);
    assert_eq!(marker.color, Color::BLUE);
    assert_eq!(marker.station, "A");
}

#[test]
fn station_without_records_gets_a_row_but_no_markers() {
    let renderer = renderer(one_hour());
    let data = dataset("A", &[("05:10", "各停")]);

    let (diagram, summary) = renderer.layout(&data, &["A", "B"]).unwrap();

    assert_eq!(diagram.station_lines.len(), 2);
    assert_eq!(diagram.station_lines[1].from.y, renderer.plot_area().lower);
    assert!(diagram.markers.iter().all(|m| m.station == "A"));
    assert_eq!(summary.markers, 1);
}

#[test]
fn malformed_record_is_skipped_and_reported() {
    let renderer = renderer(one_hour());
    let data = dataset("A", &[("05:10", "各停"), ("25:99", "各停"), ("05:20", "特急")]);

    let (diagram, summary) = renderer.layout(&data, &["A"]).unwrap();

    assert_eq!(diagram.markers.len(), 2);
    assert_eq!(summary.skipped.len(), 1);
    let skipped = &summary.skipped[0];
    assert_eq!(skipped.station, "A");
    assert_eq!(skipped.time, "25:99");
    assert!(matches!(skipped.reason, RecordError::MalformedTime(_)));
}

#[test]
fn single_station_sits_mid_plot() {
    let renderer = renderer(one_hour());
    let data = dataset("A", &[("05:30", "各停")]);

    let (diagram, _) = renderer.layout(&data, &["A"]).unwrap();

    let area = renderer.plot_area();
    let mid = (area.upper + area.lower) / 2.0;
    assert_eq!(diagram.station_lines[0].from.y, mid);
    assert_eq!(diagram.markers[0].center.y, mid);
}

#[test]
fn clamp_policy_pins_markers_to_edges() {
    let renderer = renderer(one_hour().with_out_of_range(OutOfRangePolicy::Clamp));
    let data = dataset("A", &[("04:50", "各停"), ("06:30", "各停")]);

    let (diagram, summary) = renderer.layout(&data, &["A"]).unwrap();

    let area = renderer.plot_area();
    assert_eq!(summary.clamped, 2);
    assert!(summary.skipped.is_empty());
    assert_eq!(diagram.markers[0].center.x, area.left);
    assert_eq!(diagram.markers[1].center.x, area.right);
}

#[test]
fn range_past_midnight_places_early_trains_at_the_end() {
    let config =
        DiagramConfig::default().with_time_range(TimeRange::parse("05:00", "26:00").unwrap());
    let renderer = renderer(config);
    let data = dataset("A", &[("00:30", "各停"), ("02:30", "各停")]);

    let (diagram, summary) = renderer.layout(&data, &["A"]).unwrap();

    assert_eq!(diagram.markers.len(), 1);
    assert_eq!(summary.skipped.len(), 1);
    let labels: Vec<&str> = diagram.time_labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(labels.last(), Some(&"26:00"));
}

#[test]
fn layout_is_deterministic() {
    let renderer = renderer(DiagramConfig::default());
    let data = load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/time_tables")).dataset;
    let stations = ["渋谷", "中目黒", "Jiyugaoka"];

    let first = renderer.layout(&data, &stations).unwrap();
    let second = renderer.layout(&data, &stations).unwrap();

    assert_eq!(first, second);
}

#[test]
fn repeated_renders_produce_the_same_document() {
    let dir = tempdir().unwrap();
    let renderer = renderer(DiagramConfig::default());
    let data = dataset("渋谷", &[("05:00", "特急"), ("06:00", "各停")]);

    let a = renderer.render(&data, &["渋谷", "中目黒"], dir.path().join("a.svg")).unwrap();
    let b = renderer.render(&data, &["渋谷", "中目黒"], dir.path().join("b.svg")).unwrap();

    assert_eq!(a.summary, b.summary);
    assert_eq!(stable_contents(&a.path), stable_contents(&b.path));
}

#[test]
fn font_failure_leaves_no_document() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("diagram.svg");
    let config = DiagramConfig::default()
        .with_font(FontConfig::default().with_file(dir.path().join("missing.ttf")));

    let result = render(
        &dataset("A", &[("05:10", "各停")]),
        &["A"],
        &config,
        &ColorTable::default(),
        &output,
    );

    assert!(matches!(
        result,
        Err(RenderError::ResourceInit(ResourceInitError::FontFile { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn empty_station_list_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("diagram.svg");

    let result = render(
        &StationDataset::new(),
        &[] as &[&str],
        &DiagramConfig::default(),
        &ColorTable::default(),
        &output,
    );

    assert!(matches!(result, Err(RenderError::NoStations)));
    assert!(!output.exists());
}

#[test]
fn fixture_directory_renders() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("toyoko.svg");
    let report = load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/time_tables"));
    assert!(report.is_clean(), "{:?}", report.errors);

    let document = render(
        &report.dataset,
        &["渋谷", "中目黒", "Jiyugaoka"],
        &DiagramConfig::default(),
        &ColorTable::default(),
        &output,
    )
    .unwrap();

    assert_eq!(document.summary.stations, 3);
    assert_eq!(document.summary.markers, 14);
    assert!(document.summary.skipped.is_empty());

    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains(">渋谷</text>"));
    assert!(svg.contains(">Jiyugaoka</text>"));
    assert!(svg.contains(r##"fill="#008000""##));
    assert!(svg.contains("不明"));
}

#[test]
fn in_memory_repository_feeds_the_renderer() {
    let repository = InMemoryRepository::new(dataset("A", &[("05:10", "Fライナ")]));
    let report = repository.load_all();

    let (diagram, _) = renderer(one_hour()).layout(&report.dataset, &["A"]).unwrap();

    assert_eq!(diagram.markers[0].color, Color::RED);
}
