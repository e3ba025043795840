use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use train_diagram::diagram::{ColorTable, DiagramConfig, RenderError, TimeRange, render};
use train_diagram::timetable::load;

/// Timetable directory when `TIMETABLE_DIR` is unset.
const DEFAULT_TIMETABLE_DIR: &str = "time_tables";

/// Output document when `DIAGRAM_OUTPUT` is unset.
const DEFAULT_OUTPUT: &str = "diagram.svg";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Failed to render train diagram");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), RenderError> {
    let dir = env_or("TIMETABLE_DIR", DEFAULT_TIMETABLE_DIR);
    let output = PathBuf::from(env_or("DIAGRAM_OUTPUT", DEFAULT_OUTPUT));

    let config = config_from_env()?;
    let colors = match std::env::var("DIAGRAM_COLORS") {
        Ok(path) => ColorTable::from_json_file(path)?,
        Err(_) => ColorTable::default(),
    };

    let report = load(&dir);
    if !report.is_clean() {
        warn!(
            failed = report.errors.len(),
            "Some timetable files could not be loaded"
        );
    }
    info!(
        dir = %dir,
        stations = report.dataset.len(),
        records = report.dataset.record_count(),
        "Loaded timetables"
    );

    // Route order from the environment; sorted names otherwise.
    let stations: Vec<String> = match std::env::var("DIAGRAM_STATIONS") {
        Ok(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Err(_) => report.dataset.station_names(),
    };

    let document = render(&report.dataset, &stations, &config, &colors, &output)?;
    println!(
        "Wrote {} ({} stations, {} trains, {} skipped)",
        document.path.display(),
        document.summary.stations,
        document.summary.markers,
        document.summary.skipped.len()
    );
    Ok(())
}

fn config_from_env() -> Result<DiagramConfig, RenderError> {
    let mut config = DiagramConfig::default();

    let start = std::env::var("DIAGRAM_TIME_START").ok();
    let end = std::env::var("DIAGRAM_TIME_END").ok();
    if start.is_some() || end.is_some() {
        let default = config.time_range;
        let range = TimeRange::parse(
            start.as_deref().unwrap_or(&bound(default.start_minutes())),
            end.as_deref().unwrap_or(&bound(default.end_minutes())),
        )?;
        config = config.with_time_range(range);
    }

    if let Ok(file) = std::env::var("DIAGRAM_FONT_FILE") {
        config.font = config.font.with_file(file);
    }

    Ok(config)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn bound(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
