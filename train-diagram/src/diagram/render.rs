//! Diagram layout and rendering.
//!
//! Layout turns a dataset and a station order into a [`Diagram`]; rendering
//! writes that diagram to a document. Bad records are skipped and reported
//! in the [`RenderSummary`], they never abort the render.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{ClockTime, ScheduleRecord, StationDataset};

use super::config::{DiagramConfig, OutOfRangePolicy, PlotArea};
use super::document::write_svg;
use super::error::{ConfigError, RecordError, RenderError};
use super::font::FontResource;
use super::geometry::{Anchor, Diagram, GridLine, Label, Marker, Point};
use super::palette::ColorTable;
use super::station_axis::StationAxis;
use super::time_axis::TimeAxis;

/// Space between the plot edge and its labels, in points.
const LABEL_GAP: f64 = 2.0 * super::config::POINTS_PER_MM;

/// A record that produced no marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub station: String,
    pub time: String,
    pub reason: RecordError,
}

/// What a render drew and what it had to leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Station rows drawn.
    pub stations: usize,
    /// Markers drawn, including clamped ones.
    pub markers: usize,
    /// Markers pinned to the plot edge under [`OutOfRangePolicy::Clamp`].
    pub clamped: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// A finished document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub path: PathBuf,
    pub summary: RenderSummary,
}

/// Lays out and renders train diagrams for one configuration.
///
/// Holds only read-only state, so one renderer can serve any number of
/// renders, each to its own output path.
#[derive(Debug, Clone)]
pub struct DiagramRenderer {
    config: DiagramConfig,
    colors: ColorTable,
    font: FontResource,
    area: PlotArea,
    time_axis: TimeAxis,
    station_axis: StationAxis,
}

impl DiagramRenderer {
    /// Create a renderer. The font must already be initialized.
    pub fn new(
        config: DiagramConfig,
        colors: ColorTable,
        font: FontResource,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let area = config.plot_area()?;
        let time_axis = TimeAxis::new(config.time_range, &area);
        let station_axis = StationAxis::new(&area);

        Ok(Self {
            config,
            colors,
            font,
            area,
            time_axis,
            station_axis,
        })
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    pub fn station_axis(&self) -> &StationAxis {
        &self.station_axis
    }

    pub fn plot_area(&self) -> PlotArea {
        self.area
    }

    /// Lay out the diagram without writing anything.
    ///
    /// `stations` is the route order, top row first. Stations missing from
    /// the dataset get a row with no markers.
    pub fn layout<S: AsRef<str>>(
        &self,
        dataset: &StationDataset,
        stations: &[S],
    ) -> Result<(Diagram, RenderSummary), RenderError> {
        if stations.is_empty() {
            return Err(RenderError::NoStations);
        }

        let rows = self.station_axis.positions(stations.len());
        let (station_lines, station_labels) = self.station_grid(stations, &rows);
        let (time_lines, time_labels) = self.time_grid();

        let mut summary = RenderSummary {
            stations: stations.len(),
            ..RenderSummary::default()
        };
        let mut markers = Vec::new();

        for (station, &y) in stations.iter().map(AsRef::as_ref).zip(&rows) {
            for record in dataset.records(station) {
                let (time, x, clamped) = match self.place(record) {
                    Ok(placed) => placed,
                    Err(reason) => {
                        warn!(
                            station = %station,
                            time = %record.time,
                            error = %reason,
                            "Skipping schedule record"
                        );
                        summary.skipped.push(SkippedRecord {
                            station: station.to_string(),
                            time: record.time.clone(),
                            reason,
                        });
                        continue;
                    }
                };
                if clamped {
                    summary.clamped += 1;
                }

                markers.push(Marker {
                    center: Point::new(x, y),
                    radius: self.config.marker_radius,
                    color: self.colors.color_for_category(&record.train_category()),
                    station: station.to_string(),
                    time,
                    category: record.category.clone(),
                    destination: record.destination.clone(),
                });
            }
        }
        summary.markers = markers.len();

        let diagram = Diagram {
            page: self.config.page,
            area: self.area,
            station_lines,
            time_lines,
            station_labels,
            time_labels,
            markers,
        };
        Ok((diagram, summary))
    }

    /// Lay out the diagram and write it to `output`.
    pub fn render<S: AsRef<str>>(
        &self,
        dataset: &StationDataset,
        stations: &[S],
        output: impl AsRef<Path>,
    ) -> Result<RenderedDocument, RenderError> {
        let output = output.as_ref();
        let (diagram, summary) = self.layout(dataset, stations)?;
        write_svg(&diagram, &self.font, output)?;

        info!(
            output = ?output,
            stations = summary.stations,
            markers = summary.markers,
            clamped = summary.clamped,
            skipped = summary.skipped.len(),
            "Rendered train diagram"
        );

        Ok(RenderedDocument {
            path: output.to_path_buf(),
            summary,
        })
    }

    /// Horizontal position of a record's marker, and whether it was clamped.
    fn place(&self, record: &ScheduleRecord) -> Result<(ClockTime, f64, bool), RecordError> {
        let time = record.clock_time()?;
        let offset = self.time_axis.offset_of(time);
        match (self.time_axis.to_x(offset), self.config.out_of_range) {
            (Ok(x), _) => Ok((time, x, false)),
            (Err(_), OutOfRangePolicy::Clamp) => Ok((time, self.time_axis.clamp_x(offset), true)),
            (Err(e), OutOfRangePolicy::Skip) => Err(e.into()),
        }
    }

    /// One full-width line per station, with labels thinned so that
    /// adjacent labels never overlap.
    fn station_grid<S: AsRef<str>>(&self, stations: &[S], rows: &[f64]) -> (Vec<GridLine>, Vec<Label>) {
        let stride = self
            .station_axis
            .spacing(stations.len())
            .map_or(1, |pitch| label_stride(self.font.line_height(), pitch));
        if stride > 1 {
            debug!(stride, "Thinning station labels");
        }

        let lines = rows
            .iter()
            .map(|&y| GridLine {
                from: Point::new(self.area.left, y),
                to: Point::new(self.area.right, y),
            })
            .collect();

        let labels = stations
            .iter()
            .zip(rows)
            .enumerate()
            .filter(|(i, _)| i % stride == 0)
            .map(|(_, (name, &y))| Label {
                text: name.as_ref().to_string(),
                // Baseline sits below the row so the text is centred on it.
                at: Point::new(self.area.left - LABEL_GAP, y - self.font.size() * 0.35),
                anchor: Anchor::End,
            })
            .collect();

        (lines, labels)
    }

    /// One full-height line per hour tick, labelled `HH:00` above the plot.
    fn time_grid(&self) -> (Vec<GridLine>, Vec<Label>) {
        let step = self.config.hour_grid_step;
        let ticks = self.time_axis.hour_ticks(step);

        let pitch = f64::from(step) * 60.0 * self.time_axis.scale();
        let widest = ticks
            .iter()
            .map(|tick| self.font.text_width(&tick.label()))
            .fold(0.0, f64::max);
        let stride = label_stride(widest + LABEL_GAP, pitch);
        if stride > 1 {
            debug!(stride, "Thinning hour labels");
        }

        let lines = ticks
            .iter()
            .map(|tick| GridLine {
                from: Point::new(tick.x, self.area.lower),
                to: Point::new(tick.x, self.area.upper),
            })
            .collect();

        let labels = ticks
            .iter()
            .enumerate()
            .filter(|(i, _)| i % stride == 0)
            .map(|(_, tick)| Label {
                text: tick.label(),
                at: Point::new(tick.x, self.area.upper + self.font.line_height()),
                anchor: Anchor::Middle,
            })
            .collect();

        (lines, labels)
    }
}

/// How many gridlines each label must span so that labels of size
/// `extent` spaced `pitch` apart do not overlap.
fn label_stride(extent: f64, pitch: f64) -> usize {
    if !(pitch > 0.0) {
        return 1;
    }
    (extent / pitch).ceil().max(1.0) as usize
}

/// Initialize the font, then lay out and write a diagram in one call.
///
/// # Examples
///
/// ```no_run
/// use train_diagram::diagram::{ColorTable, DiagramConfig, render};
/// use train_diagram::timetable::load;
///
/// let report = load("time_tables");
/// let stations = ["渋谷", "中目黒", "自由が丘"];
/// let document = render(
///     &report.dataset,
///     &stations,
///     &DiagramConfig::default(),
///     &ColorTable::default(),
///     "diagram.svg",
/// )
/// .unwrap();
/// println!("{} markers", document.summary.markers);
/// ```
pub fn render<S: AsRef<str>>(
    dataset: &StationDataset,
    stations: &[S],
    config: &DiagramConfig,
    colors: &ColorTable,
    output: impl AsRef<Path>,
) -> Result<RenderedDocument, RenderError> {
    let font = FontResource::init(&config.font)?;
    DiagramRenderer::new(config.clone(), colors.clone(), font)?.render(dataset, stations, output)
}
