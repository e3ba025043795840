//! SVG output documents.
//!
//! A [`Diagram`] is flipped into SVG's y-down space, rendered through the
//! `diagram.svg` template and written atomically: the document goes to a
//! temporary file beside the destination and is only moved into place once
//! complete, so a failed render leaves nothing at the requested path.

use std::io::Write as _;
use std::path::Path;

use askama::Template;
use chrono::{DateTime, SecondsFormat, Utc};
use tempfile::NamedTempFile;

use super::error::ResourceInitError;
use super::font::FontResource;
use super::geometry::{Anchor, Diagram, GridLine, Label, Marker};

#[derive(Template)]
#[template(path = "diagram.svg", escape = "html")]
struct DiagramSvg {
    width: String,
    height: String,
    generated_at: String,
    font_family: String,
    font_size: String,
    font_face: String,
    station_lines: Vec<SvgLine>,
    time_lines: Vec<SvgLine>,
    labels: Vec<SvgText>,
    markers: Vec<SvgCircle>,
}

struct SvgLine {
    x1: String,
    y1: String,
    x2: String,
    y2: String,
}

struct SvgText {
    x: String,
    y: String,
    anchor: &'static str,
    text: String,
}

struct SvgCircle {
    cx: String,
    cy: String,
    r: String,
    fill: String,
    title: String,
}

/// Format a coordinate with fixed precision.
fn coord(value: f64) -> String {
    format!("{value:.2}")
}

/// Converts page coordinates to SVG user space.
struct Flip {
    height: f64,
}

impl Flip {
    fn y(&self, y: f64) -> String {
        coord(self.height - y)
    }

    fn line(&self, line: &GridLine) -> SvgLine {
        SvgLine {
            x1: coord(line.from.x),
            y1: self.y(line.from.y),
            x2: coord(line.to.x),
            y2: self.y(line.to.y),
        }
    }

    fn text(&self, label: &Label) -> SvgText {
        SvgText {
            x: coord(label.at.x),
            y: self.y(label.at.y),
            anchor: match label.anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            },
            text: label.text.clone(),
        }
    }

    fn circle(&self, marker: &Marker) -> SvgCircle {
        SvgCircle {
            cx: coord(marker.center.x),
            cy: self.y(marker.center.y),
            r: coord(marker.radius),
            fill: marker.color.to_string(),
            title: format!(
                "{} {} {} {}",
                marker.station, marker.time, marker.category, marker.destination
            ),
        }
    }
}

/// Render a diagram to an SVG string.
pub fn render_svg(
    diagram: &Diagram,
    font: &FontResource,
    generated_at: DateTime<Utc>,
) -> Result<String, ResourceInitError> {
    let flip = Flip {
        height: diagram.page.height,
    };

    let font_face = font
        .embedded()
        .map(|face| {
            format!(
                "@font-face {{ font-family: \"{}\"; src: url(\"data:{};base64,{}\") format(\"{}\"); }}\n",
                font.family(),
                face.mime,
                face.data,
                face.format
            )
        })
        .unwrap_or_default();

    let template = DiagramSvg {
        width: coord(diagram.page.width),
        height: coord(diagram.page.height),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        font_family: font.family().to_string(),
        font_size: coord(font.size()),
        font_face,
        station_lines: diagram.station_lines.iter().map(|l| flip.line(l)).collect(),
        time_lines: diagram.time_lines.iter().map(|l| flip.line(l)).collect(),
        labels: diagram.labels().map(|l| flip.text(l)).collect(),
        markers: diagram.markers.iter().map(|m| flip.circle(m)).collect(),
    };

    Ok(template.render()?)
}

/// Render a diagram and write it to `path`.
///
/// The destination directory must exist. On any error no file is left at
/// `path`.
pub fn write_svg(
    diagram: &Diagram,
    font: &FontResource,
    path: &Path,
) -> Result<(), ResourceInitError> {
    if path.file_name().is_none() {
        return Err(ResourceInitError::InvalidOutputPath {
            path: path.to_path_buf(),
        });
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let svg = render_svg(diagram, font, Utc::now())?;

    let mut file = NamedTempFile::new_in(dir).map_err(|source| ResourceInitError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(svg.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| ResourceInitError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    file.persist(path)
        .map_err(|e| ResourceInitError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

    Ok(())
}
