//! Label font setup.
//!
//! The font is initialized once, before anything is drawn, and the
//! resulting [`FontResource`] is handed to the renderer. A render cannot
//! start without one, so a font problem fails before any output exists.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::config::FontConfig;
use super::error::ResourceInitError;

/// Advance of an ASCII glyph relative to the font size. Approximate; used
/// only to keep labels from colliding.
const NARROW_ADVANCE: f64 = 0.6;

/// Advance of a full-width (CJK) glyph relative to the font size.
const WIDE_ADVANCE: f64 = 1.0;

/// A font file embedded into the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFont {
    /// MIME type for the data URI.
    pub mime: &'static str,
    /// CSS `format()` hint.
    pub format: &'static str,
    /// Base64-encoded file contents.
    pub data: String,
}

/// An initialized label font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontResource {
    family: String,
    size: f64,
    embedded: Option<EmbeddedFont>,
}

impl FontResource {
    /// Validate the font settings and load the font file, if any.
    pub fn init(config: &FontConfig) -> Result<Self, ResourceInitError> {
        let family = config.family.trim();
        if family.is_empty() {
            return Err(ResourceInitError::InvalidFont("empty font family"));
        }
        if family.contains(['"', '\'', ';', '{', '}', '<', '>', '&']) {
            return Err(ResourceInitError::InvalidFont(
                "font family contains quote, markup or CSS punctuation",
            ));
        }
        if !(config.size.is_finite() && config.size > 0.0) {
            return Err(ResourceInitError::InvalidFont("font size must be positive"));
        }

        let embedded = config.file.as_deref().map(load_font_file).transpose()?;

        Ok(Self {
            family: family.to_string(),
            size: config.size,
            embedded,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Size in points.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn embedded(&self) -> Option<&EmbeddedFont> {
        self.embedded.as_ref()
    }

    /// Estimated rendered width of `text` in points.
    pub fn text_width(&self, text: &str) -> f64 {
        text.chars()
            .map(|c| {
                if c.is_ascii() {
                    NARROW_ADVANCE
                } else {
                    WIDE_ADVANCE
                }
            })
            .sum::<f64>()
            * self.size
    }

    /// Line height in points.
    pub fn line_height(&self) -> f64 {
        self.size * 1.2
    }
}

fn load_font_file(path: &Path) -> Result<EmbeddedFont, ResourceInitError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);
    let (mime, format) = match extension.as_deref() {
        Some("ttf") => ("font/ttf", "truetype"),
        Some("otf") => ("font/otf", "opentype"),
        Some("woff") => ("font/woff", "woff"),
        Some("woff2") => ("font/woff2", "woff2"),
        _ => {
            return Err(ResourceInitError::UnsupportedFontFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let bytes = std::fs::read(path).map_err(|source| ResourceInitError::FontFile {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ResourceInitError::InvalidFont("font file is empty"));
    }

    Ok(EmbeddedFont {
        mime,
        format,
        data: STANDARD.encode(bytes),
    })
}
