//! Category to colour policy.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::domain::{Color, TrainCategory};

use super::error::ConfigError;

/// Key in a colour table file that overrides the fallback colour.
const DEFAULT_KEY: &str = "default";

/// Maps train category labels to marker colours.
///
/// Lookup is by exact label; any label without an entry gets the table's
/// default colour. The built-in table covers [`TrainCategory::KNOWN`];
/// further categories are added as data, through [`insert`](Self::insert)
/// or a colour table file.
///
/// # Examples
///
/// ```
/// use train_diagram::diagram::ColorTable;
/// use train_diagram::domain::Color;
///
/// let mut table = ColorTable::default();
/// assert_eq!(table.color_for("急行"), Color::BLUE);
/// assert_eq!(table.color_for("rapid"), Color::BLACK);
///
/// table.insert("rapid", Color::GREEN);
/// assert_eq!(table.color_for("rapid"), Color::GREEN);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: HashMap<String, Color>,
    default: Color,
}

impl ColorTable {
    /// An empty table: every category gets `default`.
    pub fn new(default: Color) -> Self {
        Self {
            colors: HashMap::new(),
            default,
        }
    }

    /// Add or replace a mapping, builder style.
    pub fn with(mut self, category: impl Into<String>, color: Color) -> Self {
        self.insert(category, color);
        self
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, category: impl Into<String>, color: Color) {
        self.colors.insert(category.into(), color);
    }

    /// Colour for a category label.
    pub fn color_for(&self, category: &str) -> Color {
        self.colors.get(category).copied().unwrap_or(self.default)
    }

    /// Colour for a classified category.
    pub fn color_for_category(&self, category: &TrainCategory) -> Color {
        self.color_for(category.label())
    }

    /// The fallback colour.
    pub fn default_color(&self) -> Color {
        self.default
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Parse a JSON object of `"<category>": "#rrggbb"` entries.
    ///
    /// A `"default"` entry sets the fallback colour (black otherwise).
    /// Built-in entries are not included.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut entries: BTreeMap<String, Color> = serde_json::from_str(json)?;
        let default = entries.remove(DEFAULT_KEY).unwrap_or(Color::BLACK);
        Ok(entries
            .into_iter()
            .fold(Self::new(default), |table, (category, color)| {
                table.with(category, color)
            }))
    }

    /// Load a colour table file. See [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ColorTableRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json).map_err(|source| ConfigError::ColorTableJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        TrainCategory::KNOWN
            .iter()
            .fold(Self::new(Color::BLACK), |table, category| {
                match category.default_color() {
                    Some(color) => table.with(category.label(), color),
                    None => table,
                }
            })
    }
}
