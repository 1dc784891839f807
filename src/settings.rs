//! Persisted reader preferences.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::layout::{DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, FontConfiguration, clamp_font_size};

/// Font preferences, stored as a small JSON document.
///
/// ```json
/// { "readerFontSize": 18.0, "readerFontName": "Georgia" }
/// ```
///
/// Missing keys take their defaults and the size is always clamped into the
/// supported range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    #[serde(rename = "readerFontSize")]
    pub font_size: f32,
    #[serde(rename = "readerFontName")]
    pub font_name: String,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        ReaderSettings {
            font_size: DEFAULT_FONT_SIZE,
            font_name: DEFAULT_FONT_NAME.to_string(),
        }
    }
}

impl ReaderSettings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file; using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut settings: ReaderSettings = serde_json::from_slice(&data)?;
        settings.set_font_size(settings.font_size);
        if settings.font_name.trim().is_empty() {
            settings.font_name = DEFAULT_FONT_NAME.to_string();
        }
        Ok(settings)
    }

    /// Write settings to `path` as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = clamp_font_size(size);
    }

    pub fn set_font_name(&mut self, name: impl Into<String>) {
        self.font_name = name.into();
    }

    /// The font configuration these settings describe.
    pub fn font(&self) -> FontConfiguration {
        FontConfiguration::new(self.font_size, self.font_name.clone())
    }
}
