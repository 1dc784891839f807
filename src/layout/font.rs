//! Font configuration used to parameterize text measurement.

/// Smallest font size the reader allows.
pub const MIN_FONT_SIZE: f32 = 12.0;

/// Largest font size the reader allows.
pub const MAX_FONT_SIZE: f32 = 32.0;

pub const DEFAULT_FONT_SIZE: f32 = 18.0;

pub const DEFAULT_FONT_NAME: &str = "Georgia";

/// Font size and typeface for one pagination run.
///
/// The size is always within [`MIN_FONT_SIZE`]..=[`MAX_FONT_SIZE`]; out of
/// range values are clamped and non-finite ones fall back to the default.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfiguration {
    size: f32,
    name: String,
}

impl FontConfiguration {
    pub fn new(size: f32, name: impl Into<String>) -> Self {
        Self {
            size: clamp_font_size(size),
            name: name.into(),
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same typeface at a different size.
    pub fn with_size(&self, size: f32) -> Self {
        Self::new(size, self.name.clone())
    }
}

impl Default for FontConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_SIZE, DEFAULT_FONT_NAME)
    }
}

/// Clamp a requested font size into the supported range.
pub fn clamp_font_size(size: f32) -> f32 {
    if size.is_finite() {
        size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    } else {
        DEFAULT_FONT_SIZE
    }
}
