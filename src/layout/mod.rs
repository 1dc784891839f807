//! Measurement-driven pagination.
//!
//! [`paginate`] splits normalized chapter text into pages by repeatedly asking
//! a [`TextMeasurer`] how much of the remaining text fits on one page.

mod font;
pub mod geometry;
mod measure;
mod paginate;

pub use font::{
    DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, FontConfiguration, MAX_FONT_SIZE, MIN_FONT_SIZE,
    clamp_font_size,
};
pub use geometry::{Alignment, Insets, LINE_SPACING, LayoutConstraints, Size, TEXT_INSETS};
pub use measure::{MonospaceMeasurer, TextMeasurer};
pub use paginate::{MAX_PAGES, paginate};
