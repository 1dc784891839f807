//! Page geometry.

/// A width/height pair in display units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Shrink by `insets`, never going below zero.
    pub fn inset(self, insets: Insets) -> Self {
        Self {
            width: (self.width - insets.left - insets.right).max(0.0),
            height: (self.height - insets.top - insets.bottom).max(0.0),
        }
    }
}

/// Margins around the text block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

/// Margins between the page edge and the text block. The tall bottom margin
/// leaves room for the page label.
pub const TEXT_INSETS: Insets = Insets {
    top: 40.0,
    left: 30.0,
    bottom: 80.0,
    right: 30.0,
};

/// Extra space between lines, in display units.
pub const LINE_SPACING: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    #[default]
    Justified,
}

/// Everything a [`TextMeasurer`](super::TextMeasurer) needs besides the font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraints {
    /// Usable text area (page size minus [`TEXT_INSETS`]).
    pub area: Size,
    pub line_spacing: f32,
    pub alignment: Alignment,
}

impl LayoutConstraints {
    /// Reader constraints for a page of the given outer size.
    pub fn for_page(page: Size) -> Self {
        Self {
            area: page.inset(TEXT_INSETS),
            line_spacing: LINE_SPACING,
            alignment: Alignment::Justified,
        }
    }
}
