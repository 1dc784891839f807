//! The text measurement seam.
//!
//! Pagination only needs one question answered: how many leading characters
//! of this text fit in this box with this font? Platform text engines answer
//! it by laying the text out; [`MonospaceMeasurer`] answers it on a fixed
//! character grid.

use super::FontConfiguration;
use super::geometry::LayoutConstraints;

/// Reports how much of a text fits in a layout box.
///
/// Implementations must be pure: the same `(text, constraints, font)` must
/// always give the same answer. The returned count is in `char`s and may
/// exceed the text's length (it is clamped by the caller).
pub trait TextMeasurer: Send + Sync {
    fn fit(&self, text: &str, constraints: &LayoutConstraints, font: &FontConfiguration) -> usize;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &LayoutConstraints, &FontConfiguration) -> usize + Send + Sync,
{
    fn fit(&self, text: &str, constraints: &LayoutConstraints, font: &FontConfiguration) -> usize {
        self(text, constraints, font)
    }
}

/// Grid measurer: every glyph has the same advance.
///
/// Glyph advance is `font.size() * advance_ratio` and line pitch is
/// `font.size() * line_height_ratio + line_spacing`. Lines wrap greedily at
/// whitespace, overlong words are broken mid-word, and `\n` always ends a
/// line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_ratio: f32,
    pub line_height_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            line_height_ratio: 1.2,
        }
    }
}

impl MonospaceMeasurer {
    /// Columns and rows available for `font` inside `constraints`.
    pub fn grid(&self, constraints: &LayoutConstraints, font: &FontConfiguration) -> (usize, usize) {
        let advance = font.size() * self.advance_ratio;
        let pitch = font.size() * self.line_height_ratio + constraints.line_spacing;
        if advance <= 0.0 || pitch <= 0.0 {
            return (0, 0);
        }

        let columns = (constraints.area.width / advance).floor();
        // The last line needs no trailing spacing.
        let rows = ((constraints.area.height + constraints.line_spacing) / pitch).floor();
        (columns.max(0.0) as usize, rows.max(0.0) as usize)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn fit(&self, text: &str, constraints: &LayoutConstraints, font: &FontConfiguration) -> usize {
        let (columns, rows) = self.grid(constraints, font);
        if columns == 0 || rows == 0 {
            return 0;
        }

        // Alignment only redistributes space within a line, so it never
        // changes what fits on a grid.
        // Each row consumes at most `columns + 1` chars. Saturating keeps an
        // enormous page from overflowing; the window is bounded by the text.
        let limit = rows.saturating_mul(columns.saturating_add(1)).saturating_add(1);
        let window: Vec<char> = text.chars().take(limit).collect();
        let len = window.len();
        let mut pos = 0;

        for _ in 0..rows {
            if pos >= len {
                break;
            }
            let line_end = pos.saturating_add(columns).min(len);

            if let Some(nl) = window[pos..line_end].iter().position(|&c| c == '\n') {
                pos += nl + 1;
                continue;
            }
            if line_end == len {
                pos = len;
                break;
            }
            if window[line_end].is_whitespace() {
                // The break character is consumed by this line.
                pos = line_end + 1;
                continue;
            }
            pos = match window[pos..line_end].iter().rposition(|c| c.is_whitespace()) {
                Some(ws) if ws > 0 => pos + ws + 1,
                _ => line_end,
            };
        }

        pos
    }
}
