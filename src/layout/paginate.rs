//! Greedy, measurement-driven page splitting.

use tracing::{debug, warn};

use super::geometry::{LayoutConstraints, Size};
use super::{FontConfiguration, TextMeasurer};

/// Hard ceiling on pages produced for one text.
///
/// Reaching it means the measurer is reporting absurdly small fits; the
/// remainder then goes onto the last page instead of looping on.
pub const MAX_PAGES: usize = 1000;

/// Split `text` into pages that fit a page of outer size `area` under `font`.
///
/// The result is finite (at most [`MAX_PAGES`] entries), deterministic for
/// identical inputs, and its concatenation is exactly `text`. Empty input
/// gives no pages. Splits always fall on `char` boundaries.
///
/// If the measurer reports that nothing fits, the entire remainder becomes a
/// single oversized page; pagination itself never fails.
///
/// # Example
///
/// ```
/// use folio::layout::{paginate, FontConfiguration, LayoutConstraints, Size};
///
/// let four = |_: &str, _: &LayoutConstraints, _: &FontConfiguration| 4usize;
/// let pages = paginate("abcdefghij", Size::new(400.0, 600.0), &FontConfiguration::default(), &four);
/// assert_eq!(pages, ["abcd", "efgh", "ij"]);
/// ```
pub fn paginate<M>(text: &str, area: Size, font: &FontConfiguration, measurer: &M) -> Vec<String>
where
    M: TextMeasurer + ?Sized,
{
    if text.is_empty() {
        return Vec::new();
    }

    let constraints = LayoutConstraints::for_page(area);
    let mut pages = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let fit = measurer.fit(remaining, &constraints, font);
        if fit == 0 {
            warn!(
                remaining_chars = remaining.chars().count(),
                width = constraints.area.width,
                height = constraints.area.height,
                "no text fits on a page; placing the rest of the text on one page"
            );
            pages.push(remaining.to_string());
            break;
        }

        let last_slot = pages.len() + 1 >= MAX_PAGES;
        match remaining.char_indices().nth(fit) {
            Some((split, _)) if !last_slot => {
                pages.push(remaining[..split].to_string());
                remaining = &remaining[split..];
            }
            Some(_) => {
                warn!(
                    pages = MAX_PAGES,
                    remaining_chars = remaining.chars().count(),
                    "page limit reached; placing the rest of the text on the last page"
                );
                pages.push(remaining.to_string());
                break;
            }
            None => {
                pages.push(remaining.to_string());
                break;
            }
        }
    }

    debug!(pages = pages.len(), font_size = font.size(), "paginated text");
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonospaceMeasurer;

    const PAGE: Size = Size::new(400.0, 600.0);

    fn fixed(k: usize) -> impl Fn(&str, &LayoutConstraints, &FontConfiguration) -> usize {
        move |text: &str, _: &LayoutConstraints, _: &FontConfiguration| {
            let len = text.chars().count();
            if len > k { k } else { len }
        }
    }

    #[test]
    fn test_empty_text_has_no_pages() {
        let pages = paginate("", PAGE, &FontConfiguration::default(), &fixed(3));
        assert!(pages.is_empty());
    }

    #[test]
    fn test_fixed_fit_page_count() {
        let text = "x".repeat(25);
        let pages = paginate(&text, PAGE, &FontConfiguration::default(), &fixed(10));
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[1].len(), 10);
        assert_eq!(pages[2].len(), 5);
    }

    #[test]
    fn test_exact_multiple() {
        let text = "y".repeat(30);
        let pages = paginate(&text, PAGE, &FontConfiguration::default(), &fixed(10));
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.len() == 10));
    }

    #[test]
    fn test_zero_fit_yields_single_page() {
        let text = "z".repeat(10_000);
        let zero = |_: &str, _: &LayoutConstraints, _: &FontConfiguration| 0usize;
        let pages = paginate(&text, PAGE, &FontConfiguration::default(), &zero);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].chars().count(), 10_000);
    }

    #[test]
    fn test_zero_fit_after_progress_keeps_everything() {
        // Fits 3 the first time, nothing after that.
        let measurer = |text: &str, _: &LayoutConstraints, _: &FontConfiguration| {
            if text.starts_with('a') { 3 } else { 0 }
        };
        let pages = paginate("abcdefg", PAGE, &FontConfiguration::default(), &measurer);
        assert_eq!(pages, ["abc", "defg"]);
    }

    #[test]
    fn test_overreporting_measurer_is_clamped() {
        let huge = |_: &str, _: &LayoutConstraints, _: &FontConfiguration| usize::MAX;
        let pages = paginate("tiny", PAGE, &FontConfiguration::default(), &huge);
        assert_eq!(pages, ["tiny"]);
    }

    #[test]
    fn test_page_ceiling() {
        let text = "w".repeat(5_000);
        let one = |_: &str, _: &LayoutConstraints, _: &FontConfiguration| 1usize;
        let pages = paginate(&text, PAGE, &FontConfiguration::default(), &one);
        assert_eq!(pages.len(), MAX_PAGES);
        assert!(pages[..MAX_PAGES - 1].iter().all(|p| p.len() == 1));
        assert_eq!(pages[MAX_PAGES - 1].len(), 5_000 - (MAX_PAGES - 1));
        assert_eq!(pages.concat(), text);
    }

    #[test]
    fn test_last_page_is_measured() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        // Exactly MAX_PAGES chars at one char per page: the final page fits.
        let text = "v".repeat(MAX_PAGES);
        let calls = AtomicUsize::new(0);
        let one = |_: &str, _: &LayoutConstraints, _: &FontConfiguration| {
            calls.fetch_add(1, Ordering::Relaxed);
            1usize
        };
        let pages = paginate(&text, PAGE, &FontConfiguration::default(), &one);
        assert_eq!(pages.len(), MAX_PAGES);
        assert!(pages.iter().all(|p| p.len() == 1));
        assert_eq!(calls.load(Ordering::Relaxed), MAX_PAGES);
    }

    #[test]
    fn test_huge_page_is_one_page() {
        let text = "hello world ".repeat(10);
        let font = FontConfiguration::default();
        let measurer = MonospaceMeasurer::default();
        assert_eq!(paginate(&text, Size::new(1e12, 1e12), &font, &measurer), [text.clone()]);
        assert_eq!(paginate(&text, Size::new(f32::INFINITY, 844.0), &font, &measurer), [text]);
    }

    #[test]
    fn test_splits_on_char_boundaries() {
        let text = "日本語のテキスト—ünïcödé";
        let pages = paginate(text, PAGE, &FontConfiguration::default(), &fixed(3));
        assert!(pages.iter().take(pages.len() - 1).all(|p| p.chars().count() == 3));
        assert_eq!(pages.concat(), text);
    }

    #[test]
    fn test_monospace_round_trip() {
        let text = "It was the best of times, it was the worst of times.\n\n".repeat(200);
        let font = FontConfiguration::new(16.0, "Georgia");
        let pages = paginate(&text, PAGE, &font, &MonospaceMeasurer::default());
        assert!(pages.len() > 1);
        assert_eq!(pages.concat(), text);
    }

    #[test]
    fn test_larger_font_means_more_pages() {
        let text = "word ".repeat(4_000);
        let small = paginate(&text, PAGE, &FontConfiguration::new(12.0, "Georgia"), &MonospaceMeasurer::default());
        let large = paginate(&text, PAGE, &FontConfiguration::new(32.0, "Georgia"), &MonospaceMeasurer::default());
        assert!(large.len() > small.len());
    }

    #[test]
    fn test_idempotent() {
        let text = "Repeatable pagination. ".repeat(300);
        let font = FontConfiguration::default();
        let a = paginate(&text, PAGE, &font, &MonospaceMeasurer::default());
        let b = paginate(&text, PAGE, &font, &MonospaceMeasurer::default());
        assert_eq!(a, b);
    }
}
