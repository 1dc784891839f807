//! Markup to plain text.
//!
//! The passes run in a fixed order over the whole document; each one relies
//! on the previous having finished (entity decoding must not see tags, and
//! whitespace collapsing must see decoded `&nbsp;`).

use std::sync::LazyLock;

use memchr::memmem;
use regex_lite::Regex;

use super::entities;

/// Elements whose content is never reader-visible text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Matches `<!-- ... -->` comments, which may contain `>`.
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Matches any remaining tag.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Runs of horizontal whitespace.
static HSPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Horizontal whitespace at the start of a line.
static LINE_INDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]+").unwrap());

/// Three or more newlines.
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Convert raw (X)HTML into the plain text that gets paginated.
///
/// Never fails; input with no text content yields an empty string.
///
/// # Example
///
/// ```
/// let text = folio::text::normalize("<p>Fish &amp; chips</p>\n\n\n\n<p>Next</p>");
/// assert_eq!(text, "Fish & chips\n\nNext");
/// ```
pub fn normalize(raw: &str) -> String {
    let text = COMMENT_RE.replace_all(raw, "");
    let text = strip_raw_text_elements(&text);
    let text = TAG_RE.replace_all(&text, "");
    let text = entities::decode(&text);
    let text = collapse_whitespace(&text);
    text.trim().to_string()
}

/// Remove `<script>` / `<style>` elements including everything up to their
/// matching close tag, so `if (a < b)` inside a script can't leak out.
///
/// Matching is ASCII case-insensitive. A self-closing element (`<script
/// src="x.js"/>`) only removes the tag; an unclosed one removes the rest of
/// the document.
fn strip_raw_text_elements(html: &str) -> String {
    // ASCII lowercasing keeps byte offsets identical to `html`.
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while let Some((start, name)) = next_raw_text_open(&lower, pos) {
        out.push_str(&html[pos..start]);

        let Some(open_end) = memchr::memchr(b'>', &bytes[start..]).map(|i| start + i + 1) else {
            // Unterminated open tag: nothing after it is text.
            return out;
        };

        if bytes[open_end - 2] == b'/' {
            pos = open_end;
            continue;
        }

        let close = format!("</{name}");
        pos = match memmem::find(&bytes[open_end..], close.as_bytes()) {
            Some(i) => {
                let close_start = open_end + i;
                match memchr::memchr(b'>', &bytes[close_start..]) {
                    Some(j) => close_start + j + 1,
                    None => return out,
                }
            }
            None => return out,
        };
    }

    out.push_str(&html[pos..]);
    out
}

/// Find the earliest raw-text element open tag at or after `from`.
fn next_raw_text_open(lower: &str, from: usize) -> Option<(usize, &'static str)> {
    let bytes = lower.as_bytes();
    RAW_TEXT_ELEMENTS
        .iter()
        .filter_map(|name| {
            let needle = format!("<{name}");
            let mut search = from;
            while let Some(i) = memmem::find(&bytes[search..], needle.as_bytes()) {
                let at = search + i;
                let after = at + needle.len();
                // `<scripts>` or `<styled>` are different elements.
                match bytes.get(after) {
                    None | Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r') => {
                        return Some((at, *name));
                    }
                    _ => search = after,
                }
            }
            None
        })
        .min_by_key(|(at, _)| *at)
}

/// Collapse whitespace while keeping paragraph breaks.
///
/// Line endings are unified to `\n` first so CRLF sources collapse the same
/// way as LF ones.
fn collapse_whitespace(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = HSPACE_RE.replace_all(&text, " ");
    let text = LINE_INDENT_RE.replace_all(&text, "\n");
    BLANK_RUN_RE.replace_all(&text, "\n\n").into_owned()
}
