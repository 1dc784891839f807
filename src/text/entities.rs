//! Character reference decoding.

use std::borrow::Cow;

use memchr::memchr;

/// Longest reference body we look for a terminating `;` in.
const MAX_REFERENCE_LEN: usize = 32;

/// Resolve the body of a character reference (the part between `&` and `;`).
///
/// Handles the XML built-ins, the typographic entities common in ebooks, and
/// decimal/hex numeric references. Curly quotes fold to their ASCII forms and
/// `nbsp` becomes a plain space, so the reader surface only ever sees
/// straight quotes and ordinary spaces.
pub fn resolve(entity: &str) -> Option<String> {
    let named = match entity {
        "nbsp" => " ",
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "quot" => "\"",
        "apos" => "'",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "rsquo" | "lsquo" => "'",
        "rdquo" | "ldquo" => "\"",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{b7}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "deg" => "\u{b0}",
        "times" => "\u{d7}",
        _ => "",
    };
    if !named.is_empty() {
        return Some(named.to_string());
    }

    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };

    match char::from_u32(code) {
        Some('\0') | None => None,
        Some(c) => Some(c.to_string()),
    }
}

/// Decode every character reference in `text` in a single forward pass.
///
/// Output of a decoded reference is never rescanned, so `&amp;lt;` yields the
/// literal text `&lt;`. Unknown or unterminated references are kept verbatim.
pub fn decode(text: &str) -> Cow<'_, str> {
    if memchr(b'&', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let window = &tail.as_bytes()[..tail.len().min(MAX_REFERENCE_LEN + 1)];

        let decoded = memchr(b';', window)
            .and_then(|semi| resolve(&tail[..semi]).map(|value| (semi, value)));

        match decoded {
            Some((semi, value)) => {
                out.push_str(&value);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}
