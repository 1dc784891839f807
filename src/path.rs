//! Package-relative path resolution.
//!
//! Manifest hrefs are URL-ish, `/`-separated and relative to the directory
//! holding the OPF. Everything here is lexical: nothing touches the
//! filesystem, and `..` can never climb out of the package root.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Directory part of a package-relative path.
///
/// Returns an empty string when the path has no directory component
/// (e.g. `content.opf` at the package root).
pub fn parent_dir(path: &str) -> String {
    Path::new(path)
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default()
}

/// Drop any `#fragment` and percent-decode an href.
///
/// Falls back to the raw href when the decoded bytes are not UTF-8.
pub fn decode_href(href: &str) -> String {
    let path = href.split('#').next().unwrap_or(href).trim();
    percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Lexically normalize a relative path.
///
/// `.` segments vanish, `..` pops the previous segment (or nothing at the
/// top), and root/prefix components are discarded so the result always
/// stays relative.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}

/// Resolve a manifest href to a path inside the extracted package.
///
/// `content_dir` is the OPF's directory relative to `root` (possibly empty).
/// An href starting with `/` is taken relative to the package root instead.
pub fn join(root: &Path, content_dir: &str, href: &str) -> PathBuf {
    let href = decode_href(href);
    let relative = if href.starts_with('/') || content_dir.is_empty() {
        normalize(&href)
    } else {
        normalize(&format!("{content_dir}/{href}"))
    };

    within(root, &relative)
}

/// Place a normalized, `/`-separated relative path under `root`.
pub fn within(root: &Path, relative: &str) -> PathBuf {
    let mut out = root.to_path_buf();
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        out.push(segment);
    }
    out
}
