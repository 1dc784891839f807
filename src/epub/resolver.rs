//! Reading order resolution for an extracted package directory.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::parser::{OpfData, parse_container_xml, parse_opf, strip_bom};
use crate::book::Chapter;
use crate::error::{Error, Result};
use crate::path;

/// Location of the container descriptor inside every package.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// A resolved package: where its OPF lives, its title, and its chapters in
/// reading order.
#[derive(Debug, Clone)]
pub struct Package {
    pub title: Option<String>,
    /// Absolute path of the OPF package document.
    pub root_descriptor: PathBuf,
    pub chapters: Vec<Chapter>,
}

/// Resolve the chapters of the package extracted at `root`, in reading order.
///
/// Spine entries that point at no manifest item are skipped with a warning;
/// the surviving chapters are indexed `0..n` without gaps.
///
/// # Example
///
/// ```no_run
/// let chapters = folio::epub::resolve("/tmp/extracted-book")?;
/// for chapter in &chapters {
///     println!("{} {}", chapter.index(), chapter.path().display());
/// }
/// # Ok::<(), folio::Error>(())
/// ```
pub fn resolve(root: impl AsRef<Path>) -> Result<Vec<Chapter>> {
    resolve_package(root).map(|package| package.chapters)
}

/// Like [`resolve`], but also returns the package title and OPF location.
pub fn resolve_package(root: impl AsRef<Path>) -> Result<Package> {
    let root = root.as_ref();

    // 1. Find the OPF path from container.xml
    let container_path = root.join(CONTAINER_PATH);
    let container = std::fs::read(&container_path).map_err(|source| Error::MissingContainer {
        path: container_path.clone(),
        source,
    })?;
    let opf_path = parse_container_xml(&container)?;
    let opf_path = path::normalize(&opf_path);
    let content_dir = path::parent_dir(&opf_path);
    let root_descriptor = path::within(root, &opf_path);

    // 2. Parse the OPF
    let OpfData {
        title,
        manifest,
        spine_ids,
    } = read_opf(&root_descriptor)?;

    // 3. Walk the spine
    let mut chapters = Vec::with_capacity(spine_ids.len());
    for idref in &spine_ids {
        let Some(href) = manifest.get(idref) else {
            warn!(idref = %idref, opf = %root_descriptor.display(), "spine entry has no manifest item; skipping");
            continue;
        };
        let chapter_path = path::join(root, &content_dir, href);
        chapters.push(Chapter::new(chapter_path, chapters.len(), None));
    }

    if chapters.is_empty() {
        return Err(Error::EmptyBook);
    }

    debug!(
        opf = %root_descriptor.display(),
        manifest = manifest.len(),
        spine = spine_ids.len(),
        chapters = chapters.len(),
        "resolved package"
    );

    Ok(Package {
        title,
        root_descriptor,
        chapters,
    })
}

fn read_opf(opf_path: &Path) -> Result<OpfData> {
    let malformed = |reason: String| Error::MalformedRootDescriptor {
        path: opf_path.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(opf_path).map_err(|e| malformed(e.to_string()))?;
    let content = std::str::from_utf8(strip_bom(&bytes))
        .map_err(|e| malformed(format!("not UTF-8: {e}")))?;
    parse_opf(content).map_err(|e| malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CONTAINER: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

    fn write_package(dir: &Path, opf: &str) {
        fs::create_dir_all(dir.join("META-INF")).unwrap();
        fs::create_dir_all(dir.join("OEBPS")).unwrap();
        fs::write(dir.join(CONTAINER_PATH), CONTAINER).unwrap();
        fs::write(dir.join("OEBPS/content.opf"), opf).unwrap();
    }

    #[test]
    fn test_resolves_spine_order() {
        let dir = tempfile::tempdir().unwrap();
        write_package(
            dir.path(),
            r#"<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>Two Cities</dc:title></metadata>
  <manifest>
    <item id="b" href="text/b.xhtml" media-type="application/xhtml+xml"/>
    <item id="a" href="text/a.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine><itemref idref="a"/><itemref idref="b"/></spine>
</package>"#,
        );

        let package = resolve_package(dir.path()).unwrap();
        assert_eq!(package.title.as_deref(), Some("Two Cities"));
        assert_eq!(package.root_descriptor, dir.path().join("OEBPS/content.opf"));

        let paths: Vec<_> = package.chapters.iter().map(|c| c.path().to_path_buf()).collect();
        assert_eq!(
            paths,
            [
                dir.path().join("OEBPS/text/a.xhtml"),
                dir.path().join("OEBPS/text/b.xhtml"),
            ]
        );
        assert_eq!(package.chapters[1].index(), 1);
        assert!(package.chapters.iter().all(|c| c.title().is_none()));
    }

    #[test]
    fn test_dangling_idref_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_package(
            dir.path(),
            r#"<package><manifest>
  <item id="one" href="one.xhtml"/><item id="three" href="three.xhtml"/>
</manifest><spine>
  <itemref idref="one"/><itemref idref="two"/><itemref idref="three"/>
</spine></package>"#,
        );

        let chapters = resolve(dir.path()).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].index(), 0);
        assert_eq!(chapters[1].index(), 1);
        assert!(chapters[1].path().ends_with("three.xhtml"));
    }

    #[test]
    fn test_missing_container() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MissingContainer { .. }));
    }

    #[test]
    fn test_missing_opf_is_malformed_root_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("META-INF")).unwrap();
        fs::write(dir.path().join(CONTAINER_PATH), CONTAINER).unwrap();

        let err = resolve(dir.path()).unwrap_err();
        match err {
            Error::MalformedRootDescriptor { path, .. } => {
                assert_eq!(path, dir.path().join("OEBPS/content.opf"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_spine() {
        let dir = tempfile::tempdir().unwrap();
        write_package(
            dir.path(),
            r#"<package><manifest><item id="a" href="a.xhtml"/></manifest><spine/></package>"#,
        );
        assert!(matches!(resolve(dir.path()), Err(Error::EmptyBook)));
    }
}
