//! Unpacking `.epub` archives into a package directory.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::Result;

/// Extract the archive at `archive` into `dest`, replacing anything already
/// there, and return `dest`.
///
/// The archive is opened before `dest` is touched, so a missing or corrupt
/// file leaves an existing extraction in place. Entries whose names would
/// land outside `dest` are rejected by the zip reader.
pub fn extract(archive: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<PathBuf> {
    let file = File::open(archive.as_ref())?;
    extract_from_reader(file, dest)
}

/// Extract from any [`Read`] + [`Seek`] source.
pub fn extract_from_reader<R: Read + Seek>(reader: R, dest: impl AsRef<Path>) -> Result<PathBuf> {
    let dest = dest.as_ref();
    let mut archive = ZipArchive::new(reader)?;

    if dest.exists() {
        std::fs::remove_dir_all(dest)?;
    }
    std::fs::create_dir_all(dest)?;
    archive.extract(dest)?;

    debug!(entries = archive.len(), dest = %dest.display(), "extracted archive");
    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("book");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("stale.txt"), "old").unwrap();

        let data = archive(&[("mimetype", "application/epub+zip"), ("OEBPS/a.xhtml", "<p>A</p>")]);
        let out = extract_from_reader(Cursor::new(data), &dest).unwrap();

        assert_eq!(out, dest);
        assert!(!dest.join("stale.txt").exists());
        assert_eq!(std::fs::read_to_string(dest.join("OEBPS/a.xhtml")).unwrap(), "<p>A</p>");
    }

    #[test]
    fn test_corrupt_archive_keeps_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("book");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("keep.txt"), "still here").unwrap();

        let result = extract_from_reader(Cursor::new(b"not a zip".to_vec()), &dest);
        assert!(matches!(result, Err(crate::Error::Zip(_))));
        assert!(dest.join("keep.txt").exists());
    }
}
