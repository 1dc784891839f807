//! EPUB descriptor parsing (container.xml and the OPF package document).

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::text::entities;

/// Parsed OPF package data.
///
/// Only what the reading order needs: the manifest as `id -> href`, the
/// spine as a list of idrefs (duplicates kept), and the book title.
#[derive(Debug, Clone, Default)]
pub struct OpfData {
    pub title: Option<String>,
    pub manifest: HashMap<String, String>,
    pub spine_ids: Vec<String>,
}

/// Parse META-INF/container.xml and return the `full-path` of the first
/// `rootfile` entry.
pub fn parse_container_xml(bytes: &[u8]) -> Result<String> {
    let content = std::str::from_utf8(strip_bom(bytes))
        .map_err(|e| Error::MalformedContainer(format!("not UTF-8: {e}")))?;

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if local_name(e.name().as_ref()) == b"rootfile" =>
            {
                return match attribute(&e, b"full-path") {
                    Some(path) if !path.trim().is_empty() => Ok(path.trim().to_string()),
                    _ => Err(Error::MalformedContainer(
                        "first rootfile has no full-path attribute".to_string(),
                    )),
                };
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::MalformedContainer(e.to_string())),
            _ => {}
        }
    }

    Err(Error::MalformedContainer(
        "no rootfile found in container.xml".to_string(),
    ))
}

/// Parse an OPF package document.
///
/// `item` and `itemref` may appear in any order relative to each other; a
/// repeated manifest id overwrites the earlier entry.
pub fn parse_opf(content: &str) -> std::result::Result<OpfData, quick_xml::Error> {
    // No trim_text here: it would eat the spaces around entity refs in titles.
    let mut reader = Reader::from_str(content);

    let mut opf = OpfData::default();
    let mut in_metadata = false;
    let mut in_title = false;
    let mut title_buf = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"metadata" => in_metadata = true,
                    b"title" if in_metadata && opf.title.is_none() => {
                        in_title = true;
                        title_buf.clear();
                    }
                    b"item" => add_manifest_item(&mut opf, &e),
                    b"itemref" => add_spine_ref(&mut opf, &e),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"item" => add_manifest_item(&mut opf, &e),
                    b"itemref" => add_spine_ref(&mut opf, &e),
                    _ => {}
                }
            }
            Event::Text(e) => {
                if in_title {
                    title_buf.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::GeneralRef(e) => {
                if in_title {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    if let Some(resolved) = entities::resolve(&entity) {
                        title_buf.push_str(&resolved);
                    }
                }
            }
            Event::End(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"metadata" => in_metadata = false,
                    b"title" if in_title => {
                        in_title = false;
                        let title = title_buf.trim();
                        if !title.is_empty() {
                            opf.title = Some(title.to_string());
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(opf)
}

fn add_manifest_item(opf: &mut OpfData, e: &BytesStart<'_>) {
    if let (Some(id), Some(href)) = (attribute(e, b"id"), attribute(e, b"href")) {
        opf.manifest.insert(id, href);
    }
}

fn add_spine_ref(opf: &mut OpfData, e: &BytesStart<'_>) {
    if let Some(idref) = attribute(e, b"idref") {
        opf.spine_ids.push(idref);
    }
}

/// Look up an attribute by local name and unescape its value.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == key)
        .map(|attr| {
            let raw = String::from_utf8_lossy(attr.value.as_ref()).into_owned();
            match quick_xml::escape::unescape(&raw) {
                Ok(unescaped) => unescaped.into_owned(),
                Err(_) => raw,
            }
        })
}

/// Strip a UTF-8 byte order mark if present.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Extract local name from namespaced XML name (e.g., "dc:title" -> "title").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}
