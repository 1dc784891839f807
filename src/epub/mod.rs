//! EPUB package structure: container and OPF parsing, reading order
//! resolution, and archive extraction.

mod extract;
pub mod parser;
mod resolver;

pub use extract::{extract, extract_from_reader};
pub use resolver::{CONTAINER_PATH, Package, resolve, resolve_package};
