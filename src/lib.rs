//! # folio
//!
//! EPUB structure resolution and measurement-driven pagination for e-book
//! readers.
//!
//! ## Features
//!
//! - Resolve the reading order of an extracted EPUB package
//! - Normalize chapter markup to plain text with paragraph breaks
//! - Split text into pages using any [`TextMeasurer`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::{Book, FontConfiguration, MonospaceMeasurer, Size};
//!
//! let book = Book::open_archive(
//!     "input.epub",
//!     "/tmp/folio-input",
//!     Size::new(390.0, 844.0),
//!     FontConfiguration::default(),
//!     &MonospaceMeasurer::default(),
//! )?;
//!
//! for page in book.chapter_pages(0) {
//!     println!("--- {} ---\n{}", page.label(), page.content);
//! }
//! # Ok::<(), folio::Error>(())
//! ```
//!
//! ## Pieces
//!
//! Each stage is usable on its own:
//!
//! ```
//! use folio::{FontConfiguration, LayoutConstraints, Size, normalize, paginate};
//!
//! let text = normalize("<p>Call me Ishmael.</p>\n<p>Some years ago&hellip;</p>");
//! assert_eq!(text, "Call me Ishmael.\nSome years ago\u{2026}");
//!
//! let eight = |_: &str, _: &LayoutConstraints, _: &FontConfiguration| 8usize;
//! let pages = paginate(&text, Size::new(400.0, 600.0), &FontConfiguration::default(), &eight);
//! assert_eq!(pages.concat(), text);
//! ```

pub mod book;
pub mod epub;
pub mod error;
pub mod layout;
pub mod path;
pub mod settings;
pub mod text;
pub(crate) mod util;

pub use book::{Book, Chapter, Page};
pub use epub::{Package, resolve, resolve_package};
pub use error::{Error, Result};
pub use layout::{
    FontConfiguration, LayoutConstraints, MonospaceMeasurer, Size, TextMeasurer, paginate,
};
pub use settings::ReaderSettings;
pub use text::normalize;
