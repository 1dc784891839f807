//! The reading pipeline: resolve, normalize, paginate.

use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::epub;
use crate::error::Result;
use crate::layout::{FontConfiguration, Size, TextMeasurer, paginate};
use crate::text::normalize;
use crate::util::decode_chapter;

/// One entry of the reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    path: PathBuf,
    index: usize,
    title: Option<String>,
}

impl Chapter {
    pub(crate) fn new(path: PathBuf, index: usize, title: Option<String>) -> Self {
        Self { path, index, title }
    }

    /// Content file of this chapter inside the extracted package.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Zero-based position in the reading order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The title, or `"Chapter N"` (one-based) when there is none.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("Chapter {}", self.index + 1),
        }
    }
}

/// One screenful of chapter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub chapter_index: usize,
    /// Zero-based position within the chapter.
    pub page_index: usize,
    pub content: String,
    pub total_pages_in_chapter: usize,
}

impl Page {
    /// `"Page A of B"` within the chapter, one-based.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page_index + 1, self.total_pages_in_chapter)
    }
}

/// An opened, paginated book.
///
/// Chapter texts are read and normalized once in [`Book::open`]; changing the
/// font or page size only reruns pagination via [`Book::repaginate`].
#[derive(Debug, Clone)]
pub struct Book {
    root: PathBuf,
    title: Option<String>,
    chapters: Vec<Chapter>,
    /// Normalized text per chapter; `None` when the file could not be read.
    texts: Vec<Option<String>>,
    pages: Vec<Page>,
    /// Flat page range per chapter.
    ranges: Vec<Range<usize>>,
    font: FontConfiguration,
    area: Size,
}

impl Book {
    /// Open the package extracted at `root` and paginate every chapter for a
    /// page of size `area`.
    ///
    /// Fails only on structural problems (see [`crate::Error::is_structural`]).
    /// A chapter whose file cannot be read is logged and contributes no pages.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folio::{Book, FontConfiguration, MonospaceMeasurer, Size};
    ///
    /// let book = Book::open(
    ///     "/tmp/extracted-book",
    ///     Size::new(390.0, 844.0),
    ///     FontConfiguration::default(),
    ///     &MonospaceMeasurer::default(),
    /// )?;
    /// println!("{} pages", book.page_count());
    /// # Ok::<(), folio::Error>(())
    /// ```
    pub fn open<M>(
        root: impl AsRef<Path>,
        area: Size,
        font: FontConfiguration,
        measurer: &M,
    ) -> Result<Self>
    where
        M: TextMeasurer + ?Sized,
    {
        let root = root.as_ref();
        let package = epub::resolve_package(root)?;
        let texts = package.chapters.iter().map(read_chapter_text).collect();

        let mut book = Self {
            root: root.to_path_buf(),
            title: package.title,
            chapters: package.chapters,
            texts,
            pages: Vec::new(),
            ranges: Vec::new(),
            font,
            area,
        };
        book.build_pages(measurer);
        Ok(book)
    }

    /// Extract the `.epub` at `archive` into `dest` (replacing its contents)
    /// and open the result.
    pub fn open_archive<M>(
        archive: impl AsRef<Path>,
        dest: impl AsRef<Path>,
        area: Size,
        font: FontConfiguration,
        measurer: &M,
    ) -> Result<Self>
    where
        M: TextMeasurer + ?Sized,
    {
        let root = epub::extract(archive, dest)?;
        Self::open(root, area, font, measurer)
    }

    /// Throw away every page and paginate again with a new font or page size.
    pub fn repaginate<M>(&mut self, font: FontConfiguration, area: Size, measurer: &M)
    where
        M: TextMeasurer + ?Sized,
    {
        self.font = font;
        self.area = area;
        self.build_pages(measurer);
    }

    fn build_pages<M>(&mut self, measurer: &M)
    where
        M: TextMeasurer + ?Sized,
    {
        self.pages.clear();
        self.ranges.clear();

        for (chapter, text) in self.chapters.iter().zip(&self.texts) {
            let start = self.pages.len();
            if let Some(text) = text {
                let mut contents = paginate(text, self.area, &self.font, measurer);
                if contents.is_empty() {
                    contents.push(String::new());
                }
                let total = contents.len();
                debug!(chapter = chapter.index(), pages = total, "paginated chapter");

                self.pages
                    .extend(contents.into_iter().enumerate().map(|(page_index, content)| Page {
                        chapter_index: chapter.index(),
                        page_index,
                        content,
                        total_pages_in_chapter: total,
                    }));
            }
            self.ranges.push(start..self.pages.len());
        }
    }

    /// Directory the package was opened from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The OPF `dc:title`, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Every page of the book in reading order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages of one chapter; empty for an unreadable or unknown chapter.
    pub fn chapter_pages(&self, chapter: usize) -> &[Page] {
        match self.ranges.get(chapter) {
            Some(range) => &self.pages[range.clone()],
            None => &[],
        }
    }

    /// Normalized text of a chapter, `None` if it could not be read.
    pub fn chapter_text(&self, chapter: usize) -> Option<&str> {
        self.texts.get(chapter).and_then(|t| t.as_deref())
    }

    /// The page at a flat index.
    pub fn locate(&self, flat_index: usize) -> Option<&Page> {
        self.pages.get(flat_index)
    }

    /// Flat index of a chapter's first page.
    ///
    /// A chapter with no pages maps to the next page after it, so a saved
    /// position on an unreadable chapter resumes at the following one. `None`
    /// when the chapter is unknown or nothing follows it.
    pub fn first_page_of(&self, chapter: usize) -> Option<usize> {
        let start = self.ranges.get(chapter)?.start;
        (start < self.pages.len()).then_some(start)
    }

    /// `"Chapter X of Y"`, one-based.
    pub fn chapter_label(&self, chapter: usize) -> String {
        format!("Chapter {} of {}", chapter + 1, self.chapters.len())
    }

    pub fn font(&self) -> &FontConfiguration {
        &self.font
    }

    pub fn area(&self) -> Size {
        self.area
    }
}

fn read_chapter_text(chapter: &Chapter) -> Option<String> {
    match std::fs::read(chapter.path()) {
        Ok(bytes) => Some(normalize(&decode_chapter(&bytes))),
        Err(e) => {
            warn!(
                chapter = chapter.index(),
                path = %chapter.path().display(),
                error = %e,
                "could not read chapter; skipping its pages"
            );
            None
        }
    }
}
