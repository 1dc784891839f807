//! folio - paginate EPUB books in the terminal

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

use folio::{Book, FontConfiguration, MonospaceMeasurer, ReaderSettings, Size};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Paginate EPUB books", long_about = None)]
#[command(after_help = "EXAMPLES:
    folio book.epub                 Show chapters and page counts
    folio book.epub --page 12       Print the 13th page of the book
    folio extracted/ --font-size 24 Use an already extracted package")]
struct Cli {
    /// Input `.epub` archive or extracted package directory
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Show chapters and page counts
    #[arg(short, long)]
    info: bool,

    /// Print one page (zero-based index into the whole book)
    #[arg(short, long, value_name = "N")]
    page: Option<usize>,

    /// Page width in display units
    #[arg(long, default_value_t = 390.0)]
    width: f32,

    /// Page height in display units
    #[arg(long, default_value_t = 844.0)]
    height: f32,

    /// Font size (clamped to 12-32); overrides the settings file
    #[arg(long)]
    font_size: Option<f32>,

    /// Font name; overrides the settings file
    #[arg(long)]
    font_name: Option<String>,

    /// Reader settings JSON file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "folio=debug" } else { "folio=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let font = font_for(cli)?;
    let area = Size::new(cli.width, cli.height);
    let measurer = MonospaceMeasurer::default();

    // Held until the book is done; dropping it removes the extraction.
    let (book, _extracted) = open_input(&cli.input, area, font, &measurer)?;

    if let Some(index) = cli.page {
        show_page(&book, index)?;
    }
    if cli.info || cli.page.is_none() {
        show_info(&cli.input, &book);
    }
    Ok(())
}

/// Open a package directory, or extract an `.epub` into a fresh temporary
/// directory first.
fn open_input(
    input: &Path,
    area: Size,
    font: FontConfiguration,
    measurer: &MonospaceMeasurer,
) -> Result<(Book, Option<TempDir>), String> {
    if !is_archive(input) {
        let book = Book::open(input, area, font, measurer).map_err(|e| e.to_string())?;
        return Ok((book, None));
    }

    let dir = tempfile::Builder::new()
        .prefix("folio-")
        .tempdir()
        .map_err(|e| format!("cannot create extraction directory: {e}"))?;
    let book = Book::open_archive(input, dir.path().join("book"), area, font, measurer)
        .map_err(|e| e.to_string())?;
    Ok((book, Some(dir)))
}

fn font_for(cli: &Cli) -> Result<FontConfiguration, String> {
    let mut settings = match &cli.settings {
        Some(path) => ReaderSettings::load(path).map_err(|e| e.to_string())?,
        None => ReaderSettings::default(),
    };
    if let Some(size) = cli.font_size {
        settings.set_font_size(size);
    }
    if let Some(name) = &cli.font_name {
        settings.set_font_name(name.clone());
    }
    Ok(settings.font())
}

fn is_archive(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("epub"))
}

fn show_info(input: &Path, book: &Book) {
    println!("File: {}", input.display());
    if let Some(title) = book.title() {
        println!("Title: {title}");
    }
    println!(
        "Font: {} {}pt, page {}x{}",
        book.font().name(),
        book.font().size(),
        book.area().width,
        book.area().height
    );
    println!("Chapters: {}", book.chapter_count());
    println!("Pages: {}", book.page_count());

    for chapter in book.chapters() {
        let pages = book.chapter_pages(chapter.index()).len();
        let name = chapter
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if book.chapter_text(chapter.index()).is_some() {
            println!("  {:>4}  {:<24} {pages:>5} pages  {name}", chapter.index(), chapter.display_title());
        } else {
            println!("  {:>4}  {:<24} unreadable   {name}", chapter.index(), chapter.display_title());
        }
    }
}

fn show_page(book: &Book, index: usize) -> Result<(), String> {
    let page = book
        .locate(index)
        .ok_or_else(|| format!("page {index} out of range (book has {} pages)", book.page_count()))?;

    println!("{} \u{b7} {}", book.chapter_label(page.chapter_index), page.label());
    println!();
    println!("{}", page.content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_epub(path: &Path) {
        let entries = [
            (
                "META-INF/container.xml",
                r#"<container><rootfiles><rootfile full-path="content.opf"/></rootfiles></container>"#,
            ),
            (
                "content.opf",
                r#"<package><manifest><item id="a" href="a.xhtml"/></manifest><spine><itemref idref="a"/></spine></package>"#,
            ),
            ("a.xhtml", "<p>Hello</p>"),
        ];
        let mut zip = ZipWriter::new(std::fs::File::create(path).unwrap());
        for (name, body) in entries {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_archive_extraction_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("book.epub");
        write_epub(&archive);

        let (book, extracted) = open_input(
            &archive,
            Size::new(390.0, 844.0),
            FontConfiguration::default(),
            &MonospaceMeasurer::default(),
        )
        .unwrap();
        let extracted = extracted.unwrap();
        let root = extracted.path().to_path_buf();

        assert!(book.root().starts_with(&root));
        assert_eq!(book.locate(0).unwrap().content, "Hello");

        drop(extracted);
        assert!(!root.exists());
    }

    #[test]
    fn test_directory_input_is_not_copied() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("book.epub");
        write_epub(&archive);
        let unpacked = dir.path().join("unpacked");
        folio::epub::extract(&archive, &unpacked).unwrap();

        let (book, extracted) = open_input(
            &unpacked,
            Size::new(390.0, 844.0),
            FontConfiguration::default(),
            &MonospaceMeasurer::default(),
        )
        .unwrap();
        assert!(extracted.is_none());
        assert_eq!(book.root(), unpacked.as_path());
    }
}
