//! Comma-separated export of extracted records.
//!
//! The default header is the two labels `Book title,Author Name` whatever
//! the record width; best-books rows carry three fields under it. Pass a
//! [`Header`] with matching labels to get a consistent file.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::mem::take;
use std::path::Path;

use tracing::{instrument, warn};

use crate::error::ScrapeError;
use crate::extract::{BestBookEntry, BookEntry, BookSummary};

const SEP: char = ',';
const DEFAULT_LABELS: [&str; 2] = ["Book title", "Author Name"];

/// A record that can be written as one CSV row.
pub trait CsvRecord {
    fn fields(&self) -> Vec<Cow<'_, str>>;
}

impl CsvRecord for BookEntry {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::from(&self.title), Cow::from(&self.author)]
    }
}

impl CsvRecord for BookSummary {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::from(&self.title),
            Cow::from(&self.author),
            Cow::from(self.page_count.to_string()),
        ]
    }
}

impl CsvRecord for BestBookEntry {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::from(&self.category),
            Cow::from(&self.book_title),
            Cow::from(&self.url),
        ]
    }
}

/// Column labels for the first row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header(Vec<String>);

impl Header {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Comma-separated labels, e.g. `"Category,Book title,URL"`.
    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.split(SEP)
                .map(str::trim)
                .filter(|label| !label.is_empty()),
        )
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(DEFAULT_LABELS)
    }
}

/// Write `records` to `path`, replacing any existing file.
#[instrument(skip_all, fields(path = %path.as_ref().display(), rows = records.len()))]
pub fn write_csv<R: CsvRecord>(
    records: &[R],
    path: impl AsRef<Path>,
    header: &Header,
) -> Result<(), ScrapeError> {
    let path = path.as_ref();
    let io_err = |source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write_records(&mut out, records, header).map_err(io_err)?;
    out.flush().map_err(io_err)
}

/// Header row then one row per record.
pub fn write_records<W: Write, R: CsvRecord>(
    mut w: W,
    records: &[R],
    header: &Header,
) -> io::Result<()> {
    if let Some(first) = records.first() {
        let width = first.fields().len();
        if width != header.len() {
            warn!(
                header = header.len(),
                fields = width,
                "csv header width does not match record width"
            );
        }
    }

    write_row(&mut w, header.labels())?;
    for record in records {
        write_row(&mut w, &record.fields())?;
    }
    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEP)?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Read a file written by [`write_csv`] back into rows, header included.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>, ScrapeError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_rows(&text))
}

/// Quote-aware row splitter; tolerates CRLF and an unterminated last row.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == SEP && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                rows.push(take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
