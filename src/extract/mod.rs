pub mod best_books;
pub mod book_page;
pub mod entities;
pub mod errors;
pub mod model;
pub mod query;
pub mod search;

#[cfg(test)]
mod tests;

pub use errors::ParseError;
pub use model::{BestBookEntry, BookEntry, BookLink, BookSummary};
pub use query::{Document, HtmlDocument, Node};

use std::fs;
use std::path::Path;

use crate::error::ScrapeError;

/// Read and parse a saved HTML page.
pub fn load_document(path: &Path) -> Result<HtmlDocument, ScrapeError> {
    let source = fs::read_to_string(path).map_err(|source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(HtmlDocument::parse(&source))
}
