//! Book-detail pages.

use tracing::debug;

use crate::extract::errors::ParseError;
use crate::extract::model::BookSummary;
use crate::extract::query::{Document, Node};

const TITLE: &str = "h1#bookTitle";
const AUTHORS: &str = "div#bookAuthors";
const AUTHOR_SPANS: &str = "span";
const PAGE_COUNT: &str = "span[itemprop=numberOfPages]";

/// The first span under the authors block is the "by" label.
const AUTHOR_SPAN: usize = 1;

pub fn summary<D: Document>(doc: &D) -> Result<BookSummary, ParseError> {
    let root = doc.root();

    let title = root.require(TITLE)?.text_content();

    let authors = root.require(AUTHORS)?;
    let spans = authors.find_all(AUTHOR_SPANS)?;
    let author = spans
        .get(AUTHOR_SPAN)
        .ok_or_else(|| ParseError::TooFewElements {
            selector: format!("{AUTHORS} {AUTHOR_SPANS}"),
            expected: AUTHOR_SPAN + 1,
            found: spans.len(),
        })?
        .text_content();

    let page_count = parse_page_count(&root.require(PAGE_COUNT)?.stripped_text())?;

    let summary = BookSummary::new(&title, &author, page_count);
    debug!(title = %summary.title, pages = summary.page_count, "extracted book summary");
    Ok(summary)
}

/// Leading integer of a field like `"352 pages"`.
pub fn parse_page_count(raw: &str) -> Result<u32, ParseError> {
    raw.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| ParseError::InvalidPageCount(raw.trim().to_string()))
}
