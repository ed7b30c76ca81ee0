//! Search-results listings: one `tr` per result inside `table.tableList`,
//! with the title and author links in the row's second cell.

use std::path::Path;

use tracing::{debug, instrument};
use url::Url;

use crate::error::ScrapeError;
use crate::extract::errors::ParseError;
use crate::extract::load_document;
use crate::extract::model::{BookEntry, BookLink};
use crate::extract::query::{Document, Node};

const RESULTS_TABLE: &str = "table.tableList";
const ROW: &str = "tr";
const CELL: &str = "td";
const TITLE_LINK: &str = "a.bookTitle";
const AUTHOR_LINK: &str = "a.authorName";

/// Index of the cell holding title and author.
const DETAIL_CELL: usize = 1;

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn titles_from_file(path: impl AsRef<Path>) -> Result<Vec<BookEntry>, ScrapeError> {
    let doc = load_document(path.as_ref())?;
    Ok(titles(&doc)?)
}

/// (title, author) for every row of the results table, in document order.
pub fn titles<D: Document>(doc: &D) -> Result<Vec<BookEntry>, ParseError> {
    let table = doc.root().require(RESULTS_TABLE)?;

    let mut entries = Vec::new();
    for (index, row) in table.find_all(ROW)?.into_iter().enumerate() {
        let cell = detail_cell(row, index)?;
        let title = cell.require(TITLE_LINK)?.text_content();
        let author = cell.require(AUTHOR_LINK)?.text_content();
        entries.push(BookEntry::new(&title, &author));
    }

    debug!(count = entries.len(), "extracted search results");
    Ok(entries)
}

/// Book-detail links from the first `row_limit` rows.
///
/// The limit counts rows scanned, so rows whose title link points outside
/// the book-detail path still use up a slot.
pub fn book_links<D: Document>(
    doc: &D,
    origin: &Url,
    row_limit: usize,
) -> Result<Vec<BookLink>, ParseError> {
    let table = doc.root().require(RESULTS_TABLE)?;

    let mut links = Vec::new();
    for (index, row) in table.find_all(ROW)?.into_iter().take(row_limit).enumerate() {
        let cell = detail_cell(row, index)?;
        let href = cell.require(TITLE_LINK)?.require_attr(TITLE_LINK, "href")?;

        match BookLink::resolve(origin, href) {
            Some(link) => links.push(link),
            None => debug!(row = index, href, "skipping non-book link"),
        }
    }

    Ok(links)
}

fn detail_cell<'a, N: Node<'a>>(row: N, index: usize) -> Result<N, ParseError> {
    let cells = row.find_all(CELL)?;
    cells
        .get(DETAIL_CELL)
        .copied()
        .ok_or_else(|| ParseError::MissingCell {
            row: index,
            selector: CELL.to_string(),
            expected: DETAIL_CELL + 1,
            found: cells.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::query::HtmlDocument;

    fn row(href: &str, title: &str, author: &str) -> String {
        format!(
            r#"<tr><td><img></td><td>
                <a class="bookTitle" href="{href}"><span>{title}</span></a>
                <span class="by">by</span>
                <a class="authorName" href="/author/show/1"><span>{author}</span></a>
            </td><td></td></tr>"#
        )
    }

    fn listing(rows: &[String]) -> HtmlDocument {
        HtmlDocument::parse(&format!(
            r#"<html><body><table class="tableList">{}</table></body></html>"#,
            rows.concat()
        ))
    }

    #[test]
    fn test_titles_are_stripped_and_ordered() {
        let doc = listing(&[
            row("/book/show/1", "\n   Dune\n  ", " Frank Herbert "),
            row("/book/show/2", "Hyperion", "Dan Simmons"),
        ]);

        let entries = titles(&doc).unwrap();
        assert_eq!(
            entries,
            [
                BookEntry::new("Dune", "Frank Herbert"),
                BookEntry::new("Hyperion", "Dan Simmons"),
            ]
        );
    }

    #[test]
    fn test_row_with_too_few_cells_is_a_parse_error() {
        let doc = HtmlDocument::parse(
            r#"<table class="tableList"><tr><td>only one cell</td></tr></table>"#,
        );

        let err = titles(&doc).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingCell {
                row: 0,
                selector: "td".to_string(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_missing_author_link_is_a_parse_error() {
        let doc = HtmlDocument::parse(
            r#"<table class="tableList"><tr><td></td><td><a class="bookTitle" href="/book/show/1">X</a></td><td></td></tr></table>"#,
        );
        assert_eq!(titles(&doc).unwrap_err(), ParseError::missing(AUTHOR_LINK));
    }

    #[test]
    fn test_link_limit_counts_skipped_rows() {
        let rows: Vec<String> = (0..12)
            .map(|i| {
                let href = if i == 2 {
                    "/series/1-some-series".to_string()
                } else {
                    format!("/book/show/{i}")
                };
                row(&href, &format!("Book {i}"), "Author")
            })
            .collect();
        let doc = listing(&rows);
        let origin = Url::parse("https://www.goodreads.com").unwrap();

        let links = book_links(&doc, &origin, 10).unwrap();
        assert_eq!(links.len(), 9);
        assert_eq!(links[0].as_str(), "https://www.goodreads.com/book/show/0");
        assert_eq!(links[2].as_str(), "https://www.goodreads.com/book/show/3");
        assert_eq!(links[8].as_str(), "https://www.goodreads.com/book/show/9");
    }

    #[test]
    fn test_title_link_without_href_is_a_parse_error() {
        let doc = HtmlDocument::parse(
            r#"<table class="tableList"><tr><td></td><td><a class="bookTitle">X</a></td><td></td></tr></table>"#,
        );
        let origin = Url::parse("https://www.goodreads.com").unwrap();

        assert_eq!(
            book_links(&doc, &origin, 10).unwrap_err(),
            ParseError::missing_attr(TITLE_LINK, "href")
        );
    }
}
