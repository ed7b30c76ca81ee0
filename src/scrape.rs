//! Operations that fetch live pages before extracting from them.
//!
//! Fetches are awaited one at a time; nothing here runs concurrently.

use tracing::{info, instrument};

use crate::config::Config;
use crate::error::ScrapeError;
use crate::extract::query::HtmlDocument;
use crate::extract::{BookLink, BookSummary, book_page, search};
use crate::fetcher::fetch;

async fn fetch_document(url: &str) -> Result<HtmlDocument, ScrapeError> {
    let page = fetch(url).await?;
    Ok(HtmlDocument::parse(&page.body))
}

/// Book-detail links from the first `config.row_limit()` rows of the
/// configured search.
#[instrument(skip_all, fields(query = config.query()))]
pub async fn search_links(config: &Config) -> Result<Vec<BookLink>, ScrapeError> {
    let url = config.search_url();
    let doc = fetch_document(url.as_str()).await?;
    let links = search::book_links(&doc, config.origin(), config.row_limit())?;

    info!(count = links.len(), "collected book links");
    Ok(links)
}

/// Title, author and page count of the book page at `url`.
#[instrument(skip_all, fields(url = %url))]
pub async fn book_summary(url: &str) -> Result<BookSummary, ScrapeError> {
    let doc = fetch_document(url).await?;
    Ok(book_page::summary(&doc)?)
}

/// [`book_summary`] for each link in order, stopping at the first failure.
pub async fn book_summaries(links: &[BookLink]) -> Result<Vec<BookSummary>, ScrapeError> {
    let mut summaries = Vec::with_capacity(links.len());
    for link in links {
        summaries.push(book_summary(link.as_str()).await?);
    }
    Ok(summaries)
}
