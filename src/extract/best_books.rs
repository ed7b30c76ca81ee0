//! "Best books of the year" award pages.

use std::path::Path;

use tracing::{debug, instrument};

use crate::error::ScrapeError;
use crate::extract::errors::ParseError;
use crate::extract::load_document;
use crate::extract::model::BestBookEntry;
use crate::extract::query::{Document, Node};

const CONTAINER: &str = "div.categoryContainer";
const CATEGORY: &str = "div.category.clearFix";
const CATEGORY_LINK: &str = "a";
const CATEGORY_LABEL: &str = "h4.category__copy";
const WINNER_IMAGE: &str = "img.category__winnerImage";

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<BestBookEntry>, ScrapeError> {
    let doc = load_document(path.as_ref())?;
    Ok(best_books(&doc)?)
}

/// (category, winning title, category url) per category block.
pub fn best_books<D: Document>(doc: &D) -> Result<Vec<BestBookEntry>, ParseError> {
    let container = doc.root().require(CONTAINER)?;

    let mut entries = Vec::new();
    for category in container.find_all(CATEGORY)? {
        let url = category
            .require(CATEGORY_LINK)?
            .require_attr(CATEGORY_LINK, "href")?;
        let label = category.require(CATEGORY_LABEL)?.text_content();
        let winner = category
            .require(WINNER_IMAGE)?
            .require_attr(WINNER_IMAGE, "alt")?;

        entries.push(BestBookEntry::new(&label, winner, url));
    }

    debug!(count = entries.len(), "extracted award categories");
    Ok(entries)
}
