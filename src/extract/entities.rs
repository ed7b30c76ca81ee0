//! Named entities in a book's description.
//!
//! An entity is a run of two or more capitalised words whose first word is
//! at least three letters long ("Royal Geographical Society", "The Silk
//! Road"). Each distinct entity is reported once, in order of first
//! appearance.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::error::ScrapeError;
use crate::extract::errors::ParseError;
use crate::extract::load_document;
use crate::extract::query::{Document, Node};

const DESCRIPTION: &str = "div#description";
const DESCRIPTION_SPANS: &str = "span";

static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]{2,}(?: +[A-Z][a-z]+)+\b").unwrap());

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<String>, ScrapeError> {
    let doc = load_document(path.as_ref())?;
    Ok(description_entities(&doc)?)
}

pub fn description_entities<D: Document>(doc: &D) -> Result<Vec<String>, ParseError> {
    let text = description_text(doc)?;
    let entities = named_entities(&text);
    debug!(count = entities.len(), "extracted description entities");
    Ok(entities)
}

/// The description block shows a truncated span followed by a hidden span
/// with the full text; the last span wins.
fn description_text<D: Document>(doc: &D) -> Result<String, ParseError> {
    let description = doc.root().require(DESCRIPTION)?;
    let text = match description.find_all(DESCRIPTION_SPANS)?.last() {
        Some(full) => full.text_content(),
        None => description.text_content(),
    };
    Ok(text.trim().to_string())
}

pub fn named_entities(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    ENTITY_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|entity| seen.insert(*entity))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::query::HtmlDocument;

    #[test]
    fn test_finds_multi_word_capitalised_runs() {
        let entities = named_entities(
            "She sailed from New Orleans with Captain Ahab and the Royal Navy to Spain.",
        );
        assert_eq!(entities, ["New Orleans", "Captain Ahab", "Royal Navy"]);
    }

    #[test]
    fn test_first_word_needs_three_letters() {
        assert!(named_entities("Dr Who met Al Gore").is_empty());
        assert_eq!(named_entities("Mr Bennet Jones"), ["Bennet Jones"]);
    }

    #[test]
    fn test_duplicates_are_reported_once() {
        let entities = named_entities("Anna Karenina loved. She saw Anna Karenina again.");
        assert_eq!(entities, ["Anna Karenina"]);
    }

    #[test]
    fn test_uses_last_description_span() {
        let doc = HtmlDocument::parse(
            r##"<div id="description">
                 <span>Short teaser about Jane Eyre...</span>
                 <span style="display:none">Jane Eyre meets Edward Rochester at Thornfield Hall.</span>
                 <a href="#">...more</a>
               </div>"##,
        );
        assert_eq!(
            description_entities(&doc).unwrap(),
            ["Jane Eyre", "Edward Rochester", "Thornfield Hall"]
        );
    }

    #[test]
    fn test_falls_back_to_block_text_without_spans() {
        let doc = HtmlDocument::parse(
            r#"<div id="description">A tale of Great Expectations.</div>"#,
        );
        assert_eq!(description_entities(&doc).unwrap(), ["Great Expectations"]);
    }
}
