//! The small tree-query surface the extractors are written against.
//!
//! Extraction rules only ever need "first match", "all matches", text
//! content and attribute lookup, so that is all a backend has to provide.
//! `HtmlDocument` implements it on top of `scraper`.

use scraper::{ElementRef, Html, Selector};

use crate::extract::errors::ParseError;

/// A parsed document that can hand out its root node.
pub trait Document {
    type Node<'a>: Node<'a>
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;
}

/// An element handle borrowed from a [`Document`].
///
/// Selectors are CSS selectors matched against the node's descendants.
pub trait Node<'a>: Sized + Copy {
    fn find(&self, selector: &str) -> Result<Option<Self>, ParseError>;

    fn find_all(&self, selector: &str) -> Result<Vec<Self>, ParseError>;

    /// Concatenated text of the node and its descendants, untrimmed.
    fn text_content(&self) -> String;

    fn attribute(&self, name: &str) -> Option<&'a str>;

    /// First match or `ParseError::MissingElement`.
    fn require(&self, selector: &str) -> Result<Self, ParseError> {
        self.find(selector)?
            .ok_or_else(|| ParseError::missing(selector))
    }

    /// Attribute value; `selector` only names the node in the error.
    fn require_attr(&self, selector: &str, name: &str) -> Result<&'a str, ParseError> {
        self.attribute(name)
            .ok_or_else(|| ParseError::missing_attr(selector, name))
    }

    fn stripped_text(&self) -> String {
        self.text_content().trim().to_string()
    }
}

/// `scraper`-backed document.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }
}

impl Document for HtmlDocument {
    type Node<'a>
        = ElementRef<'a>
    where
        Self: 'a;

    fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

impl<'a> Node<'a> for ElementRef<'a> {
    fn find(&self, selector: &str) -> Result<Option<Self>, ParseError> {
        let selector = compile(selector)?;
        Ok(self.select(&selector).next())
    }

    fn find_all(&self, selector: &str) -> Result<Vec<Self>, ParseError> {
        let selector = compile(selector)?;
        Ok(self.select(&selector).collect())
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
