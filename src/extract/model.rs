use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use url::Url;

/// Path every book-detail page lives under.
pub const BOOK_PATH_PREFIX: &str = "/book/show/";

/// One row of a search-results listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookEntry {
    pub title: String,
    pub author: String,
}

impl BookEntry {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
        }
    }
}

/// Absolute URL of a book-detail page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookLink(String);

impl BookLink {
    /// Resolve a site-relative `href` against `origin`.
    ///
    /// Returns `None` unless the href starts with [`BOOK_PATH_PREFIX`].
    pub fn resolve(origin: &Url, href: &str) -> Option<Self> {
        let href = href.trim();
        if !href.starts_with(BOOK_PATH_PREFIX) {
            return None;
        }
        let origin = origin.as_str().trim_end_matches('/');
        Some(Self(format!("{origin}{href}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BookLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for BookLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Title, author and page count from a book-detail page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    pub author: String,
    pub page_count: u32,
}

impl BookSummary {
    pub fn new(title: &str, author: &str, page_count: u32) -> Self {
        Self {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            page_count,
        }
    }
}

/// Winner of one award category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestBookEntry {
    pub category: String,
    pub book_title: String,
    pub url: String,
}

impl BestBookEntry {
    pub fn new(category: &str, book_title: &str, url: &str) -> Self {
        Self {
            category: category.trim().to_string(),
            book_title: book_title.trim().to_string(),
            url: url.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_strip_whitespace() {
        let entry = BookEntry::new("\n  Dune\n", "\tFrank Herbert  ");
        assert_eq!(entry, BookEntry::new("Dune", "Frank Herbert"));

        let best = BestBookEntry::new(" Fiction\n", "\nThe Midnight Library ", " https://x/y ");
        assert_eq!(best.category, "Fiction");
        assert_eq!(best.book_title, "The Midnight Library");
        assert_eq!(best.url, "https://x/y");
    }

    #[test]
    fn test_book_link_only_resolves_book_paths() {
        let origin = Url::parse("https://www.goodreads.com").unwrap();

        let link = BookLink::resolve(&origin, "/book/show/84136.Fantasy_Lover?rank=1").unwrap();
        assert_eq!(
            link.as_str(),
            "https://www.goodreads.com/book/show/84136.Fantasy_Lover?rank=1"
        );

        assert!(BookLink::resolve(&origin, "/series/45175-harry-potter").is_none());
        assert!(BookLink::resolve(&origin, "https://www.goodreads.com/book/show/1").is_none());
    }

    #[test]
    fn test_book_link_serializes_as_plain_string() {
        let origin = Url::parse("http://127.0.0.1:8080/").unwrap();
        let link = BookLink::resolve(&origin, "/book/show/5").unwrap();
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            "\"http://127.0.0.1:8080/book/show/5\""
        );
    }
}
