use std::fs;
use std::path::PathBuf;

use url::Url;

use crate::error::ScrapeError;
use crate::extract::{
    BestBookEntry, BookEntry, BookSummary, HtmlDocument, ParseError, best_books, book_page,
    entities, search,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src/extract/tests/fixtures")
        .join(name)
}

fn fixture(name: &str) -> HtmlDocument {
    let html = fs::read_to_string(fixture_path(name)).expect("Failed to read test fixture");
    HtmlDocument::parse(&html)
}

#[test]
fn test_search_results_fixture() {
    let titles = search::titles_from_file(fixture_path("search_results.htm")).unwrap();

    assert_eq!(titles.len(), 20);
    assert_eq!(
        titles[0],
        BookEntry::new(
            "Harry Potter and the Deathly Hallows (Harry Potter, #7)",
            "J.K. Rowling"
        )
    );
    assert_eq!(
        titles[19],
        BookEntry::new("Harry Potter: The Prequel (Harry Potter, #0.5)", "J.K. Rowling")
    );
}

#[test]
fn test_search_results_are_clean() {
    let titles = search::titles(&fixture("search_results.htm")).unwrap();

    for entry in &titles {
        assert!(!entry.title.is_empty());
        assert!(!entry.author.is_empty());
        assert_eq!(entry.title, entry.title.trim());
        assert_eq!(entry.author, entry.author.trim());
        assert!(!entry.title.contains('\n'));
    }
}

#[test]
fn test_search_links_fixture() {
    let origin = Url::parse("https://www.goodreads.com").unwrap();
    let links = search::book_links(&fixture("search_results.htm"), &origin, 10).unwrap();

    // the fifth row links to a series page and is skipped
    assert_eq!(links.len(), 9);
    for link in &links {
        assert!(link.as_str().starts_with("https://www.goodreads.com/book/show/"));
    }
    assert_eq!(
        links[0].as_str(),
        "https://www.goodreads.com/book/show/136251.Harry_Potter_and_the_Deathly_Hallows?from_search=true&from_srp=true&qid=Hv4b5jXXbS&rank=1"
    );
    assert!(links[8].as_str().contains("rank=10"));
}

#[test]
fn test_search_links_respects_smaller_limit() {
    let origin = Url::parse("https://www.goodreads.com").unwrap();
    let links = search::book_links(&fixture("search_results.htm"), &origin, 3).unwrap();
    assert_eq!(links.len(), 3);
}

#[test]
fn test_book_page_fixture() {
    let summary = book_page::summary(&fixture("book_page.htm")).unwrap();
    assert_eq!(summary, BookSummary::new("Fantasy Lover", "Sherrilyn Kenyon", 337));
}

#[test]
fn test_best_books_fixture() {
    let best = best_books::from_file(fixture_path("best_books_2020.htm")).unwrap();

    assert_eq!(best.len(), 20);
    assert_eq!(
        best[0],
        BestBookEntry::new(
            "Fiction",
            "The Midnight Library",
            "https://www.goodreads.com/choiceawards/best-fiction-books-2020"
        )
    );
    assert_eq!(
        best[19],
        BestBookEntry::new(
            "Picture Books",
            "Antiracist Baby",
            "https://www.goodreads.com/choiceawards/best-picture-books-2020"
        )
    );
    // entities in labels are decoded
    assert_eq!(best[1].category, "Mystery & Thriller");
}

#[test]
fn test_extra_credit_entities() {
    let found = entities::from_file(fixture_path("extra_credit.htm")).unwrap();
    assert_eq!(
        found,
        [
            "Elena Marsh",
            "Royal Geographical Society",
            "Samuel Okafor",
            "Ottoman Empire",
            "The Silk Road",
            "East India Company",
            "The Lantern Keeper",
        ]
    );
}

#[test]
fn test_wrong_document_is_parse_error() {
    let err = search::titles(&fixture("best_books_2020.htm")).unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingElement {
            selector: "table.tableList".to_string()
        }
    );

    let err = best_books::best_books(&fixture("search_results.htm")).unwrap_err();
    assert!(matches!(err, ParseError::MissingElement { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = search::titles_from_file(fixture_path("does_not_exist.htm"));
    match result {
        Err(ScrapeError::Io { path, .. }) => assert!(path.ends_with("does_not_exist.htm")),
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extractors_never_panic(html in ".*") {
            let doc = HtmlDocument::parse(&html);
            let origin = Url::parse("https://example.com").unwrap();
            let _ = search::titles(&doc);
            let _ = search::book_links(&doc, &origin, 10);
            let _ = book_page::summary(&doc);
            let _ = best_books::best_books(&doc);
            let _ = entities::description_entities(&doc);
        }

        #[test]
        fn test_extracted_titles_are_trimmed(
            title in "[ \n\t]{0,3}[A-Za-z][A-Za-z ,#:]{0,30}[A-Za-z][ \n\t]{0,3}",
        ) {
            let html = format!(
                r#"<table class="tableList"><tr><td></td><td><a class="bookTitle" href="/book/show/1">{title}</a><a class="authorName">A</a></td><td></td></tr></table>"#
            );
            let titles = search::titles(&HtmlDocument::parse(&html)).unwrap();
            prop_assert_eq!(&titles[0].title, title.trim());
        }
    }
}
