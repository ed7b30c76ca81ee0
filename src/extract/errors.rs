use thiserror::Error;

/// Expected markup was absent or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("missing element '{selector}'")]
    MissingElement { selector: String },

    #[error("row {row}: expected at least {expected} '{selector}' elements, found {found}")]
    MissingCell {
        row: usize,
        selector: String,
        expected: usize,
        found: usize,
    },

    #[error("expected at least {expected} '{selector}' elements, found {found}")]
    TooFewElements {
        selector: String,
        expected: usize,
        found: usize,
    },

    #[error("element '{selector}' has no '{attr}' attribute")]
    MissingAttribute { selector: String, attr: String },

    #[error("page count is not a number: '{0}'")]
    InvalidPageCount(String),
}

impl ParseError {
    pub(crate) fn missing(selector: &str) -> Self {
        Self::MissingElement {
            selector: selector.to_string(),
        }
    }

    pub(crate) fn missing_attr(selector: &str, attr: &str) -> Self {
        Self::MissingAttribute {
            selector: selector.to_string(),
            attr: attr.to_string(),
        }
    }
}
