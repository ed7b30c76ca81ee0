//! Configuration handling for the scraper.
//!
//! Everything has a working default so the binary runs with no environment
//! at all. `Config::from_env` applies overrides from `BOOKSCRAPE_*`
//! variables and validates them; the `with_*` methods let callers (the CLI,
//! tests pointing at a mock server) replace individual values afterwards.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use url::Url;

use crate::export::Header;

/// Environment variable names.
pub const ENV_ORIGIN: &str = "BOOKSCRAPE_ORIGIN";
pub const ENV_QUERY: &str = "BOOKSCRAPE_QUERY";
pub const ENV_QID: &str = "BOOKSCRAPE_QID";
pub const ENV_ROW_LIMIT: &str = "BOOKSCRAPE_ROW_LIMIT";
pub const ENV_CSV_HEADER: &str = "BOOKSCRAPE_CSV_HEADER";
/// Read by the binary only; `json` switches the log formatter.
pub const ENV_LOG_FORMAT: &str = "BOOKSCRAPE_LOG_FORMAT";

const DEFAULT_ORIGIN: &str = "https://www.goodreads.com";
const DEFAULT_QUERY: &str = "fantasy";
const DEFAULT_QID: &str = "NwUsLiA2Nc";
const DEFAULT_ROW_LIMIT: usize = 10;

/// Scraper runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    origin: Url,
    query: String,
    qid: String,
    row_limit: usize,
    csv_header: Header,
}

impl Config {
    /// Load from environment variables, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(origin) = env::var(ENV_ORIGIN) {
            config.origin = parse_origin(&origin)?;
        }
        if let Ok(query) = env::var(ENV_QUERY) {
            config.query = query;
        }
        if let Ok(qid) = env::var(ENV_QID) {
            config.qid = qid;
        }
        if let Ok(limit) = env::var(ENV_ROW_LIMIT) {
            config.row_limit = parse_row_limit(&limit)?;
        }
        if let Ok(header) = env::var(ENV_CSV_HEADER) {
            config.csv_header = parse_csv_header(&header)?;
        }

        Ok(config)
    }

    /// Site origin that search URLs and book links are built from.
    pub fn origin(&self) -> &Url {
        &self.origin
    }
    pub fn query(&self) -> &str {
        &self.query
    }
    pub fn qid(&self) -> &str {
        &self.qid
    }
    /// Number of search-result rows scanned for book links.
    pub fn row_limit(&self) -> usize {
        self.row_limit
    }
    pub fn csv_header(&self) -> &Header {
        &self.csv_header
    }

    /// `{origin}/search?q={query}&qid={qid}`
    pub fn search_url(&self) -> Url {
        let mut url = self.origin.clone();
        url.set_path("/search");
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &self.query)
            .append_pair("qid", &self.qid);
        url
    }

    pub fn with_origin(mut self, origin: &str) -> Result<Self, ConfigError> {
        self.origin = parse_origin(origin)?;
        Ok(self)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_qid(mut self, qid: impl Into<String>) -> Self {
        self.qid = qid.into();
        self
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Result<Self, ConfigError> {
        if row_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_ROW_LIMIT,
                reason: "must be greater than zero".to_string(),
            });
        }
        self.row_limit = row_limit;
        Ok(self)
    }

    pub fn with_csv_header(mut self, header: Header) -> Self {
        self.csv_header = header;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid url"),
            query: DEFAULT_QUERY.to_string(),
            qid: DEFAULT_QID.to_string(),
            row_limit: DEFAULT_ROW_LIMIT,
            csv_header: Header::default(),
        }
    }
}

fn parse_origin(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        field: ENV_ORIGIN,
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field: ENV_ORIGIN,
            reason: format!("expected an absolute http(s) url, got '{raw}'"),
        });
    }

    Ok(url)
}

/// Comma-separated CSV labels; at least one must be non-blank.
pub fn parse_csv_header(raw: &str) -> Result<Header, ConfigError> {
    let header = Header::parse(raw);
    if header.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: ENV_CSV_HEADER,
            reason: "at least one label is required".to_string(),
        });
    }
    Ok(header)
}

fn parse_row_limit(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            field: ENV_ROW_LIMIT,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(limit) => Ok(limit),
        Err(e) => Err(ConfigError::InvalidValue {
            field: ENV_ROW_LIMIT,
            reason: e.to_string(),
        }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
