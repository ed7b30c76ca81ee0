use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use reqwest::StatusCode;
use url::Url;

/// A successfully fetched HTML page, decoded to UTF-8.
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: Url,
    pub status: StatusCode,
    /// Encoding the body was decoded from.
    pub encoding: &'static Encoding,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    pub fn charset(&self) -> &'static str {
        self.encoding.name()
    }
}
