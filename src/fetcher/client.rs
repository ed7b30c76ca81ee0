use crate::fetcher::{errors::FetchError, pipeline::decode_page, types::FetchedPage};
use once_cell::sync::Lazy;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = concat!("bookscrape/", env!("CARGO_PKG_VERSION"));

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );

    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers(headers)
        .build()
        .expect("Failed to build HTTP client")
});

/// GET `url` and return its decoded HTML body.
///
/// Fails on any non-2xx status, on non-HTML content, and on bodies larger
/// than 5MB.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str) -> Result<FetchedPage, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT.get(parsed_url).send().await?;

    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            url: final_url.to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let media_type = content_type.to_ascii_lowercase();
    if !media_type.contains("text/html") && !media_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response.bytes().await?;

    // Content-Length may be absent or wrong
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    debug!(status = %status, bytes = body_bytes.len(), "fetched page");
    Ok(decode_page(final_url, status, body_bytes, &content_type))
}
