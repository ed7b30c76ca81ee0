use thiserror::Error;

/// Failures while retrieving a page over HTTP.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status} for {url}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("body read failed: {0}")]
    Body(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http {
                status,
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
