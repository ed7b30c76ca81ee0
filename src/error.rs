use std::path::PathBuf;

use thiserror::Error;

use crate::extract::ParseError;
use crate::fetcher::FetchError;

/// Any failure surfaced by the scraping and export operations.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
