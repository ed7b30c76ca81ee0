pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetcher;
pub mod scrape;

pub use error::{Result, ScrapeError};
