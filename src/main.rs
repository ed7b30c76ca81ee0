//! `bookscrape` command-line entry point.
//!
//! Every subcommand maps onto one library operation. Results go to stdout,
//! one record per line (tab-separated) or as a JSON array with `--json`;
//! logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bookscrape::{
    config::{self, Config},
    export::{self, CsvRecord},
    extract::{best_books, entities, search},
    scrape,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_EXTRA_CREDIT: &str = "extra_credit.htm";

#[derive(Parser)]
#[command(author, version, about = "Extract book metadata from saved or live Goodreads pages", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// (title, author) pairs from a saved search-results page
    Titles { file: PathBuf },

    /// Book-detail links from a live search
    Links {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        qid: Option<String>,
        /// Number of result rows to scan
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Title, author and page count for each book URL
    Summary {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// (category, title, url) triples from a saved best-books page
    BestBooks { file: PathBuf },

    /// Extract from a saved page and write the records as CSV
    Export {
        kind: ExportKind,
        file: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        /// Comma-separated header labels
        #[arg(long)]
        header: Option<String>,
    },

    /// Named entities in a saved book page's description
    Entities {
        #[arg(default_value = DEFAULT_EXTRA_CREDIT)]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportKind {
    Titles,
    BestBooks,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("loading configuration")?;

    let command = cli.command.unwrap_or(Commands::Entities {
        file: PathBuf::from(DEFAULT_EXTRA_CREDIT),
    });

    match command {
        Commands::Titles { file } => {
            let entries = search::titles_from_file(&file)
                .with_context(|| format!("extracting titles from {}", file.display()))?;
            emit(&entries, cli.json)?;
        }
        Commands::Links { query, qid, limit } => {
            let mut config = config;
            if let Some(query) = query {
                config = config.with_query(query);
            }
            if let Some(qid) = qid {
                config = config.with_qid(qid);
            }
            if let Some(limit) = limit {
                config = config.with_row_limit(limit)?;
            }

            let links = scrape::search_links(&config)
                .await
                .with_context(|| format!("fetching search links from {}", config.search_url()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else {
                for link in &links {
                    println!("{link}");
                }
            }
        }
        Commands::Summary { urls } => {
            let mut summaries = Vec::with_capacity(urls.len());
            for url in &urls {
                let summary = scrape::book_summary(url)
                    .await
                    .with_context(|| format!("summarising {url}"))?;
                summaries.push(summary);
            }
            emit(&summaries, cli.json)?;
        }
        Commands::BestBooks { file } => {
            let entries = best_books::from_file(&file)
                .with_context(|| format!("extracting best books from {}", file.display()))?;
            emit(&entries, cli.json)?;
        }
        Commands::Export {
            kind,
            file,
            out,
            header,
        } => {
            let header = match header {
                Some(raw) => config::parse_csv_header(&raw).context("parsing --header")?,
                None => config.csv_header().clone(),
            };

            let written = match kind {
                ExportKind::Titles => {
                    let entries = search::titles_from_file(&file)?;
                    export::write_csv(&entries, &out, &header)?;
                    entries.len()
                }
                ExportKind::BestBooks => {
                    let entries = best_books::from_file(&file)?;
                    export::write_csv(&entries, &out, &header)?;
                    entries.len()
                }
            };
            eprintln!("wrote {written} rows to {}", out.display());
        }
        Commands::Entities { file } => {
            let found = entities::from_file(&file)
                .with_context(|| format!("extracting entities from {}", file.display()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                println!("{found:?}");
            }
        }
    }

    Ok(())
}

fn emit<T: Serialize + CsvRecord>(records: &[T], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        for record in records {
            println!("{}", record.fields().join("\t"));
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let json = std::env::var(config::ENV_LOG_FORMAT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
