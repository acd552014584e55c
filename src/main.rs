//! # Awful AI Feeds
//!
//! Command-line front end for the `awful_ai_feeds` library: poll a vendor's
//! feeds or a YouTube channel for recent entries, optionally enrich them,
//! and print the records.
//!
//! ## Usage
//!
//! ```sh
//! awful_ai_feeds vendor anthropic --hours 48
//! awful_ai_feeds channel UCUzqsHTec5ZkJU5S4Tmhweg
//! awful_ai_feeds transcript dQw4w9WgXcQ
//! awful_ai_feeds markdown https://www.anthropic.com/news
//! ```
//!
//! ## Architecture
//!
//! 1. **Scraping**: Fetch and window-filter every feed of the chosen source
//! 2. **Enriching**: Attach transcripts or page Markdown, one lookup per record
//! 3. **Output**: Print text blocks or a JSON array to stdout

use awful_ai_feeds::enrich::{PageConverter, TranscriptFetcher, enrich_records};
use awful_ai_feeds::http::build_client;
use awful_ai_feeds::models::NormalizedRecord;
use awful_ai_feeds::outputs::{json, text};
use awful_ai_feeds::scrapers::{FeedScraper, youtube};
use clap::Parser;
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.command, json = args.json, "Parsed CLI arguments");

    let client = build_client(&args.user_agent)?;

    match args.command {
        Command::Vendor {
            vendor,
            hours,
            with_markdown,
            concurrency,
        } => {
            let scraper = FeedScraper::new(client.clone(), vendor.source());
            let mut records = scraper.get_records(hours).await;
            if with_markdown {
                let converter = PageConverter::new(client);
                enrich_records(&converter, &mut records, concurrency).await;
            }
            print_records(&records, args.json, with_markdown)?;
        }
        Command::Channel {
            channel_id,
            hours,
            no_transcripts,
            concurrency,
        } => {
            let scraper = youtube::scraper(client.clone(), &channel_id);
            let records = if no_transcripts {
                scraper.get_records(hours).await
            } else {
                let transcripts = TranscriptFetcher::new(client);
                youtube::scrape_channel(&scraper, &transcripts, hours, concurrency).await
            };
            print_records(&records, args.json, !no_transcripts)?;
        }
        Command::Transcript { video_id } => {
            let fetcher = TranscriptFetcher::new(client);
            match fetcher.transcript(&video_id).await {
                Some(transcript) => println!("{transcript}"),
                None => warn!(%video_id, "No transcript available"),
            }
        }
        Command::Markdown { url } => {
            let converter = PageConverter::new(client);
            match converter.url_to_markdown(url.as_str()).await {
                Some(markdown) => println!("{markdown}"),
                None => warn!(%url, "Could not convert page"),
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

fn print_records(
    records: &[NormalizedRecord],
    as_json: bool,
    show_content: bool,
) -> Result<(), Box<dyn Error>> {
    if as_json {
        println!("{}", json::records_to_json(records)?);
    } else {
        print!("{}", text::render_records(records, show_content));
    }
    info!(count = records.len(), "Printed records");
    Ok(())
}
