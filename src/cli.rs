//! Command-line interface definitions for Awful AI Feeds.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. The user agent can also be provided via an environment variable.

use awful_ai_feeds::http::DEFAULT_USER_AGENT;
use awful_ai_feeds::scrapers::{VendorFeed, anthropic, openai};
use clap::{Parser, Subcommand, ValueEnum};
use url::Url;

/// Command-line arguments for the Awful AI Feeds application.
///
/// Records are printed to stdout; logs go to stderr and are controlled
/// with `RUST_LOG`.
///
/// # Examples
///
/// ```sh
/// # Anthropic posts from the last day
/// awful_ai_feeds vendor anthropic
///
/// # OpenAI posts from the last week, with page text, as JSON
/// awful_ai_feeds --json vendor openai --hours 168 --with-markdown
///
/// # Recent uploads of a channel, four transcript lookups at a time
/// awful_ai_feeds channel UCUzqsHTec5ZkJU5S4Tmhweg --concurrency 4
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// User-Agent header sent with every request
    #[arg(long, env = "AWFUL_FEEDS_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print records as a JSON array instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recent posts from an AI vendor's feeds
    Vendor {
        vendor: Vendor,

        /// Window size in hours
        #[arg(long, default_value_t = 24)]
        hours: u32,

        /// Convert each post's page to Markdown
        #[arg(long)]
        with_markdown: bool,

        /// Page conversions allowed in flight at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },

    /// Recent uploads of a YouTube channel
    Channel {
        channel_id: String,

        /// Window size in hours
        #[arg(long, default_value_t = 24)]
        hours: u32,

        /// Skip transcript lookups
        #[arg(long)]
        no_transcripts: bool,

        /// Transcript lookups allowed in flight at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },

    /// Print the transcript of one video
    Transcript { video_id: String },

    /// Print one page converted to Markdown
    Markdown { url: Url },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vendor {
    Anthropic,
    Openai,
}

impl Vendor {
    pub fn source(self) -> VendorFeed {
        match self {
            Vendor::Anthropic => anthropic::SOURCE,
            Vendor::Openai => openai::SOURCE,
        }
    }
}
