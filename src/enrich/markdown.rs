//! Page text extraction rendered as Markdown.
//!
//! The converter downloads a page, narrows it to its main content
//! (`article`, then `main`, then `body`) and walks the block-level
//! elements in document order:
//!
//! | Element | Markdown |
//! |---------|----------|
//! | `h1`–`h6` | `#` repeated by heading level |
//! | `p` | plain paragraph |
//! | `li` | `- ` bullet |
//! | `blockquote` | `> ` quote |
//! | `pre` | fenced code block |
//!
//! A block nested in another block (a `p` inside an `li`) is emitted only
//! once, as part of its outermost block.

use super::{Enricher, lookup_or_absent};
use crate::error::EnrichError;
use crate::models::NormalizedRecord;
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};

const BLOCK_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "pre", "blockquote"];

static BLOCK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&BLOCK_TAGS.join(", ")).expect("valid selector"));
static ROOT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article", "main", "body"]
        .iter()
        .map(|s| Selector::parse(s).expect("valid selector"))
        .collect()
});

/// Fetches web pages and converts their primary content to Markdown.
#[derive(Debug, Clone)]
pub struct PageConverter {
    client: Client,
}

impl PageConverter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Markdown for the page at `url`, or `None` if it cannot be produced.
    pub async fn url_to_markdown(&self, url: &str) -> Option<String> {
        lookup_or_absent(self, url).await
    }

    /// Download `url` and convert it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the page has no extractable text.
    #[instrument(level = "info", skip(self))]
    pub async fn convert(&self, url: &str) -> Result<String, EnrichError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnrichError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let markdown =
            html_to_markdown(&html).ok_or_else(|| EnrichError::EmptyDocument(url.to_string()))?;
        info!(bytes = markdown.len(), "Converted page to Markdown");
        Ok(markdown)
    }
}

impl Enricher for PageConverter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn key<'r>(&self, record: &'r NormalizedRecord) -> Option<&'r str> {
        (!record.url.is_empty()).then_some(record.url.as_str())
    }

    async fn lookup(&self, key: &str) -> Result<String, EnrichError> {
        self.convert(key).await
    }
}

/// Convert an HTML document's main content to Markdown.
///
/// Returns `None` when the document has no visible text at all.
pub fn html_to_markdown(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let root = ROOT_SELECTORS
        .iter()
        .find_map(|s| document.select(s).next())
        .unwrap_or_else(|| document.root_element());

    let blocks: Vec<String> = root
        .select(&BLOCK_SELECTOR)
        .filter(|el| !inside_block(*el, root))
        .filter_map(render_block)
        .collect();

    if !blocks.is_empty() {
        return Some(blocks.join("\n\n"));
    }

    // No block markup; fall back to the root's bare text.
    let text = collapse_whitespace(&root.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

fn is_block(name: &str) -> bool {
    BLOCK_TAGS.contains(&name)
}

fn inside_block(el: ElementRef<'_>, root: ElementRef<'_>) -> bool {
    el.ancestors()
        .take_while(|n| n.id() != root.id())
        .filter_map(ElementRef::wrap)
        .any(|a| is_block(a.value().name()))
}

fn render_block(el: ElementRef<'_>) -> Option<String> {
    let name = el.value().name();
    if name == "pre" {
        let code = el.text().collect::<String>();
        let code = code.trim_matches('\n').trim_end();
        return (!code.is_empty()).then(|| format!("```\n{code}\n```"));
    }

    let text = collapse_whitespace(&el.text().collect::<String>());
    if text.is_empty() {
        return None;
    }

    let rendered = match name {
        "li" => format!("- {text}"),
        "blockquote" => format!("> {text}"),
        heading if heading.len() == 2 && heading.starts_with('h') => {
            let level = heading[1..].parse::<usize>().unwrap_or(1);
            format!("{} {text}", "#".repeat(level))
        }
        _ => text,
    };
    Some(rendered)
}
