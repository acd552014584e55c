//! RSS 2.0, RSS 1.0 (RDF) and Atom parsing into [`FeedEntry`] values.
//!
//! The root element is sniffed with the `quick-xml` pull reader, then the
//! document body is deserialized with `quick_xml::de` into small mirror
//! structs that only name the elements we read. Everything else in the
//! document is ignored.
//!
//! The deserializer matches children by local name, so `yt:videoId` is
//! read as `videoId` and `<media:title>` collides with `<title>`. Every
//! field that can share a local name with a namespaced sibling is a list,
//! and the first non-empty value wins.

use super::entry::{FeedEntry, RawTimestamp, Tag, TimeParts, VideoFields};
use crate::error::FeedError;
use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

/// Document dialects the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Rss,
    Rdf,
    Atom,
}

/// Identify the feed dialect from the document's root element.
pub fn detect_format(xml: &str) -> Result<FeedFormat, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let local = e.local_name();
                return match local.as_ref() {
                    b"rss" => Ok(FeedFormat::Rss),
                    b"RDF" => Ok(FeedFormat::Rdf),
                    b"feed" => Ok(FeedFormat::Atom),
                    other => Err(FeedError::UnknownFormat(
                        String::from_utf8_lossy(other).into_owned(),
                    )),
                };
            }
            Event::Eof => return Err(FeedError::UnknownFormat(String::new())),
            _ => {}
        }
    }
}

/// Parse a feed document into entries, preserving document order.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let xml = xml.trim_start_matches('\u{feff}');
    let entries = match detect_format(xml)? {
        FeedFormat::Rss => {
            let doc: RssDocument = quick_xml::de::from_str(xml)?;
            doc.channel.items.into_iter().map(FeedEntry::from).collect()
        }
        FeedFormat::Rdf => {
            let doc: RdfDocument = quick_xml::de::from_str(xml)?;
            doc.items.into_iter().map(FeedEntry::from).collect()
        }
        FeedFormat::Atom => {
            let doc: AtomDocument = quick_xml::de::from_str(xml)?;
            doc.entries.into_iter().map(FeedEntry::from).collect()
        }
    };
    Ok(entries)
}

/// Element whose text content is all we care about; attributes are ignored.
#[derive(Debug, Default, Deserialize)]
struct Text {
    #[serde(rename = "$text", default)]
    value: String,
}

fn text(node: Option<Text>) -> Option<String> {
    node.map(|t| t.value.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First non-empty text among elements sharing a local name.
///
/// Fields match on local name, so `<media:title>` lands next to `<title>`
/// and `<atom:link href=".."/>` next to `<link>`. The first one with text wins.
fn first_text(nodes: Vec<Text>) -> Option<String> {
    nodes.into_iter().find_map(|n| text(Some(n)))
}

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RdfDocument {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(rename = "title", default)]
    titles: Vec<Text>,
    #[serde(rename = "link", default)]
    links: Vec<Text>,
    #[serde(rename = "description", default)]
    descriptions: Vec<Text>,
    #[serde(rename = "pubDate", default)]
    pub_dates: Vec<Text>,
    /// `dc:date`, the only date RSS 1.0 items carry.
    #[serde(rename = "date", default)]
    dc_dates: Vec<Text>,
    #[serde(rename = "guid", default)]
    guids: Vec<Guid>,
    #[serde(rename = "category", default)]
    categories: Vec<Text>,
}

#[derive(Debug, Deserialize)]
struct Guid {
    #[serde(rename = "@isPermaLink")]
    is_perma_link: Option<String>,
    #[serde(rename = "$text", default)]
    value: String,
}

impl Guid {
    fn permalink(self) -> Option<String> {
        let is_link = self
            .is_perma_link
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let value = self.value.trim();
        (is_link && value.starts_with("http")).then(|| value.to_string())
    }
}

/// RSS dates are RFC 2822; some generators emit RFC 3339 instead.
fn rss_date(raw: &str) -> Option<RawTimestamp> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| RawTimestamp::Parts(TimeParts::from_utc(&dt.with_timezone(&Utc))))
}

impl From<RssItem> for FeedEntry {
    fn from(item: RssItem) -> Self {
        let link = first_text(item.links)
            .or_else(|| item.guids.into_iter().next().and_then(Guid::permalink));
        let published = first_text(item.pub_dates)
            .or_else(|| first_text(item.dc_dates))
            .and_then(|d| rss_date(&d));
        let tags = item
            .categories
            .into_iter()
            .map(|c| Tag {
                term: text(Some(c)),
            })
            .collect();

        FeedEntry {
            title: first_text(item.titles),
            description: first_text(item.descriptions),
            link,
            published,
            tags,
            video: VideoFields::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AtomDocument {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

/// One Atom `<entry>`; `yt:*` and `media:*` children are matched by local name.
#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(rename = "title", default)]
    titles: Vec<Text>,
    #[serde(rename = "summary", default)]
    summaries: Vec<Text>,
    #[serde(rename = "content", default)]
    contents: Vec<Text>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    #[serde(rename = "published", default)]
    published: Vec<Text>,
    #[serde(rename = "category", default)]
    categories: Vec<AtomCategory>,
    #[serde(rename = "videoId", default)]
    video_ids: Vec<Text>,
    #[serde(rename = "channelId", default)]
    channel_ids: Vec<Text>,
    #[serde(rename = "liveBroadcastContent", default)]
    live_broadcasts: Vec<Text>,
    #[serde(rename = "group", default)]
    media_groups: Vec<MediaGroup>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href", default)]
    href: String,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomCategory {
    #[serde(rename = "@term")]
    term: Option<String>,
}

/// `media:group`; sibling `media:title` and `media:content` are ignored.
#[derive(Debug, Deserialize)]
struct MediaGroup {
    #[serde(rename = "description", default)]
    descriptions: Vec<Text>,
}

/// The entry's primary link: the first `alternate` link, or one without `rel`.
fn primary_link(links: Vec<AtomLink>) -> Option<String> {
    links
        .into_iter()
        .find(|l| l.rel.as_deref().is_none_or(|r| r == "alternate") && !l.href.trim().is_empty())
        .map(|l| l.href.trim().to_string())
}

impl From<AtomEntry> for FeedEntry {
    fn from(entry: AtomEntry) -> Self {
        let description = first_text(entry.summaries)
            .or_else(|| first_text(entry.contents))
            .or_else(|| {
                entry
                    .media_groups
                    .into_iter()
                    .find_map(|g| first_text(g.descriptions))
            });
        let tags = entry
            .categories
            .into_iter()
            .map(|c| Tag {
                term: c.term.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            })
            .collect();

        FeedEntry {
            title: first_text(entry.titles),
            description,
            link: primary_link(entry.links),
            published: first_text(entry.published).map(RawTimestamp::Iso8601),
            tags,
            video: VideoFields {
                video_id: first_text(entry.video_ids),
                channel_id: first_text(entry.channel_ids),
                live_broadcast: first_text(entry.live_broadcasts),
            },
        }
    }
}
