//! YouTube transcript lookup.
//!
//! Transcripts are found the same way the YouTube web player finds them:
//!
//! 1. Load the watch page and read the innertube API key from it
//! 2. Ask the innertube `player` endpoint for the video's caption tracks
//! 3. Pick an English track, preferring a manually created one
//! 4. Download the track's timed-text XML and join its segments
//!
//! Every failure along the way is reported as an [`EnrichError`]; callers
//! that only care whether a transcript exists use
//! [`TranscriptFetcher::transcript`], which collapses errors to `None`.

use super::{Enricher, lookup_or_absent};
use crate::error::EnrichError;
use crate::models::NormalizedRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static API_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("valid regex"));
static MARKUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Fetches transcripts for YouTube videos.
#[derive(Debug, Clone)]
pub struct TranscriptFetcher {
    client: Client,
    base_url: String,
    languages: Vec<String>,
}

impl TranscriptFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: YOUTUBE_BASE_URL.to_string(),
            languages: vec!["en".to_string()],
        }
    }

    /// Point the fetcher at a different host (used against local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the accepted transcript languages, in priority order.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Transcript text for `video_id`, or `None` if it cannot be fetched.
    pub async fn transcript(&self, video_id: &str) -> Option<String> {
        lookup_or_absent(self, video_id).await
    }

    /// Fetch the transcript for `video_id` as one space-joined string.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::RequestBlocked`] when YouTube answers with a captcha
    ///   or a bot check
    /// - [`EnrichError::VideoUnavailable`] when the video cannot be played
    /// - [`EnrichError::TranscriptsDisabled`] when the video has no captions
    /// - [`EnrichError::NoTranscriptFound`] when no track matches the languages
    /// - [`EnrichError::Http`], [`EnrichError::Status`], [`EnrichError::Malformed`]
    ///   for transport and format problems
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(&self, video_id: &str) -> Result<String, EnrichError> {
        let html = self.watch_page(video_id).await?;
        let api_key = extract_api_key(&html)?;

        let player = self.player(video_id, &api_key).await?;
        check_playability(&player, video_id)?;

        let tracks = player
            .captions
            .and_then(|c| c.renderer)
            .map(|r| r.caption_tracks)
            .filter(|tracks| !tracks.is_empty())
            .ok_or_else(|| EnrichError::TranscriptsDisabled(video_id.to_string()))?;

        let track = select_track(&tracks, &self.languages)
            .ok_or_else(|| EnrichError::NoTranscriptFound(video_id.to_string()))?;
        debug!(language = %track.language_code, kind = ?track.kind, "Selected caption track");

        let xml = self.get_text(&track.base_url.replace("&fmt=srv3", "")).await?;
        parse_timedtext(&xml)
    }

    async fn watch_page(&self, video_id: &str) -> Result<String, EnrichError> {
        let url = format!("{}/watch?v={}", self.base_url, urlencoding::encode(video_id));
        self.get_text(&url).await
    }

    async fn player(&self, video_id: &str, api_key: &str) -> Result<PlayerResponse, EnrichError> {
        let url = format!("{}/youtubei/v1/player?key={}", self.base_url, api_key);
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let response = self
            .client
            .post(&url)
            .header(ACCEPT_LANGUAGE, "en-US")
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnrichError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get_text(&self, url: &str) -> Result<String, EnrichError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?;
        let status = response.status();
        if status.as_u16() == 429 {
            return Err(EnrichError::RequestBlocked);
        }
        if !status.is_success() {
            return Err(EnrichError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

impl Enricher for TranscriptFetcher {
    fn name(&self) -> &'static str {
        "transcript"
    }

    fn key<'r>(&self, record: &'r NormalizedRecord) -> Option<&'r str> {
        record.video_id()
    }

    async fn lookup(&self, key: &str) -> Result<String, EnrichError> {
        self.fetch(key).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: Option<String>,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

/// One caption track advertised by the player.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `Some("asr")` for automatically generated tracks.
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

fn extract_api_key(html: &str) -> Result<String, EnrichError> {
    if html.contains("class=\"g-recaptcha\"") {
        return Err(EnrichError::RequestBlocked);
    }
    API_KEY_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| EnrichError::Malformed("watch page has no innertube API key".to_string()))
}

fn check_playability(player: &PlayerResponse, video_id: &str) -> Result<(), EnrichError> {
    let Some(playability) = &player.playability_status else {
        return Ok(());
    };
    let status = playability.status.as_deref().unwrap_or("OK");
    if status == "OK" {
        return Ok(());
    }

    let reason = playability.reason.clone().unwrap_or_else(|| status.to_string());
    if status == "LOGIN_REQUIRED" && reason.contains("not a bot") {
        return Err(EnrichError::RequestBlocked);
    }
    Err(EnrichError::VideoUnavailable {
        video_id: video_id.to_string(),
        reason,
    })
}

/// Pick the first track matching `languages`, manual before generated per language.
pub fn select_track<'t>(tracks: &'t [CaptionTrack], languages: &[String]) -> Option<&'t CaptionTrack> {
    languages.iter().find_map(|lang| {
        let mut matching = tracks.iter().filter(|t| &t.language_code == lang);
        let manual = matching.clone().find(|t| !t.is_generated());
        manual.or_else(|| matching.next())
    })
}

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(rename = "text", default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(rename = "$text", default)]
    value: String,
}

/// Join the segments of a timed-text document into plain text.
///
/// Segment text arrives HTML-escaped inside the XML, so it is unescaped a
/// second time and any inline markup is stripped.
pub fn parse_timedtext(xml: &str) -> Result<String, EnrichError> {
    let doc: TimedText = quick_xml::de::from_str(xml)?;
    let text = doc
        .segments
        .into_iter()
        .map(|s| {
            let unescaped = quick_xml::escape::unescape(&s.value)
                .map(|c| c.into_owned())
                .unwrap_or(s.value);
            MARKUP_RE.replace_all(&unescaped, "").trim().to_string()
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(text)
}
