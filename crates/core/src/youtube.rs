//! YouTube collaborators: video metadata via the Data API v3, transcripts via
//! the timedtext captions endpoint. Both sit behind trait seams so the deck
//! pipeline can be driven by mocks in tests.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::YoutubeConfig;
use crate::error::{KonspektError, Result};
use crate::types::{Transcript, TranscriptFragment, VideoMetadata};

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn video_metadata(&self, video_id: &str) -> Result<VideoMetadata>;
}

#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn transcript(&self, video_id: &str) -> Result<Transcript>;
}

const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
const TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// Metadata provider backed by the YouTube Data API `videos` endpoint.
pub struct YoutubeDataApi {
    http: reqwest::Client,
    config: YoutubeConfig,
}

impl YoutubeDataApi {
    pub fn new(http: reqwest::Client, config: YoutubeConfig) -> Self {
        Self { http, config }
    }
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    maxres: Option<Thumbnail>,
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

impl Thumbnails {
    /// Highest quality available, mirroring the maxres → high → default
    /// preference of the upstream API tiers.
    fn best_url(self) -> Option<String> {
        self.maxres
            .or(self.high)
            .or(self.default)
            .map(|t| t.url)
    }
}

#[async_trait]
impl MetadataProvider for YoutubeDataApi {
    async fn video_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        let response = self
            .http
            .get(VIDEOS_URL)
            .query(&[
                ("part", "snippet"),
                ("id", video_id),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KonspektError::MetadataUnavailable {
                video_id: video_id.to_string(),
                reason: format!("metadata endpoint returned {status}"),
            });
        }

        let body: VideosResponse = response.json().await?;
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| KonspektError::MetadataUnavailable {
                video_id: video_id.to_string(),
                reason: "no such video".to_string(),
            })?;

        Ok(VideoMetadata {
            title: item.snippet.title,
            description: item.snippet.description,
            thumbnail_url: item.snippet.thumbnails.best_url(),
        })
    }
}

/// Transcript provider backed by the caption timedtext endpoint (`fmt=json3`).
pub struct TimedTextApi {
    http: reqwest::Client,
    language: String,
}

impl TimedTextApi {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            language: "en".to_string(),
        }
    }

    pub fn with_language(http: reqwest::Client, language: impl Into<String>) -> Self {
        Self {
            http,
            language: language.into(),
        }
    }
}

#[derive(Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

impl TimedTextEvent {
    fn into_fragment(self) -> Option<TranscriptFragment> {
        let text: String = self.segs.into_iter().map(|s| s.utf8).collect();
        let text = text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        Some(TranscriptFragment {
            text,
            start_seconds: self.start_ms as f64 / 1000.0,
            duration_seconds: self.duration_ms as f64 / 1000.0,
        })
    }
}

#[async_trait]
impl TranscriptProvider for TimedTextApi {
    async fn transcript(&self, video_id: &str) -> Result<Transcript> {
        let response = self
            .http
            .get(TIMEDTEXT_URL)
            .query(&[
                ("v", video_id),
                ("lang", self.language.as_str()),
                ("fmt", "json3"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KonspektError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: format!("timedtext endpoint returned {status}"),
            });
        }

        // Videos without captions answer 200 with an empty body.
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(KonspektError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: "captions disabled or missing".to_string(),
            });
        }

        let parsed: TimedTextResponse =
            serde_json::from_str(&body).map_err(|e| KonspektError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: format!("unreadable caption track: {e}"),
            })?;

        let fragments: Vec<TranscriptFragment> = parsed
            .events
            .into_iter()
            .filter_map(TimedTextEvent::into_fragment)
            .collect();

        if fragments.is_empty() {
            return Err(KonspektError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: "caption track has no text".to_string(),
            });
        }

        Ok(Transcript::new(fragments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_thumbnail_prefers_maxres_then_high() {
        let thumbs: Thumbnails = serde_json::from_value(serde_json::json!({
            "default": {"url": "d", "width": 120, "height": 90},
            "high": {"url": "h", "width": 480, "height": 360},
        }))
        .unwrap();
        assert_eq!(thumbs.best_url().as_deref(), Some("h"));

        let thumbs: Thumbnails = serde_json::from_value(serde_json::json!({
            "default": {"url": "d"},
        }))
        .unwrap();
        assert_eq!(thumbs.best_url().as_deref(), Some("d"));
    }

    #[test]
    fn timedtext_events_flatten_into_fragments() {
        let parsed: TimedTextResponse = serde_json::from_str(
            r#"{"events":[
                {"tStartMs":0,"dDurationMs":1500,"segs":[{"utf8":"hello "},{"utf8":"world"}]},
                {"tStartMs":1500,"dDurationMs":800,"segs":[{"utf8":"\n"}]},
                {"tStartMs":2300,"dDurationMs":900,"segs":[{"utf8":"again"}]}
            ]}"#,
        )
        .unwrap();

        let fragments: Vec<TranscriptFragment> = parsed
            .events
            .into_iter()
            .filter_map(TimedTextEvent::into_fragment)
            .collect();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "hello world");
        assert_eq!(fragments[0].start_seconds, 0.0);
        assert_eq!(fragments[1].start_seconds, 2.3);
        assert_eq!(fragments[1].duration_seconds, 0.9);
    }
}
