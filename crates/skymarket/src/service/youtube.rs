//! YouTube video metadata through the public oEmbed endpoint.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{build_client, parse_base_url};
use super::{ServiceError, ServiceResult, VideoMetadata, VideoMetadataService};

/// Default oEmbed endpoint.
pub const DEFAULT_OEMBED_URL: &str = "https://www.youtube.com/oembed";

const WATCH_URL: &str = "https://www.youtube.com/watch";

fn bare_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id pattern compiles"))
}

fn video_url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#\s]*&)?v=|embed/|shorts/|live/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        )
        .expect("video url pattern compiles")
    })
}

/// Pull a video id out of a bare id or any common YouTube URL shape.
///
/// ```
/// use skymarket::service::extract_video_id;
///
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("https://example.com/video"), None);
/// ```
#[must_use]
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if bare_id_regex().is_match(input) {
        return Some(input.to_string());
    }
    video_url_regex()
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether `id` has the shape of a YouTube video id.
#[must_use]
pub fn is_video_id(id: &str) -> bool {
    bare_id_regex().is_match(id)
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
    thumbnail_url: String,
    author_name: String,
}

impl From<OEmbedResponse> for VideoMetadata {
    fn from(r: OEmbedResponse) -> Self {
        Self {
            title: r.title,
            thumbnail_url: r.thumbnail_url,
            author: r.author_name,
        }
    }
}

/// Video metadata from YouTube's oEmbed endpoint.
#[derive(Debug, Clone)]
pub struct YouTubeOEmbed {
    client: Client,
    endpoint: Url,
}

impl YouTubeOEmbed {
    /// Create a client for the oEmbed endpoint at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> ServiceResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: parse_base_url(endpoint)?,
        })
    }

    /// The oEmbed request URL for `video_id`.
    #[must_use]
    pub fn request_url(&self, video_id: &str) -> Url {
        let watch = format!("{WATCH_URL}?v={video_id}");

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", &watch)
            .append_pair("format", "json");
        url
    }
}

#[async_trait]
impl VideoMetadataService for YouTubeOEmbed {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_video_metadata(&self, video_id: &str) -> ServiceResult<Option<VideoMetadata>> {
        if !is_video_id(video_id) {
            debug!(video_id, "Not a video id, skipping lookup");
            return Ok(None);
        }

        let response = self.client.get(self.request_url(video_id)).send().await?;
        let status = response.status();

        if is_absent_status(status) {
            debug!(video_id, %status, "Video metadata absent");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response
            .json::<OEmbedResponse>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))?;
        Ok(Some(body.into()))
    }
}

/// oEmbed answers these for unknown, private, or non-embeddable videos.
fn is_absent_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND
    )
}
