//! Listing detail page resolution.
//!
//! Turns a navigation path such as `/listing/abc123?conversation=c9` into
//! the data the detail page renders, or a terminal not-found outcome.

use percent_encoding::percent_decode_str;
use reqwest::Url;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::linkify::{LinkAnnotator, TextSegment};
use crate::service::{extract_video_id, Listing, ListingService, VideoMetadata, VideoMetadataService};

const LISTING_SEGMENT: &str = "listing";
const CONVERSATION_PARAM: &str = "conversation";

/// Parameters of the listing detail route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRoute {
    /// Listing identifier from the path.
    pub listing_id: String,
    /// Conversation to open alongside the listing, from the query string.
    pub conversation_id: Option<String>,
}

impl ListingRoute {
    /// Parse `/listing/{id}` with an optional `?conversation={id}`.
    ///
    /// A trailing slash is accepted. The id is percent-decoded, so
    /// `/listing/a%20b` names the listing `a b`. Empty query values count as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Route`] if the path is not a listing detail route.
    pub fn parse(path: &str) -> Result<Self> {
        if !path.starts_with('/') || path.starts_with("//") {
            return Err(Error::route(path, "expected an absolute path"));
        }

        let url = Url::parse("http://localhost/")
            .and_then(|base| base.join(path))
            .map_err(|e| Error::route(path, e.to_string()))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let listing_id = match segments.as_slice() {
            [LISTING_SEGMENT, id] => percent_decode_str(id)
                .decode_utf8()
                .map_err(|e| Error::route(path, format!("listing id is not UTF-8: {e}")))?
                .into_owned(),
            _ => return Err(Error::route(path, "expected /listing/{id}")),
        };

        let conversation_id = url
            .query_pairs()
            .find(|(key, _)| key == CONVERSATION_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            listing_id,
            conversation_id,
        })
    }
}

/// Everything the listing detail page needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingPage {
    /// The listing.
    pub listing: Listing,
    /// Conversation to open, if the route named one.
    pub conversation_id: Option<String>,
}

impl ListingPage {
    /// The description split into plain and link segments.
    #[must_use]
    pub fn description_segments(&self, annotator: &LinkAnnotator) -> Vec<TextSegment> {
        annotator.annotate_owned(&self.listing.description)
    }

    /// The first YouTube video linked from the description.
    #[must_use]
    pub fn video_id(&self, annotator: &LinkAnnotator) -> Option<String> {
        annotator
            .links(&self.listing.description)
            .find_map(extract_video_id)
    }

    /// Metadata for the linked video, if there is one and it can be found.
    ///
    /// Lookup failures are logged and treated as absent.
    pub async fn video_metadata<V>(
        &self,
        annotator: &LinkAnnotator,
        videos: &V,
    ) -> Option<VideoMetadata>
    where
        V: VideoMetadataService + ?Sized,
    {
        let video_id = self.video_id(annotator)?;
        match videos.fetch_video_metadata(&video_id).await {
            Ok(meta) => meta,
            Err(e) => {
                warn!(video_id = %video_id, error = %e, "Video metadata lookup failed");
                None
            }
        }
    }
}

/// Result of resolving a listing detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// The listing exists.
    Found(ListingPage),
    /// The listing does not exist or could not be loaded.
    NotFound,
}

impl PageOutcome {
    /// Whether the page resolved to a listing.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Load the listing named by `route`.
///
/// A missing listing and a failed lookup both resolve to
/// [`PageOutcome::NotFound`]; failures are logged. No retry.
pub async fn load_listing_page<S>(service: &S, route: &ListingRoute) -> PageOutcome
where
    S: ListingService + ?Sized,
{
    match service.fetch_listing(&route.listing_id).await {
        Ok(Some(listing)) => {
            debug!(listing_id = %route.listing_id, "Listing page resolved");
            PageOutcome::Found(ListingPage {
                listing,
                conversation_id: route.conversation_id.clone(),
            })
        }
        Ok(None) => {
            debug!(listing_id = %route.listing_id, "Listing not found");
            PageOutcome::NotFound
        }
        Err(e) => {
            warn!(listing_id = %route.listing_id, error = %e, "Listing lookup failed");
            PageOutcome::NotFound
        }
    }
}
