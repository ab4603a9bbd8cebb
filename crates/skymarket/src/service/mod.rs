//! Boundary to the remote marketplace services.
//!
//! Three request/response services sit behind async traits:
//!
//! - [`ListingService`]: look up a listing by id. Not-found is `Ok(None)`.
//! - [`PriceExtensionRegistry`]: register a price-extension label.
//! - [`VideoMetadataService`]: look up video metadata. Absence is `Ok(None)`,
//!   not an error.
//!
//! HTTP-backed implementations live in [`http`] and [`youtube`]; in-memory
//! ones in [`memory`]. None of them retry: each call is one awaited request.

pub mod http;
pub mod memory;
mod model;
pub mod youtube;

use async_trait::async_trait;
use thiserror::Error;

pub use http::{HttpListingService, HttpPriceExtensionRegistry};
pub use memory::{InMemoryListingService, InMemoryPriceExtensionRegistry, InMemoryVideoMetadata};
pub use model::{Listing, PriceExtensionLabel, VideoMetadata};
pub use youtube::{extract_video_id, YouTubeOEmbed};

/// Errors returned by remote service calls.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an unexpected status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The service refused the request.
    #[error("rejected: {reason}")]
    Rejected {
        /// Reason given by the service.
        reason: String,
    },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// A configured endpoint is not usable.
    #[error("invalid endpoint '{url}': {message}")]
    Endpoint {
        /// The configured URL.
        url: String,
        /// What is wrong with it.
        message: String,
    },

    /// The service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    /// Create a rejection error.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Create an endpoint configuration error.
    #[must_use]
    pub fn endpoint(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Endpoint {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Result type for service calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Read access to marketplace listings.
#[async_trait]
pub trait ListingService: Send + Sync {
    /// Fetch a listing. Returns `Ok(None)` if no listing has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or answers with
    /// something other than a listing or not-found.
    async fn fetch_listing(&self, id: &str) -> ServiceResult<Option<Listing>>;
}

/// Registration of price-extension labels (`OBO`, `Per Hour`, ...).
#[async_trait]
pub trait PriceExtensionRegistry: Send + Sync {
    /// Register `label`, attributing it to `created_by`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Rejected`] if the service refuses the label,
    /// or a transport error if it cannot be reached.
    async fn register_label(&self, label: &str, created_by: &str) -> ServiceResult<()>;
}

/// Lookup of video metadata for embedded listing videos.
#[async_trait]
pub trait VideoMetadataService: Send + Sync {
    /// Fetch metadata for `video_id`. `Ok(None)` means the video is absent
    /// or not embeddable.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or decoding failures.
    async fn fetch_video_metadata(&self, video_id: &str) -> ServiceResult<Option<VideoMetadata>>;
}
