//! In-memory service implementations.
//!
//! Stand-ins for the remote services when there is no network to talk to.
//! The price-extension registry can be told to fail specific attempts so
//! batch behavior can be exercised.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{
    Listing, ListingService, PriceExtensionLabel, PriceExtensionRegistry, ServiceError,
    ServiceResult, VideoMetadata, VideoMetadataService,
};

/// Listings held in a map.
#[derive(Debug, Default)]
pub struct InMemoryListingService {
    listings: HashMap<String, Listing>,
    unavailable: Option<String>,
}

impl InMemoryListingService {
    /// An empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listing.
    #[must_use]
    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listings.insert(listing.id.clone(), listing);
        self
    }

    /// Make every lookup fail as if the service were down.
    #[must_use]
    pub fn unavailable(mut self, message: impl Into<String>) -> Self {
        self.unavailable = Some(message.into());
        self
    }

    /// Number of listings held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether no listings are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[async_trait]
impl ListingService for InMemoryListingService {
    async fn fetch_listing(&self, id: &str) -> ServiceResult<Option<Listing>> {
        if let Some(message) = &self.unavailable {
            return Err(ServiceError::Unavailable(message.clone()));
        }
        Ok(self.listings.get(id).cloned())
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    attempts: Vec<PriceExtensionLabel>,
    registered: Vec<PriceExtensionLabel>,
}

/// A price-extension registry that remembers what it was asked to do.
///
/// Rejects labels already registered, mirroring the uniqueness check the
/// remote service performs.
#[derive(Debug, Default)]
pub struct InMemoryPriceExtensionRegistry {
    state: Mutex<RegistryState>,
    fail_attempts: HashSet<usize>,
    reject_labels: HashSet<String>,
}

impl InMemoryPriceExtensionRegistry {
    /// An empty registry that accepts every new label.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`th call (1-based) as unavailable.
    #[must_use]
    pub fn failing_attempt(mut self, n: usize) -> Self {
        self.fail_attempts.insert(n);
        self
    }

    /// Reject `label` whenever it is registered.
    #[must_use]
    pub fn rejecting(mut self, label: impl Into<String>) -> Self {
        self.reject_labels.insert(label.into());
        self
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every registration attempt, in order, including failed ones.
    #[must_use]
    pub fn attempts(&self) -> Vec<PriceExtensionLabel> {
        self.state().attempts.clone()
    }

    /// Labels successfully registered, in order.
    #[must_use]
    pub fn registered(&self) -> Vec<String> {
        self.state()
            .registered
            .iter()
            .map(|l| l.label.clone())
            .collect()
    }
}

#[async_trait]
impl PriceExtensionRegistry for InMemoryPriceExtensionRegistry {
    async fn register_label(&self, label: &str, created_by: &str) -> ServiceResult<()> {
        let entry = PriceExtensionLabel {
            label: label.to_string(),
            created_by: created_by.to_string(),
        };

        let mut state = self.state();
        state.attempts.push(entry.clone());
        let attempt = state.attempts.len();

        if self.fail_attempts.contains(&attempt) {
            return Err(ServiceError::Unavailable(format!(
                "attempt {attempt} dropped"
            )));
        }
        if self.reject_labels.contains(label) {
            return Err(ServiceError::rejected(format!("label '{label}' is not allowed")));
        }
        if state.registered.iter().any(|l| l.label == label) {
            return Err(ServiceError::rejected(format!("label '{label}' already exists")));
        }

        state.registered.push(entry);
        Ok(())
    }
}

/// Video metadata held in a map.
#[derive(Debug, Default)]
pub struct InMemoryVideoMetadata {
    videos: HashMap<String, VideoMetadata>,
}

impl InMemoryVideoMetadata {
    /// An empty catalog; every lookup is absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add metadata for `video_id`.
    #[must_use]
    pub fn with_video(mut self, video_id: impl Into<String>, metadata: VideoMetadata) -> Self {
        self.videos.insert(video_id.into(), metadata);
        self
    }
}

#[async_trait]
impl VideoMetadataService for InMemoryVideoMetadata {
    async fn fetch_video_metadata(&self, video_id: &str) -> ServiceResult<Option<VideoMetadata>> {
        Ok(self.videos.get(video_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_lookup() {
        let service =
            InMemoryListingService::new().with_listing(Listing::new("1", "Mooney M20J", "Aircraft"));
        assert_eq!(service.len(), 1);
        assert!(service.fetch_listing("1").await.unwrap().is_some());
        assert!(service.fetch_listing("2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_listing_service_unavailable() {
        let service = InMemoryListingService::new().unavailable("maintenance");
        let err = service.fetch_listing("1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_registry_records_attempts() {
        let registry = InMemoryPriceExtensionRegistry::new().failing_attempt(2);
        assert!(registry.register_label("OBO", "seed").await.is_ok());
        assert!(registry.register_label("Firm", "seed").await.is_err());
        assert!(registry.register_label("Firm", "seed").await.is_ok());

        assert_eq!(registry.attempts().len(), 3);
        assert_eq!(registry.registered(), vec!["OBO", "Firm"]);
    }

    #[tokio::test]
    async fn test_registry_rejects_duplicates() {
        let registry = InMemoryPriceExtensionRegistry::new();
        registry.register_label("OBO", "seed").await.unwrap();
        let err = registry.register_label("OBO", "admin").await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_registry_rejecting_label() {
        let registry = InMemoryPriceExtensionRegistry::new().rejecting("Free");
        let err = registry.register_label("Free", "seed").await.unwrap_err();
        assert!(matches!(err, ServiceError::Rejected { .. }));
        assert!(registry.registered().is_empty());
    }

    #[tokio::test]
    async fn test_video_lookup() {
        let meta = VideoMetadata {
            title: "Walkaround".to_string(),
            thumbnail_url: "https://i.ytimg.com/vi/x/hqdefault.jpg".to_string(),
            author: "Seller".to_string(),
        };
        let service = InMemoryVideoMetadata::new().with_video("dQw4w9WgXcQ", meta.clone());
        assert_eq!(
            service.fetch_video_metadata("dQw4w9WgXcQ").await.unwrap(),
            Some(meta)
        );
        assert!(service.fetch_video_metadata("missing").await.unwrap().is_none());
    }
}
