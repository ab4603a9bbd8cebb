//! Records exchanged with the remote services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace listing, owned by the remote listing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Listing identifier.
    pub id: String,

    /// Headline shown in search results and on the detail page.
    pub title: String,

    /// Free-form description. May contain links.
    #[serde(default)]
    pub description: String,

    /// Primary image.
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Category name, as in the taxonomy tables.
    pub category: String,

    /// When the listing was created.
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Create a listing with an empty description and no image.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image_url: None,
            category: category.into(),
            created_at: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the primary image.
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// A price-extension label registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceExtensionLabel {
    /// The label text, e.g. `OBO`.
    pub label: String,
    /// Who registered it.
    pub created_by: String,
}

/// Metadata for an embedded video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title.
    pub title: String,
    /// Thumbnail image URL.
    pub thumbnail_url: String,
    /// Channel or uploader name.
    pub author: String,
}
