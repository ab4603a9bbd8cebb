//! `skymarket` - Core of an aviation classifieds marketplace
//!
//! This library provides link detection for free-form text, route-based
//! header/footer visibility, the static category and aircraft tables, and
//! async facades over the remote listing, price-extension and video services.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod chrome;
pub mod cli;
pub mod config;
pub mod error;
pub mod linkify;
pub mod logging;
pub mod page;
pub mod seed;
pub mod service;
pub mod taxonomy;

pub use chrome::{ChromeElement, ChromeRules, ChromeVisibility};
pub use config::Config;
pub use error::{Error, Result};
pub use linkify::{LinkAnnotator, Segment, TextSegment};
pub use logging::init_logging;
pub use page::{load_listing_page, ListingPage, ListingRoute, PageOutcome};
pub use seed::{seed_price_extension_labels, SeedReport};
pub use taxonomy::{Taxonomy, TaxonomyEntry};
