//! Seeding of default price-extension labels.
//!
//! Labels are registered one at a time, in order. A failure is logged and
//! recorded, then the next label is attempted. Nothing is rolled back and no
//! aggregate error is raised; the caller gets a [`SeedReport`] and decides
//! what a partial result means.

use serde::Serialize;
use tracing::{info, warn};

use crate::service::PriceExtensionRegistry;

/// Labels registered when none are configured.
pub const DEFAULT_PRICE_EXTENSION_LABELS: [&str; 5] = ["OBO", "Firm", "Negotiable", "Per Hour", "Each"];

/// Attribution used when none is configured.
pub const DEFAULT_CREATED_BY: &str = "system";

/// What happened to one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedOutcome {
    /// The registry accepted the label.
    Registered,
    /// The registry refused the label or could not be reached.
    Failed {
        /// Why it failed.
        reason: String,
    },
}

impl SeedOutcome {
    /// Whether this label was registered.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered)
    }
}

/// One attempted label and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedEntry {
    /// The label.
    pub label: String,
    /// What happened.
    #[serde(flatten)]
    pub outcome: SeedOutcome,
}

/// Per-label results of a seed run, in attempt order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    entries: Vec<SeedEntry>,
}

impl SeedReport {
    /// Every attempted label with its outcome.
    #[must_use]
    pub fn entries(&self) -> &[SeedEntry] {
        &self.entries
    }

    /// Labels that were registered.
    pub fn succeeded(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.outcome.is_registered())
            .map(|e| e.label.as_str())
    }

    /// Labels that failed, with the reason.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            SeedOutcome::Failed { reason } => Some((e.label.as_str(), reason.as_str())),
            SeedOutcome::Registered => None,
        })
    }

    /// Number of labels attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.entries.len()
    }

    /// Whether every attempted label was registered.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_registered())
    }
}

/// Register `labels` with `registry`, one after another.
///
/// Every label is attempted exactly once regardless of earlier failures.
pub async fn seed_price_extension_labels<R, S>(
    registry: &R,
    labels: &[S],
    created_by: &str,
) -> SeedReport
where
    R: PriceExtensionRegistry + ?Sized,
    S: AsRef<str>,
{
    let mut report = SeedReport::default();

    for label in labels {
        let label = label.as_ref();
        let outcome = match registry.register_label(label, created_by).await {
            Ok(()) => {
                info!(label, created_by, "Registered price extension label");
                SeedOutcome::Registered
            }
            Err(e) => {
                warn!(label, created_by, error = %e, "Failed to register price extension label");
                SeedOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        report.entries.push(SeedEntry {
            label: label.to_string(),
            outcome,
        });
    }

    info!(
        attempted = report.attempted(),
        failed = report.failed().count(),
        "Price extension seeding finished"
    );
    report
}
