//! Route-conditional page chrome.
//!
//! Decides from the current navigation path whether the site header and
//! footer should render. The decision is a pure function of the path and a
//! set of prefix rules; whatever UI layer subscribes to navigation changes
//! just calls [`ChromeRules::visibility`] again with the new path.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::ChromeConfig;
use crate::error::{Error, Result};

/// A piece of layout-level decoration around page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeElement {
    /// Site header and navigation bar.
    Header,
    /// Site footer.
    Footer,
}

impl fmt::Display for ChromeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Footer => write!(f, "footer"),
        }
    }
}

/// How a prefix has to line up with the path to count as a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Plain `starts_with`. `/messages` also matches `/messagesArchive`.
    #[default]
    Raw,
    /// The prefix must be followed by the end of the path, `/`, `?` or `#`.
    Segment,
}

/// Which chrome elements to render for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChromeVisibility {
    /// Whether the header renders.
    pub header: bool,
    /// Whether the footer renders.
    pub footer: bool,
}

impl ChromeVisibility {
    /// Visibility of a single element.
    #[must_use]
    pub fn get(&self, element: ChromeElement) -> bool {
        match element {
            ChromeElement::Header => self.header,
            ChromeElement::Footer => self.footer,
        }
    }
}

/// Prefix rules that suppress chrome elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeRules {
    hide_header: Vec<String>,
    hide_footer: Vec<String>,
    boundary: BoundaryMode,
}

impl ChromeRules {
    /// Rules that never hide anything.
    #[must_use]
    pub fn new(boundary: BoundaryMode) -> Self {
        Self {
            hide_header: Vec::new(),
            hide_footer: Vec::new(),
            boundary,
        }
    }

    /// Build rules from the `[chrome]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any prefix does not start with `/`.
    pub fn from_config(config: &ChromeConfig) -> Result<Self> {
        let rules = Self {
            hide_header: config.hide_header.clone(),
            hide_footer: config.hide_footer.clone(),
            boundary: config.boundary,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Add a prefix under which `element` is hidden.
    #[must_use]
    pub fn hide(mut self, element: ChromeElement, prefix: impl Into<String>) -> Self {
        self.prefixes_mut(element).push(prefix.into());
        self
    }

    /// The boundary mode in effect.
    #[must_use]
    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// The prefixes that hide `element`.
    #[must_use]
    pub fn prefixes(&self, element: ChromeElement) -> &[String] {
        match element {
            ChromeElement::Header => &self.hide_header,
            ChromeElement::Footer => &self.hide_footer,
        }
    }

    fn prefixes_mut(&mut self, element: ChromeElement) -> &mut Vec<String> {
        match element {
            ChromeElement::Header => &mut self.hide_header,
            ChromeElement::Footer => &mut self.hide_footer,
        }
    }

    /// Check every prefix is an absolute path.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first bad prefix.
    pub fn validate(&self) -> Result<()> {
        for element in [ChromeElement::Header, ChromeElement::Footer] {
            for prefix in self.prefixes(element) {
                if !prefix.starts_with('/') {
                    return Err(Error::validation(format!(
                        "{element} prefix '{prefix}' must start with '/'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether `element` renders on `path`.
    #[must_use]
    pub fn is_visible(&self, element: ChromeElement, path: &str) -> bool {
        let hidden_by = self
            .prefixes(element)
            .iter()
            .find(|prefix| prefix_matches(path, prefix, self.boundary));

        if let Some(prefix) = hidden_by {
            trace!(%element, path, prefix = %prefix, "Chrome element suppressed");
            false
        } else {
            true
        }
    }

    /// Visibility of every chrome element on `path`.
    #[must_use]
    pub fn visibility(&self, path: &str) -> ChromeVisibility {
        ChromeVisibility {
            header: self.is_visible(ChromeElement::Header, path),
            footer: self.is_visible(ChromeElement::Footer, path),
        }
    }
}

impl Default for ChromeRules {
    /// Footer hidden under `/admin` and `/messages`, header under `/messages`.
    fn default() -> Self {
        Self::new(BoundaryMode::Raw)
            .hide(ChromeElement::Header, "/messages")
            .hide(ChromeElement::Footer, "/admin")
            .hide(ChromeElement::Footer, "/messages")
    }
}

fn prefix_matches(path: &str, prefix: &str, boundary: BoundaryMode) -> bool {
    let Some(rest) = path.strip_prefix(prefix) else {
        return false;
    };
    match boundary {
        BoundaryMode::Raw => true,
        BoundaryMode::Segment => {
            prefix.ends_with('/') || rest.is_empty() || rest.starts_with(['/', '?', '#'])
        }
    }
}
