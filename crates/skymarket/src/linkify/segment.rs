//! Segment types produced by the link annotator.

use serde::{Deserialize, Serialize};

/// A borrowed span of annotated text.
///
/// Produced lazily by [`Segments`](super::Segments); each variant points back
/// into the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any link.
    Plain(&'a str),
    /// A detected URL. The href and the label are the same text.
    Link(&'a str),
}

impl<'a> Segment<'a> {
    /// The text this segment contributes to the rendered output.
    #[must_use]
    pub fn display_text(&self) -> &'a str {
        match self {
            Self::Plain(text) | Self::Link(text) => text,
        }
    }

    /// The link target, if this is a link.
    #[must_use]
    pub fn href(&self) -> Option<&'a str> {
        match self {
            Self::Plain(_) => None,
            Self::Link(url) => Some(url),
        }
    }

    /// Whether this segment is a link.
    #[must_use]
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link(_))
    }

    /// Copy this segment into an owned [`TextSegment`].
    #[must_use]
    pub fn to_text_segment(&self) -> TextSegment {
        match self {
            Self::Plain(text) => TextSegment::plain(*text),
            Self::Link(url) => TextSegment::link(*url),
        }
    }
}

/// An owned span of annotated text, suitable for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextSegment {
    /// Text outside any link.
    Plain {
        /// The text, whitespace and punctuation preserved.
        text: String,
    },
    /// A detected URL.
    Link {
        /// The href, exactly as it appeared in the input.
        url: String,
        /// The label shown to the reader.
        display_text: String,
    },
}

impl TextSegment {
    /// Create a plain segment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    /// Create a link segment whose label is the URL itself.
    #[must_use]
    pub fn link(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::Link {
            display_text: url.clone(),
            url,
        }
    }

    /// The text this segment contributes to the rendered output.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Plain { text } => text,
            Self::Link { display_text, .. } => display_text,
        }
    }

    /// Whether this segment is a link.
    #[must_use]
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }
}

impl From<Segment<'_>> for TextSegment {
    fn from(segment: Segment<'_>) -> Self {
        segment.to_text_segment()
    }
}

/// Concatenate the display text of `segments`.
///
/// For the output of [`LinkAnnotator::annotate`](super::LinkAnnotator::annotate)
/// this always returns the original input.
pub fn reconstruct<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = Segment<'a>>,
{
    segments.into_iter().map(|s| s.display_text()).collect()
}
