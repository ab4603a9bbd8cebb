//! Link detection for message bodies and listing descriptions.
//!
//! Text is split into [`Segment`]s: plain runs and links. Concatenating the
//! display text of every segment always gives back the input, byte for byte.
//!
//! A link is any `http://` or `https://` followed by one or more
//! non-whitespace characters. The match is greedy, so a period or comma
//! directly after a URL ends up inside the link; this is the documented
//! behavior.
//!
//! # Example
//!
//! ```
//! use skymarket::linkify::{LinkAnnotator, Segment};
//!
//! let annotator = LinkAnnotator::new();
//! let segments: Vec<_> = annotator.annotate("Check http://example.com for info").collect();
//!
//! assert_eq!(
//!     segments,
//!     vec![
//!         Segment::Plain("Check "),
//!         Segment::Link("http://example.com"),
//!         Segment::Plain(" for info"),
//!     ]
//! );
//! ```

mod annotator;
mod segment;

pub use annotator::{LinkAnnotator, Segments, DEFAULT_LINK_PATTERN};
pub use segment::{reconstruct, Segment, TextSegment};
