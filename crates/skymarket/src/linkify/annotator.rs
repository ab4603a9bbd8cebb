//! URL detection over free-form text.

use std::iter::FusedIterator;
use std::sync::OnceLock;

use regex::{Match, Regex};
use tracing::trace;

use super::segment::{Segment, TextSegment};
use crate::error::{Error, Result};

/// Pattern used when no custom pattern is configured.
///
/// Greedy over non-whitespace, so punctuation that ends a sentence right
/// after a URL becomes part of the link.
pub const DEFAULT_LINK_PATTERN: &str = r"https?://\S+";

fn default_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(DEFAULT_LINK_PATTERN).expect("default link pattern compiles"))
}

/// Splits text into plain and link segments.
#[derive(Debug, Clone)]
pub struct LinkAnnotator {
    regex: Regex,
}

impl LinkAnnotator {
    /// Create an annotator using [`DEFAULT_LINK_PATTERN`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            regex: default_regex().clone(),
        }
    }

    /// Create an annotator from a custom pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] if the pattern does not compile, and a
    /// validation error if it can match the empty string (which would
    /// produce empty links).
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if regex.is_match("") {
            return Err(Error::validation(format!(
                "link pattern '{pattern}' matches the empty string"
            )));
        }
        Ok(Self { regex })
    }

    /// Build from an optional configured pattern, falling back to the default.
    ///
    /// # Errors
    ///
    /// See [`LinkAnnotator::with_pattern`].
    pub fn from_pattern(pattern: Option<&str>) -> Result<Self> {
        match pattern {
            Some(p) => Self::with_pattern(p),
            None => Ok(Self::new()),
        }
    }

    /// The pattern in use.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Lazily annotate `text`.
    ///
    /// Empty plain runs (between adjacent links, or at either end) are
    /// never emitted. Empty input yields no segments.
    pub fn annotate<'r, 't>(&'r self, text: &'t str) -> Segments<'r, 't> {
        Segments {
            regex: &self.regex,
            text,
            pos: 0,
            pending: None,
        }
    }

    /// Annotate optional text; `None` behaves like the empty string.
    pub fn annotate_optional<'r, 't>(&'r self, text: Option<&'t str>) -> Segments<'r, 't> {
        self.annotate(text.unwrap_or_default())
    }

    /// Annotate `text` into owned segments.
    #[must_use]
    pub fn annotate_owned(&self, text: &str) -> Vec<TextSegment> {
        self.annotate(text).map(TextSegment::from).collect()
    }

    /// Iterate over the URLs found in `text`.
    pub fn links<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = &'t str> + 'r
    where
        't: 'r,
    {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Whether `text` contains at least one link.
    #[must_use]
    pub fn has_links(&self, text: &str) -> bool {
        self.links(text).next().is_some()
    }

    /// Render `text` as HTML with links turned into anchors.
    ///
    /// Anchors open in a new tab. All text, including the URL, is escaped.
    #[must_use]
    pub fn to_html(&self, text: &str) -> String {
        let mut html = String::with_capacity(text.len());
        for segment in self.annotate(text) {
            match segment {
                Segment::Plain(plain) => escape_html_into(&mut html, plain),
                Segment::Link(url) => {
                    html.push_str("<a href=\"");
                    escape_html_into(&mut html, url);
                    html.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                    escape_html_into(&mut html, url);
                    html.push_str("</a>");
                }
            }
        }
        trace!(input_len = text.len(), output_len = html.len(), "Rendered linkified HTML");
        html
    }
}

impl Default for LinkAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_html_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Lazy iterator over the segments of a piece of text.
///
/// Holds only the regex, the text and a byte offset, so cloning is cheap and
/// a clone resumes from the same point independently.
#[derive(Debug, Clone)]
pub struct Segments<'r, 't> {
    regex: &'r Regex,
    text: &'t str,
    pos: usize,
    pending: Option<Match<'t>>,
}

impl<'t> Segments<'_, 't> {
    /// The next non-empty match at or after `pos`.
    fn next_match(&self) -> Option<Match<'t>> {
        let mut at = self.pos;
        loop {
            let m = self.regex.find_at(self.text, at)?;
            if !m.as_str().is_empty() {
                return Some(m);
            }
            // Zero-width match: step over one character and search again.
            let step = self.text[m.end()..].chars().next()?.len_utf8();
            at = m.end() + step;
        }
    }
}

impl<'t> Iterator for Segments<'_, 't> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(m) = self.pending.take() {
            self.pos = m.end();
            return Some(Segment::Link(m.as_str()));
        }

        if self.pos >= self.text.len() {
            return None;
        }

        match self.next_match() {
            Some(m) if m.start() > self.pos => {
                let plain = &self.text[self.pos..m.start()];
                self.pending = Some(m);
                Some(Segment::Plain(plain))
            }
            Some(m) => {
                self.pos = m.end();
                Some(Segment::Link(m.as_str()))
            }
            None => {
                let rest = &self.text[self.pos..];
                self.pos = self.text.len();
                Some(Segment::Plain(rest))
            }
        }
    }
}

impl FusedIterator for Segments<'_, '_> {}
