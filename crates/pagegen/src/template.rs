//! Placeholder detection in locator strings.
//!
//! A placeholder is written `{{name}}`; the enclosed text, trimmed, names a
//! parameter of the generated accessor. Placeholders are substituted
//! textually when the accessor is emitted, never evaluated here.

use regex::Regex;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::unwrap_used)] // literal pattern, covered by tests
        Regex::new(r"\{\{(.*?)\}\}").unwrap()
    })
}

/// One piece of a locator string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied verbatim
    Literal(String),
    /// Reference to a parameter
    Placeholder(String),
}

/// A locator string split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorTemplate {
    raw: String,
    segments: Vec<Segment>,
    parameters: Vec<String>,
}

impl LocatorTemplate {
    /// Analyze a raw locator string.
    ///
    /// An opening `{{` without a matching `}}` stays literal text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut parameters: Vec<String> = Vec::new();
        let mut cursor = 0;

        for caps in placeholder_pattern().captures_iter(raw) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                segments.push(Segment::Literal(raw[cursor..whole.start()].to_string()));
            }
            let name = inner.as_str().trim().to_string();
            if !parameters.contains(&name) {
                parameters.push(name.clone());
            }
            segments.push(Segment::Placeholder(name));
            cursor = whole.end();
        }

        if cursor < raw.len() {
            segments.push(Segment::Literal(raw[cursor..].to_string()));
        }

        Self {
            raw: raw.to_string(),
            segments,
            parameters,
        }
    }

    /// The locator string as written, placeholders intact.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Literal and placeholder segments in source order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Distinct placeholder names in order of first appearance.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Whether the locator has any placeholder.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        !self.parameters.is_empty()
    }
}
