//! Locator model: lookup strategies and resolved locators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy used to look an element up in the page.
///
/// Variants are declared in alphabetical order of their marker names, so the
/// derived `Ord` sorts them the same way diagnostics list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `class` attribute match
    ClassName,
    /// CSS selector
    Css,
    /// `id` attribute match
    Id,
    /// `id` or `name` attribute match; only produced by default resolution
    IdOrName,
    /// Exact anchor text
    LinkText,
    /// `name` attribute match
    Name,
    /// Anchor text substring
    PartialLinkText,
    /// Element tag name
    TagName,
    /// XPath expression
    Xpath,
}

impl Strategy {
    /// Strategies that may appear as explicit markers in a descriptor.
    pub const MARKERS: [Self; 8] = [
        Self::ClassName,
        Self::Css,
        Self::Id,
        Self::LinkText,
        Self::Name,
        Self::PartialLinkText,
        Self::TagName,
        Self::Xpath,
    ];

    /// Marker name as written in descriptors and diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClassName => "class_name",
            Self::Css => "css",
            Self::Id => "id",
            Self::IdOrName => "id_or_name",
            Self::LinkText => "link_text",
            Self::Name => "name",
            Self::PartialLinkText => "partial_link_text",
            Self::TagName => "tag_name",
            Self::Xpath => "xpath",
        }
    }

    /// Name of the runtime lazy-lookup delegate for this strategy.
    #[must_use]
    pub const fn delegate(self) -> &'static str {
        match self {
            Self::ClassName => "className",
            Self::Css => "css",
            Self::Id => "id",
            Self::IdOrName => "idOrName",
            Self::LinkText => "linkText",
            Self::Name => "name",
            Self::PartialLinkText => "partialLinkText",
            Self::TagName => "tagName",
            Self::Xpath => "xpath",
        }
    }

    /// Selenium `By` factory used for eager lookups.
    ///
    /// `IdOrName` has no factory on `By`; it is constructed directly as
    /// `ByIdOrName(...)`.
    #[must_use]
    pub const fn by_factory(self) -> Option<&'static str> {
        match self {
            Self::ClassName => Some("className"),
            Self::Css => Some("cssSelector"),
            Self::Id => Some("id"),
            Self::IdOrName => None,
            Self::LinkText => Some("linkText"),
            Self::Name => Some("name"),
            Self::PartialLinkText => Some("partialLinkText"),
            Self::TagName => Some("tagName"),
            Self::Xpath => Some("xpath"),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a lookup resolves one element or every matching element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cardinality {
    /// A single element
    #[default]
    Single,
    /// All matching elements
    Collection,
}

impl Cardinality {
    /// Build from a descriptor `collect` flag.
    #[must_use]
    pub const fn from_collect(collect: bool) -> Self {
        if collect {
            Self::Collection
        } else {
            Self::Single
        }
    }

    /// Kotlin type the generated member is declared with.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Single => "WebElement",
            Self::Collection => "WebElements",
        }
    }

    /// Check if this is a collection
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::Collection)
    }
}

/// A resolved locator: strategy, raw locator string and result cardinality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    /// Lookup strategy
    pub strategy: Strategy,
    /// Raw locator string, placeholders intact
    pub value: String,
    /// Single element or collection
    pub cardinality: Cardinality,
}

impl Locator {
    /// Create a single-element locator.
    #[must_use]
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
            cardinality: Cardinality::Single,
        }
    }

    /// Default locator for an entry without a marker.
    #[must_use]
    pub fn id_or_name(entry: impl Into<String>) -> Self {
        Self::new(Strategy::IdOrName, entry)
    }

    /// Switch the locator to collection results.
    #[must_use]
    pub fn collect(mut self) -> Self {
        self.cardinality = Cardinality::Collection;
        self
    }
}
