//! Page declarations: the host-agnostic descriptor and its validated form.
//!
//! A [`PageDescriptor`] is what a front end hands over (read from YAML or
//! JSON, or built in code). It may be malformed: wrong kind, no entries, or
//! several markers on one entry. [`crate::validate::validate`] turns it into
//! a [`PageDeclaration`], which holds at most one [`Locator`] per entry.

use crate::ir::Identifier;
use crate::locator::{Cardinality, Locator, Strategy};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of declaration the descriptor was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// Enumerated type (the only accepted kind)
    #[default]
    Enum,
    /// Plain class
    Class,
    /// Data class
    DataClass,
    /// Singleton object
    Object,
    /// Interface
    Interface,
}

impl DeclarationKind {
    /// Human readable name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Class => "class",
            Self::DataClass => "data class",
            Self::Object => "object",
            Self::Interface => "interface",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments of a locator marker.
///
/// Either a bare value (`id: pass`) or a map (`css: { value: li, collect: true }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerArgs {
    /// Locator value only
    Value(String),
    /// Value (defaults to the entry name) and collection flag
    Detailed {
        /// Locator value
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        /// Resolve every matching element
        #[serde(default)]
        collect: bool,
    },
}

/// A locator marker attached to an entry.
///
/// Written as a single-key map from marker name to [`MarkerArgs`]
/// (`id: pass`, `{"css": {"value": "li", "collect": true}}`) in every format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorMarker {
    /// `class` attribute match
    ClassName(MarkerArgs),
    /// CSS selector
    Css(MarkerArgs),
    /// `id` attribute match
    Id(MarkerArgs),
    /// Exact anchor text
    LinkText(MarkerArgs),
    /// `name` attribute match
    Name(MarkerArgs),
    /// Anchor text substring
    PartialLinkText(MarkerArgs),
    /// Element tag name
    TagName(MarkerArgs),
    /// XPath expression
    Xpath(MarkerArgs),
}

impl LocatorMarker {
    /// Create a marker from a strategy and value.
    ///
    /// `IdOrName` has no marker form and is mapped to `Id`; callers should
    /// pass one of [`Strategy::MARKERS`].
    #[must_use]
    pub fn new(strategy: Strategy, value: impl Into<String>, collect: bool) -> Self {
        let value = value.into();
        let args = if collect {
            MarkerArgs::Detailed {
                value: Some(value),
                collect,
            }
        } else {
            MarkerArgs::Value(value)
        };
        Self::from_parts(strategy, args)
    }

    /// Strategy this marker selects.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::ClassName(_) => Strategy::ClassName,
            Self::Css(_) => Strategy::Css,
            Self::Id(_) => Strategy::Id,
            Self::LinkText(_) => Strategy::LinkText,
            Self::Name(_) => Strategy::Name,
            Self::PartialLinkText(_) => Strategy::PartialLinkText,
            Self::TagName(_) => Strategy::TagName,
            Self::Xpath(_) => Strategy::Xpath,
        }
    }

    fn from_parts(strategy: Strategy, args: MarkerArgs) -> Self {
        match strategy {
            Strategy::ClassName => Self::ClassName(args),
            Strategy::Css => Self::Css(args),
            Strategy::Id | Strategy::IdOrName => Self::Id(args),
            Strategy::LinkText => Self::LinkText(args),
            Strategy::Name => Self::Name(args),
            Strategy::PartialLinkText => Self::PartialLinkText(args),
            Strategy::TagName => Self::TagName(args),
            Strategy::Xpath => Self::Xpath(args),
        }
    }

    const fn args(&self) -> &MarkerArgs {
        match self {
            Self::ClassName(args)
            | Self::Css(args)
            | Self::Id(args)
            | Self::LinkText(args)
            | Self::Name(args)
            | Self::PartialLinkText(args)
            | Self::TagName(args)
            | Self::Xpath(args) => args,
        }
    }

    /// Turn the marker into a locator; a missing value means the entry name.
    #[must_use]
    pub fn to_locator(&self, entry: &str) -> Locator {
        let (value, collect) = match self.args() {
            MarkerArgs::Value(value) => (value.clone(), false),
            MarkerArgs::Detailed { value, collect } => (
                value.clone().unwrap_or_else(|| entry.to_string()),
                *collect,
            ),
        };
        Locator {
            strategy: self.strategy(),
            value,
            cardinality: Cardinality::from_collect(collect),
        }
    }
}

impl Serialize for LocatorMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.strategy().as_str(), self.args())?;
        map.end()
    }
}

struct MarkerVisitor;

impl<'de> Visitor<'de> for MarkerVisitor {
    type Value = LocatorMarker;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a single-key map from marker name to locator value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };
        let strategy = Strategy::MARKERS
            .into_iter()
            .find(|s| s.as_str() == key)
            .ok_or_else(|| de::Error::unknown_variant(&key, MARKER_NAMES))?;
        let args: MarkerArgs = map.next_value()?;
        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(LocatorMarker::from_parts(strategy, args))
    }
}

const MARKER_NAMES: &[&str] = &[
    "class_name",
    "css",
    "id",
    "link_text",
    "name",
    "partial_link_text",
    "tag_name",
    "xpath",
];

impl<'de> Deserialize<'de> for LocatorMarker {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MarkerVisitor)
    }
}

/// One entry of a page descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDescriptor {
    /// Entry name
    pub name: String,
    /// Attached locator markers (at most one is valid)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locators: Vec<LocatorMarker>,
}

impl EntryDescriptor {
    /// Entry without markers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locators: Vec::new(),
        }
    }

    /// Attach a marker.
    #[must_use]
    pub fn marker(mut self, marker: LocatorMarker) -> Self {
        self.locators.push(marker);
        self
    }

    /// Attach a single-element marker.
    #[must_use]
    pub fn locator(self, strategy: Strategy, value: impl Into<String>) -> Self {
        self.marker(LocatorMarker::new(strategy, value, false))
    }

    /// Attach a collection marker.
    #[must_use]
    pub fn collection(self, strategy: Strategy, value: impl Into<String>) -> Self {
        self.marker(LocatorMarker::new(strategy, value, true))
    }
}

/// Host-agnostic description of a page declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Declared name
    pub name: String,
    /// Namespace of the declaration (may be empty)
    #[serde(default)]
    pub package: String,
    /// Declaration kind
    #[serde(default)]
    pub kind: DeclarationKind,
    /// Override for the generated class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Startup URL to navigate to on construction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Entries in declaration order
    #[serde(default)]
    pub entries: Vec<EntryDescriptor>,
}

impl PageDescriptor {
    /// Create an enum descriptor with no entries.
    #[must_use]
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind: DeclarationKind::Enum,
            class_name: None,
            url: None,
            entries: Vec::new(),
        }
    }

    /// Set the declaration kind.
    #[must_use]
    pub fn kind(mut self, kind: DeclarationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the generated class name override.
    #[must_use]
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Set the startup URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Append an entry.
    #[must_use]
    pub fn entry(mut self, entry: EntryDescriptor) -> Self {
        self.entries.push(entry);
        self
    }

    /// Blake3 hash of the descriptor's canonical JSON form.
    pub fn input_hash(&self) -> crate::Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }
}

/// A validated entry: name plus zero or one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorEntry {
    /// Entry name
    pub name: Identifier,
    /// Explicit locator, if a marker was present
    pub locator: Option<Locator>,
}

impl LocatorEntry {
    /// Resolve the effective locator.
    ///
    /// Without a marker the entry is looked up by id-or-name using its own
    /// name, always as a single element.
    #[must_use]
    pub fn resolve(&self) -> Locator {
        self.locator
            .clone()
            .unwrap_or_else(|| Locator::id_or_name(self.name.as_str()))
    }
}

/// A validated page declaration.
///
/// Only [`crate::validate::validate`] constructs these; holding one means
/// building and emitting its class cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDeclaration {
    pub(crate) name: Identifier,
    pub(crate) package: String,
    pub(crate) class_name: Option<Identifier>,
    pub(crate) url: Option<String>,
    pub(crate) entries: Vec<LocatorEntry>,
}

impl PageDeclaration {
    /// Declared name
    #[must_use]
    pub const fn name(&self) -> &Identifier {
        &self.name
    }

    /// Declaration namespace
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Class name override
    #[must_use]
    pub const fn class_name(&self) -> Option<&Identifier> {
        self.class_name.as_ref()
    }

    /// Startup URL
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Entries in declaration order (never empty)
    #[must_use]
    pub fn entries(&self) -> &[LocatorEntry] {
        &self.entries
    }

    /// Name of the generated class and output file.
    #[must_use]
    pub const fn output_name(&self) -> &Identifier {
        match &self.class_name {
            Some(name) => name,
            None => &self.name,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn marker_without_value_uses_entry_name() {
        let marker = LocatorMarker::Name(MarkerArgs::Detailed {
            value: None,
            collect: false,
        });
        let locator = marker.to_locator("password");
        assert_eq!(locator, Locator::new(Strategy::Name, "password"));
    }

    #[test]
    fn marker_collect_flag() {
        let marker = LocatorMarker::new(Strategy::Css, "li.item", true);
        let locator = marker.to_locator("items");
        assert_eq!(locator.cardinality, Cardinality::Collection);
        assert_eq!(locator.value, "li.item");
    }

    #[test]
    fn yaml_marker_forms() {
        let yaml = r"
name: Login
package: com.example
entries:
  - name: username
  - name: password
    locators:
      - id: pass
  - name: rows
    locators:
      - css: { value: tr, collect: true }
  - name: submit
    locators:
      - name: {}
";
        let descriptor: PageDescriptor = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(descriptor.kind, DeclarationKind::Enum);
        assert_eq!(descriptor.entries.len(), 4);
        assert!(descriptor.entries[0].locators.is_empty());
        assert_eq!(
            descriptor.entries[1].locators[0].to_locator("password"),
            Locator::new(Strategy::Id, "pass")
        );
        assert_eq!(
            descriptor.entries[2].locators[0].to_locator("rows"),
            Locator::new(Strategy::Css, "tr").collect()
        );
        assert_eq!(
            descriptor.entries[3].locators[0].to_locator("submit"),
            Locator::new(Strategy::Name, "submit")
        );
    }

    #[test]
    fn json_marker_forms() {
        let json = r#"{
            "name": "Login",
            "entries": [
                {"name": "password", "locators": [{"id": "pass"}]},
                {"name": "rows", "locators": [{"css": {"value": "tr", "collect": true}}]}
            ]
        }"#;
        let descriptor: PageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            descriptor.entries[0].locators[0],
            LocatorMarker::new(Strategy::Id, "pass", false)
        );
        assert_eq!(
            descriptor.entries[1].locators[0].to_locator("rows"),
            Locator::new(Strategy::Css, "tr").collect()
        );
    }

    #[test]
    fn marker_serializes_as_single_key_map() {
        let marker = LocatorMarker::new(Strategy::PartialLinkText, "More", false);
        assert_eq!(
            serde_json::to_string(&marker).unwrap(),
            r#"{"partial_link_text":"More"}"#
        );
        let yaml = serde_yaml_ng::to_string(&vec![marker.clone()]).unwrap();
        let back: Vec<LocatorMarker> = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(back, vec![marker]);
    }

    #[test]
    fn rejects_unknown_or_compound_markers() {
        let unknown = serde_yaml_ng::from_str::<LocatorMarker>("id_or_name: user");
        assert!(unknown.unwrap_err().to_string().contains("id_or_name"));

        assert!(serde_yaml_ng::from_str::<LocatorMarker>("{ id: a, css: b }").is_err());
        assert!(serde_json::from_str::<LocatorMarker>("{}").is_err());
    }

    #[test]
    fn json_descriptor_kind() {
        let json = r#"{"name": "Home", "kind": "data_class"}"#;
        let descriptor: PageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.kind, DeclarationKind::DataClass);
        assert!(descriptor.entries.is_empty());
        assert!(descriptor.package.is_empty());
    }

    #[test]
    fn input_hash_is_stable() {
        let descriptor = PageDescriptor::new("com.example", "Login")
            .entry(EntryDescriptor::new("username"));
        assert_eq!(
            descriptor.input_hash().unwrap(),
            descriptor.clone().input_hash().unwrap()
        );
        let other = descriptor.clone().url("https://example.com");
        assert_ne!(descriptor.input_hash().unwrap(), other.input_hash().unwrap());
    }

    #[test]
    fn kind_display() {
        assert_eq!(DeclarationKind::DataClass.to_string(), "data class");
        assert_eq!(DeclarationKind::Object.to_string(), "object");
    }
}
