//! Error types for `pagegen`.
//!
//! Validation variants are diagnostics about a single page declaration and are
//! fatal to that declaration. The remaining variants come from reading
//! descriptors and writing or verifying generated files.

use crate::declaration::DeclarationKind;
use crate::locator::Strategy;
use thiserror::Error;

/// Result type alias for pagegen operations.
pub type Result<T> = std::result::Result<T, PageGenError>;

/// Errors that can occur while generating page accessors.
#[derive(Debug, Error)]
pub enum PageGenError {
    /// The declaration is not an enumerated type
    #[error(
        "Only enum declarations can describe a page. \
         Please make sure \"{declaration}\" is an enum (found {kind})."
    )]
    NotAnEnum {
        /// Declaration name
        declaration: String,
        /// Kind that was found instead
        kind: DeclarationKind,
    },

    /// The enum declares no entries
    #[error("At least one entry shall be defined in \"{declaration}\"")]
    EmptyEnum {
        /// Declaration name
        declaration: String,
    },

    /// An entry carries more than one locator marker
    #[error(
        "More than one locator found on \"{entry}\" in \"{declaration}\": {}",
        join_strategies(.strategies)
    )]
    MultipleLocators {
        /// Declaration name
        declaration: String,
        /// Offending entry
        entry: String,
        /// Conflicting strategies, sorted alphabetically by name
        strategies: Vec<Strategy>,
    },

    /// The startup URL is not an absolute URL with a host
    #[error("Invalid startup URL '{url}' on \"{declaration}\": {reason}")]
    InvalidUrl {
        /// Declaration name
        declaration: String,
        /// The malformed value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A name cannot be used as a Kotlin identifier
    #[error("Invalid identifier '{name}' in \"{declaration}\": {reason}")]
    InvalidIdentifier {
        /// Declaration name
        declaration: String,
        /// The invalid identifier
        name: String,
        /// Why it's invalid
        reason: String,
    },

    /// Two entries share a name
    #[error("Entry \"{entry}\" is declared more than once in \"{declaration}\"")]
    DuplicateEntry {
        /// Declaration name
        declaration: String,
        /// Duplicated entry name
        entry: String,
    },

    /// A parameterized locator requests a collection result
    #[error(
        "Entry \"{entry}\" in \"{declaration}\" has placeholders and requests a collection; \
         parameterized locators always resolve a single element"
    )]
    CollectionTemplate {
        /// Declaration name
        declaration: String,
        /// Offending entry
        entry: String,
    },

    /// Descriptor file extension not recognised
    #[error("Unsupported descriptor format for '{path}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat {
        /// Path to the file
        path: String,
    },

    /// Manifest verification failed
    #[error("Manifest verification failed for '{path}': {reason}")]
    ManifestError {
        /// Path to the file
        path: String,
        /// Why verification failed
        reason: String,
    },

    /// Hash mismatch (generated file was modified)
    #[error("Hash mismatch for '{path}': expected {expected}, got {actual}")]
    HashMismatch {
        /// Path to the file
        path: String,
        /// Expected hash
        expected: String,
        /// Actual hash
        actual: String,
    },

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl PageGenError {
    /// Whether this error is a validation diagnostic about a declaration
    /// rather than an I/O or format failure.
    #[must_use]
    pub const fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Self::NotAnEnum { .. }
                | Self::EmptyEnum { .. }
                | Self::MultipleLocators { .. }
                | Self::InvalidUrl { .. }
                | Self::InvalidIdentifier { .. }
                | Self::DuplicateEntry { .. }
                | Self::CollectionTemplate { .. }
        )
    }

    /// Name of the declaration a diagnostic refers to.
    #[must_use]
    pub fn declaration(&self) -> Option<&str> {
        match self {
            Self::NotAnEnum { declaration, .. }
            | Self::EmptyEnum { declaration }
            | Self::MultipleLocators { declaration, .. }
            | Self::InvalidUrl { declaration, .. }
            | Self::InvalidIdentifier { declaration, .. }
            | Self::DuplicateEntry { declaration, .. }
            | Self::CollectionTemplate { declaration, .. } => Some(declaration),
            _ => None,
        }
    }
}

/// A name rejected as a Kotlin identifier, before it is tied to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid identifier '{name}': {reason}")]
pub struct IdentifierError {
    /// The invalid identifier
    pub name: String,
    /// Why it's invalid
    pub reason: String,
}

impl IdentifierError {
    /// Attach the declaration the name belongs to.
    #[must_use]
    pub fn in_declaration(self, declaration: impl Into<String>) -> PageGenError {
        PageGenError::InvalidIdentifier {
            declaration: declaration.into(),
            name: self.name,
            reason: self.reason,
        }
    }
}

fn join_strategies(strategies: &[Strategy]) -> String {
    strategies
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
