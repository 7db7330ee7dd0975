//! Intermediate representation of a generated accessor class.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: names are validated [`Identifier`]s
//! 2. **Immutability**: built once per declaration, consumed by the emitter
//! 3. **Determinism**: same IR always produces the same source text

use crate::error::IdentifierError;
use crate::locator::{Cardinality, Locator, Strategy};
use crate::template::LocatorTemplate;
use serde::{Deserialize, Serialize};

/// A validated Kotlin identifier.
///
/// Identifiers are validated at construction time to ensure they:
/// - Are not hard keywords
/// - Contain only ASCII letters, digits and underscores
/// - Don't start with a digit
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// Kotlin hard keywords that cannot be used as identifiers.
    pub const RESERVED_WORDS: &'static [&'static str] = &[
        "as",
        "break",
        "class",
        "continue",
        "do",
        "else",
        "false",
        "for",
        "fun",
        "if",
        "in",
        "interface",
        "is",
        "null",
        "object",
        "package",
        "return",
        "super",
        "this",
        "throw",
        "true",
        "try",
        "typealias",
        "typeof",
        "val",
        "var",
        "when",
        "while",
    ];

    /// Create a new identifier, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is:
    /// - Empty
    /// - A reserved word
    /// - Contains invalid characters
    /// - Starts with a digit
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        let name = name.into();
        let reject = |name: String, reason: String| Err(IdentifierError { name, reason });

        let Some(first) = name.chars().next() else {
            return reject(name, "identifier cannot be empty".to_string());
        };

        if first.is_ascii_digit() {
            return reject(name, "identifier cannot start with a digit".to_string());
        }

        if let Some(c) = name.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
            return reject(name, format!("invalid character '{c}'"));
        }

        if Self::RESERVED_WORDS.contains(&name.as_str()) {
            return reject(name, "reserved word".to_string());
        }

        Ok(Self(name))
    }

    /// Get the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully qualified import, e.g. `org.openqa.selenium.WebDriver`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Import(pub String);

impl Import {
    /// Create an import from a package and a symbol.
    #[must_use]
    pub fn new(package: &str, symbol: &str) -> Self {
        Self(format!("{package}.{symbol}"))
    }

    /// Fully qualified path
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Navigation performed when the class is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    /// Literal startup URL
    pub url: String,
}

/// Lazily looked-up property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMember {
    /// Property name
    pub name: Identifier,
    /// Resolved locator
    pub locator: Locator,
}

/// Accessor taking one `String` per placeholder and resolving eagerly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMember {
    /// Function name
    pub name: Identifier,
    /// Lookup strategy
    pub strategy: Strategy,
    /// Parameters in first-occurrence order
    pub params: Vec<Identifier>,
    /// Locator split at its placeholders
    pub template: LocatorTemplate,
}

/// One member of the generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedMember {
    /// `val name: T by delegate<T>("...")`
    Property(PropertyMember),
    /// `fun name(p: String): WebElement = findElement(...)`
    Function(FunctionMember),
}

impl GeneratedMember {
    /// Member name
    #[must_use]
    pub const fn name(&self) -> &Identifier {
        match self {
            Self::Property(p) => &p.name,
            Self::Function(f) => &f.name,
        }
    }

    /// Result cardinality; functions always resolve one element.
    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        match self {
            Self::Property(p) => p.locator.cardinality,
            Self::Function(_) => Cardinality::Single,
        }
    }

    /// Strategy used by the lookup
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Property(p) => p.locator.strategy,
            Self::Function(f) => f.strategy,
        }
    }
}

/// The root of the IR: one generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    /// Provenance comment text
    pub header: String,
    /// Class name, also the output file stem
    pub name: Identifier,
    /// Package the class is emitted into
    pub package: String,
    /// Sorted, deduplicated imports
    pub imports: Vec<Import>,
    /// Startup navigation, emitted before all members
    pub initializer: Option<Initializer>,
    /// Members in entry order
    pub members: Vec<GeneratedMember>,
}

impl GeneratedClass {
    /// Output file name, e.g. `Login.kt`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.kt", self.name)
    }

    /// Output path relative to the source root, following the package.
    #[must_use]
    pub fn relative_path(&self) -> std::path::PathBuf {
        let mut path: std::path::PathBuf = self.package.split('.').collect();
        path.push(self.file_name());
        path
    }
}
