//! Generator options.

use serde::{Deserialize, Serialize};

/// Runtime package used when none is configured.
pub const DEFAULT_RUNTIME_PACKAGE: &str = "dev.pagegen.runtime";

/// Provenance line written at the top of every generated file.
pub const DEFAULT_HEADER: &str = "Code generated by pagegen. DO NOT EDIT.";

/// Options that shape the emitted source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Kotlin package providing the lookup delegates and `WebElements`
    pub runtime_package: String,
    /// Text of the provenance comment
    pub header: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime package
    #[must_use]
    pub fn with_runtime_package(mut self, package: impl Into<String>) -> Self {
        self.runtime_package = package.into();
        self
    }

    /// Set the provenance header; each line becomes a `//` comment.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Header written to generated files. A blank header falls back to
    /// [`DEFAULT_HEADER`], so every file carries a provenance line.
    #[must_use]
    pub fn provenance(&self) -> &str {
        if self.header.trim().is_empty() {
            DEFAULT_HEADER
        } else {
            &self.header
        }
    }
}
