//! Reading page descriptors from YAML or JSON files.
//!
//! A file holds either one page or a list of pages:
//!
//! ```yaml
//! name: Login
//! package: com.example
//! entries:
//!   - name: username
//!   - name: password
//!     locators:
//!       - id: pass
//! ```

use crate::declaration::PageDescriptor;
use crate::error::{PageGenError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Serialization format of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl DescriptorFormat {
    /// Detect the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorFile {
    Many(Vec<PageDescriptor>),
    One(Box<PageDescriptor>),
}

impl DescriptorFile {
    fn into_pages(self) -> Vec<PageDescriptor> {
        match self {
            Self::Many(pages) => pages,
            Self::One(page) => vec![*page],
        }
    }
}

/// Parse descriptor text in the given format.
pub fn parse_descriptors(text: &str, format: DescriptorFormat) -> Result<Vec<PageDescriptor>> {
    let file: DescriptorFile = match format {
        DescriptorFormat::Yaml => serde_yaml_ng::from_str(text)?,
        DescriptorFormat::Json => serde_json::from_str(text)?,
    };
    Ok(file.into_pages())
}

/// Load every page declared in a descriptor file.
pub fn load_descriptors(path: &Path) -> Result<Vec<PageDescriptor>> {
    let format = DescriptorFormat::from_path(path).ok_or_else(|| PageGenError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;
    let text = std::fs::read_to_string(path)?;
    let pages = parse_descriptors(&text, format)?;
    debug!(path = %path.display(), pages = pages.len(), "loaded descriptors");
    Ok(pages)
}
