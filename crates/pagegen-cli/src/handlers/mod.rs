//! Command handlers
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod check;
pub mod config;
pub mod generate;
pub mod verify;

pub use check::execute_check;
pub use config::execute_config;
pub use generate::execute_generate;
pub use verify::execute_verify;

use crate::config::CliConfig;
use crate::output::ProgressReporter;
use pagegen::PageDescriptor;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A page together with the descriptor file it came from.
#[derive(Debug, Clone)]
pub struct SourcedPage {
    /// Descriptor file
    pub source: PathBuf,
    /// The page
    pub page: PageDescriptor,
}

/// Pages loaded from the inputs, plus the number of files that failed to load.
#[derive(Debug, Default)]
pub struct LoadedInputs {
    /// Pages in input order
    pub pages: Vec<SourcedPage>,
    /// Files that could not be read or parsed
    pub failed_files: usize,
}

/// Read every descriptor file, reporting the ones that fail.
///
/// With `fail_fast`, loading stops at the first bad file.
pub fn load_inputs(inputs: &[PathBuf], fail_fast: bool, reporter: &ProgressReporter) -> LoadedInputs {
    let mut loaded = LoadedInputs::default();
    for input in inputs {
        match pagegen::load_descriptors(input) {
            Ok(pages) => {
                if pages.is_empty() {
                    warn!(path = %input.display(), "descriptor file declares no pages");
                    reporter.warning(&format!("{}: no pages declared", input.display()));
                }
                loaded.pages.extend(pages.into_iter().map(|page| SourcedPage {
                    source: input.clone(),
                    page,
                }));
            }
            Err(e) => {
                reporter.failure(&format!("{}: {e}", input.display()));
                loaded.failed_files += 1;
                if fail_fast {
                    break;
                }
            }
        }
    }
    loaded
}

/// Reporter configured from the CLI settings.
#[must_use]
pub fn reporter_for(config: &CliConfig) -> ProgressReporter {
    ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet())
}

/// Label used in status lines: `file.yaml:Page`.
#[must_use]
pub fn page_label(source: &Path, page: &str) -> String {
    format!("{}:{page}", source.display())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_inputs_counts_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.yaml");
        std::fs::write(&good, "- name: A\n  entries: [{ name: a }]\n- name: B\n  entries: [{ name: b }]\n").unwrap();
        let bad = dir.path().join("bad.txt");
        std::fs::write(&bad, "").unwrap();

        let reporter = ProgressReporter::new(false, true);
        let loaded = load_inputs(&[bad.clone(), good.clone()], false, &reporter);
        assert_eq!(loaded.pages.len(), 2);
        assert_eq!(loaded.failed_files, 1);
        assert_eq!(loaded.pages[1].source, good);

        let loaded = load_inputs(&[bad, good], true, &reporter);
        assert!(loaded.pages.is_empty());
        assert_eq!(loaded.failed_files, 1);
    }

    #[test]
    fn test_page_label() {
        assert_eq!(page_label(Path::new("pages/login.yaml"), "Login"), "pages/login.yaml:Login");
    }
}
