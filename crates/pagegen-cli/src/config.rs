//! CLI configuration
//!
//! Sources, lowest precedence first: built-in defaults, `pagegen.yaml` (or
//! the file given with `--config`), `PAGEGEN_OUTPUT_DIR`, command-line flags.
//! The last two are resolved by clap; this module handles the first two.

use crate::error::{CliError, CliResult};
use pagegen::GeneratorOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "pagegen.yaml";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Level from the `-q` / `-v` flags, if either was given.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Option<Self> {
        if quiet {
            return Some(Self::Quiet);
        }
        match verbose {
            0 => None,
            1 => Some(Self::Verbose),
            _ => Some(Self::Debug),
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default tracing filter directive for this level.
    #[must_use]
    pub const fn log_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stderr().features().colors_supported(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Number of parallel jobs (0 = auto-detect)
    pub parallel_jobs: usize,
    /// Stop at the first page that fails
    pub fail_fast: bool,
    /// Root directory for generated sources
    pub output_dir: PathBuf,
    /// Write a manifest next to each generated file
    pub manifest: bool,
    /// Options passed to the generator
    #[serde(flatten)]
    pub generator: GeneratorOptions,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            parallel_jobs: 0,
            fail_fast: false,
            output_dir: PathBuf::from("build/generated/pagegen"),
            manifest: true,
            generator: GeneratorOptions::default(),
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `path`, or from `pagegen.yaml` in the
    /// working directory when no path is given and that file exists.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a YAML config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml(&text)
            .map_err(|e| CliError::config(format!("invalid {}: {e}", path.display())))
    }

    /// Parse YAML config text; missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml_ng::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(text)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> CliResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| CliError::config(e.to_string()))
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set parallel jobs
    #[must_use]
    pub const fn with_parallel_jobs(mut self, jobs: usize) -> Self {
        self.parallel_jobs = jobs;
        self
    }

    /// Set fail fast
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Enable or disable manifests
    #[must_use]
    pub const fn with_manifest(mut self, manifest: bool) -> Self {
        self.manifest = manifest;
        self
    }

    /// Set the Kotlin runtime package
    #[must_use]
    pub fn with_runtime_package(mut self, package: impl Into<String>) -> Self {
        self.generator.runtime_package = package.into();
        self
    }

    /// Get effective number of parallel jobs
    #[must_use]
    pub fn effective_jobs(&self) -> usize {
        pagegen::generator::effective_jobs(self.parallel_jobs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(false, 0), None);
            assert_eq!(Verbosity::from_flags(false, 1), Some(Verbosity::Verbose));
            assert_eq!(Verbosity::from_flags(false, 3), Some(Verbosity::Debug));
            assert_eq!(Verbosity::from_flags(true, 2), Some(Verbosity::Quiet));
        }

        #[test]
        fn test_is_quiet() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_quiet());
        }

        #[test]
        fn test_is_verbose() {
            assert!(!Verbosity::Quiet.is_verbose());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
        }

        #[test]
        fn test_log_directive() {
            assert_eq!(Verbosity::Normal.log_directive(), "warn");
            assert_eq!(Verbosity::Debug.log_directive(), "debug");
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_explicit_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = CliConfig::new();
            assert!(config.manifest);
            assert!(!config.fail_fast);
            assert_eq!(config.parallel_jobs, 0);
            assert_eq!(config.generator, GeneratorOptions::default());
        }

        #[test]
        fn test_builder_chain() {
            let config = CliConfig::new()
                .with_verbosity(Verbosity::Debug)
                .with_color(ColorChoice::Never)
                .with_parallel_jobs(3)
                .with_fail_fast(true)
                .with_output_dir("out")
                .with_manifest(false)
                .with_runtime_package("com.acme.ui");
            assert_eq!(config.verbosity, Verbosity::Debug);
            assert_eq!(config.color, ColorChoice::Never);
            assert_eq!(config.effective_jobs(), 3);
            assert!(config.fail_fast);
            assert_eq!(config.output_dir, PathBuf::from("out"));
            assert!(!config.manifest);
            assert_eq!(config.generator.runtime_package, "com.acme.ui");
        }

        #[test]
        fn test_partial_yaml() {
            let config = CliConfig::from_yaml(
                "output_dir: src/generated/kotlin\nruntime_package: com.acme.ui\nmanifest: false\n",
            )
            .unwrap();
            assert_eq!(config.output_dir, PathBuf::from("src/generated/kotlin"));
            assert_eq!(config.generator.runtime_package, "com.acme.ui");
            assert_eq!(config.generator.header, pagegen::config::DEFAULT_HEADER);
            assert!(!config.manifest);
            assert_eq!(config.verbosity, Verbosity::Normal);
        }

        #[test]
        fn test_empty_yaml_is_default() {
            assert_eq!(CliConfig::from_yaml("\n").unwrap(), CliConfig::default());
        }

        #[test]
        fn test_yaml_roundtrip() {
            let config = CliConfig::new().with_parallel_jobs(2);
            let parsed = CliConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
            assert_eq!(parsed, config);
        }

        #[test]
        fn test_explicit_missing_file_is_error() {
            let dir = TempDir::new().unwrap();
            let err = CliConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
            assert!(err.to_string().contains("Configuration error"));
        }

        #[test]
        fn test_load_file() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("pagegen.yaml");
            std::fs::write(&path, "fail_fast: true\ncolor: never\n").unwrap();
            let config = CliConfig::load(Some(&path)).unwrap();
            assert!(config.fail_fast);
            assert_eq!(config.color, ColorChoice::Never);
        }
    }
}
