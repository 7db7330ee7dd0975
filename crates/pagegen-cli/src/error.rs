//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// One or more pages failed validation or generation
    #[error("Generation failed: {failed} of {total} page(s) had errors")]
    Generation {
        /// Pages that failed
        failed: usize,
        /// Pages attempted
        total: usize,
    },

    /// One or more generated files failed verification
    #[error("Verification failed: {failed} of {total} file(s) do not match their manifest")]
    Verification {
        /// Files that failed
        failed: usize,
        /// Files checked
        total: usize,
    },

    /// Two pages resolve to the same output file
    #[error("Output {path} is already generated by {first}")]
    OutputCollision {
        /// Output path relative to the output directory
        path: String,
        /// Page that claimed the path first
        first: String,
    },

    /// pagegen library error
    #[error("{0}")]
    PageGen(#[from] pagegen::PageGenError),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_generation_error() {
        let err = CliError::Generation { failed: 1, total: 3 };
        assert_eq!(err.to_string(), "Generation failed: 1 of 3 page(s) had errors");
    }

    #[test]
    fn test_output_collision_names_first_page() {
        let err = CliError::OutputCollision {
            path: "generated/Form.kt".to_string(),
            first: "a.yaml:LoginA".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Output generated/Form.kt is already generated by a.yaml:LoginA"
        );
    }

    #[test]
    fn test_library_error_passes_message_through() {
        let err: CliError = pagegen::PageGenError::EmptyEnum {
            declaration: "Login".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "At least one entry shall be defined in \"Login\""
        );
    }
}
