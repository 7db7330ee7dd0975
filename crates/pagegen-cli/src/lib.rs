//! pagegen CLI library
//!
//! Command-line front end for the pagegen accessor generator.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, ConfigArgs, GenerateArgs, VerifyArgs};
pub use config::{CliConfig, ColorChoice, Verbosity, DEFAULT_CONFIG_FILE};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;

/// Build the effective configuration: config file, then global flags.
///
/// Command-specific flags are applied by the handlers.
pub fn resolve_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(verbosity) = Verbosity::from_flags(cli.quiet, cli.verbose) {
        config = config.with_verbosity(verbosity);
    }
    if let Some(color) = cli.color {
        config = config.with_color(color.into());
    }
    Ok(config)
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> CliResult<()> {
    let config = resolve_config(&cli)?;
    logging::init(config.verbosity, cli.log_json);
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Generate(args) => handlers::execute_generate(&config, &args).map(drop),
        Commands::Check(args) => handlers::execute_check(&config, &args).map(drop),
        Commands::Verify(args) => handlers::execute_verify(&config, &args).map(drop),
        Commands::Config(args) => handlers::execute_config(&config, &args),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ci.yaml");
        std::fs::write(&path, "verbosity: debug\ncolor: always\nparallel_jobs: 2\n").unwrap();

        let cli = Cli::parse_from([
            "pagegen",
            "--config",
            path.to_str().unwrap(),
            "-q",
            "--color",
            "never",
            "config",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.parallel_jobs, 2);
    }

    #[test]
    fn test_config_file_used_without_flags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ci.yaml");
        std::fs::write(&path, "verbosity: verbose\n").unwrap();

        let cli = Cli::parse_from(["pagegen", "--config", path.to_str().unwrap(), "config"]);
        assert_eq!(resolve_config(&cli).unwrap().verbosity, Verbosity::Verbose);
    }
}
