//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pagegen: typed page-object accessors for Selenium-based Kotlin suites
#[derive(Parser, Debug)]
#[command(name = "pagegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, global = true)]
    pub color: Option<ColorArg>,

    /// Config file (defaults to ./pagegen.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Kotlin accessors from page descriptors
    Generate(GenerateArgs),

    /// Validate page descriptors without writing anything
    Check(CheckArgs),

    /// Verify generated files against their manifests
    Verify(VerifyArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Descriptor files (.yaml, .yml, .json)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output root for generated sources
    #[arg(short, long, env = "PAGEGEN_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Kotlin package providing the lookup delegates
    #[arg(long, value_name = "PKG")]
    pub runtime_package: Option<String>,

    /// Do not write manifests
    #[arg(long)]
    pub no_manifest: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Stop at the first page that fails
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Descriptor files (.yaml, .yml, .json)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Output root to verify (defaults to the configured output directory)
    #[arg(env = "PAGEGEN_OUTPUT_DIR")]
    pub dir: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_generate_command() {
            let cli = Cli::parse_from(["pagegen", "generate", "login.yaml", "home.json"]);
            if let Commands::Generate(args) = cli.command {
                assert_eq!(
                    args.inputs,
                    vec![PathBuf::from("login.yaml"), PathBuf::from("home.json")]
                );
                assert!(!args.no_manifest);
                assert!(args.jobs.is_none());
            } else {
                panic!("expected Generate command");
            }
        }

        #[test]
        fn test_parse_generate_options() {
            let cli = Cli::parse_from([
                "pagegen",
                "generate",
                "pages.yaml",
                "-o",
                "out",
                "--runtime-package",
                "com.acme.ui",
                "--no-manifest",
                "-j",
                "4",
                "--fail-fast",
            ]);
            if let Commands::Generate(args) = cli.command {
                assert_eq!(args.output, Some(PathBuf::from("out")));
                assert_eq!(args.runtime_package.as_deref(), Some("com.acme.ui"));
                assert!(args.no_manifest);
                assert_eq!(args.jobs, Some(4));
                assert!(args.fail_fast);
            } else {
                panic!("expected Generate command");
            }
        }

        #[test]
        fn test_generate_requires_input() {
            assert!(Cli::try_parse_from(["pagegen", "generate"]).is_err());
        }

        #[test]
        fn test_parse_check_command() {
            let cli = Cli::parse_from(["pagegen", "check", "a.yaml"]);
            assert!(matches!(cli.command, Commands::Check(_)));
        }

        #[test]
        fn test_parse_verify_command() {
            let cli = Cli::parse_from(["pagegen", "verify", "out"]);
            if let Commands::Verify(args) = cli.command {
                assert_eq!(args.dir, Some(PathBuf::from("out")));
            } else {
                panic!("expected Verify command");
            }
        }

        #[test]
        fn test_parse_config_show() {
            let cli = Cli::parse_from(["pagegen", "config", "--show"]);
            if let Commands::Config(args) = cli.command {
                assert!(args.show);
            } else {
                panic!("expected Config command");
            }
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from([
                "pagegen",
                "-vv",
                "--color",
                "never",
                "--log-json",
                "--config",
                "ci.yaml",
                "check",
                "a.yaml",
            ]);
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.color, Some(ColorArg::Never));
            assert!(cli.log_json);
            assert_eq!(cli.config, Some(PathBuf::from("ci.yaml")));
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::parse_from(["pagegen", "check", "a.yaml", "-q"]);
            assert!(cli.quiet);
        }
    }

    mod color_arg_tests {
        use super::*;
        use crate::config::ColorChoice;

        #[test]
        fn test_color_arg_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        }
    }
}
