//! Config command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::ConfigArgs;

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    if args.show {
        print!("{}", config.to_yaml()?);
    } else {
        print_current_config(config);
    }
    Ok(())
}

/// Print a short summary of the effective configuration
pub fn print_current_config(config: &CliConfig) {
    println!("Current configuration:");
    println!("  Output dir: {}", config.output_dir.display());
    println!("  Runtime package: {}", config.generator.runtime_package);
    println!("  Manifests: {}", if config.manifest { "on" } else { "off" });
    println!("  Parallel jobs: {}", config.effective_jobs());
    println!("  Fail fast: {}", config.fail_fast);
    println!("  Verbosity: {:?}", config.verbosity);
    println!("  Color: {:?}", config.color);
}
