//! pagegen CLI: generate typed page-object accessors
//!
//! ## Usage
//!
//! ```bash
//! pagegen generate pages/*.yaml -o src/test/kotlin   # Generate accessors
//! pagegen check pages/login.yaml                     # Validate only
//! pagegen verify src/test/kotlin                     # Detect hand edits
//! pagegen config --show                              # Effective configuration
//! ```

use clap::Parser;
use pagegen_cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    match pagegen_cli::run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
