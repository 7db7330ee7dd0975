//! Verify command handler

use super::reporter_for;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::VerifyArgs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Find generated Kotlin files under `dir`, sorted.
///
/// `dir` is matched literally; glob metacharacters in it are escaped.
pub fn find_generated_files(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("**").join("*.kt");
    let pattern = pattern.to_string_lossy();
    let paths = glob::glob(&pattern)
        .map_err(|e| CliError::invalid_argument(format!("bad output path {}: {e}", dir.display())))?;

    let mut files: Vec<PathBuf> = paths.filter_map(Result::ok).filter(|p| p.is_file()).collect();
    files.sort();
    debug!(dir = %dir.display(), files = files.len(), "found generated files");
    Ok(files)
}

/// Execute the verify command, returning the number of files checked.
pub fn execute_verify(config: &CliConfig, args: &VerifyArgs) -> CliResult<usize> {
    let dir = args.dir.as_deref().unwrap_or(&config.output_dir);
    if !dir.is_dir() {
        return Err(CliError::invalid_argument(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let reporter = reporter_for(config);
    let started = Instant::now();
    let files = find_generated_files(dir)?;
    if files.is_empty() {
        reporter.warning(&format!("no generated files under {}", dir.display()));
        return Ok(0);
    }

    let mut failed = 0;
    for file in &files {
        match pagegen::verify(file) {
            Ok(()) => reporter.success(&file.display().to_string()),
            Err(e) => {
                reporter.failure(&format!("{e}\n  regenerate it with `pagegen generate`"));
                failed += 1;
                if config.fail_fast {
                    break;
                }
            }
        }
    }
    reporter.summary("file(s)", files.len() - failed, failed, started.elapsed());

    if failed > 0 {
        return Err(CliError::Verification {
            failed,
            total: files.len(),
        });
    }
    Ok(files.len())
}
