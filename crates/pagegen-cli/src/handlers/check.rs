//! Check command handler

use super::{load_inputs, page_label, reporter_for};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::CheckArgs;
use std::time::Instant;

/// Execute the check command: validate every page, write nothing.
///
/// Returns the number of valid pages.
pub fn execute_check(config: &CliConfig, args: &CheckArgs) -> CliResult<usize> {
    let reporter = reporter_for(config);
    let started = Instant::now();

    let loaded = load_inputs(&args.inputs, config.fail_fast, &reporter);
    let mut failed = loaded.failed_files;
    let mut total = loaded.failed_files;

    for sourced in &loaded.pages {
        total += 1;
        let label = page_label(&sourced.source, &sourced.page.name);
        match pagegen::validate(&sourced.page) {
            Ok(declaration) => {
                reporter.success(&format!(
                    "{label} ({} entries)",
                    declaration.entries().len()
                ));
            }
            Err(e) => {
                reporter.failure(&format!("{label}: {e}"));
                failed += 1;
                if config.fail_fast {
                    break;
                }
            }
        }
    }
    reporter.summary("page(s)", total - failed, failed, started.elapsed());

    if failed > 0 {
        return Err(CliError::Generation { failed, total });
    }
    Ok(total)
}
