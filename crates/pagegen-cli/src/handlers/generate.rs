//! Generate command handler

use super::{load_inputs, page_label, reporter_for, SourcedPage};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::GenerateArgs;
use pagegen::manifest::write_generated;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Apply `generate` flags over the loaded configuration.
#[must_use]
pub fn apply_args(mut config: CliConfig, args: &GenerateArgs) -> CliConfig {
    if let Some(ref output) = args.output {
        config = config.with_output_dir(output.clone());
    }
    if let Some(ref package) = args.runtime_package {
        config = config.with_runtime_package(package.clone());
    }
    if let Some(jobs) = args.jobs {
        config = config.with_parallel_jobs(jobs);
    }
    if args.no_manifest {
        config = config.with_manifest(false);
    }
    if args.fail_fast {
        config = config.with_fail_fast(true);
    }
    config
}

/// Command recorded in manifests to regenerate a file.
#[must_use]
pub fn regenerate_command(source: &Path, output_dir: &Path) -> String {
    format!(
        "pagegen generate {} -o {}",
        source.display(),
        output_dir.display()
    )
}

/// Execute the generate command, returning the paths written.
///
/// Every page is validated and emitted; files are written in input order.
/// A page whose output path was already claimed by an earlier page fails
/// instead of overwriting it. With fail-fast, writing stops at the first
/// page that failed.
pub fn execute_generate(config: &CliConfig, args: &GenerateArgs) -> CliResult<Vec<PathBuf>> {
    let config = apply_args(config.clone(), args);
    let mut reporter = reporter_for(&config);
    let started = Instant::now();

    let loaded = load_inputs(&args.inputs, config.fail_fast, &reporter);
    if config.fail_fast && loaded.failed_files > 0 {
        return Err(CliError::Generation {
            failed: loaded.failed_files,
            total: loaded.failed_files + loaded.pages.len(),
        });
    }

    let descriptors: Vec<_> = loaded.pages.iter().map(|p| p.page.clone()).collect();
    let results = pagegen::generate_all(&descriptors, &config.generator, config.parallel_jobs);

    reporter.start_progress(results.len() as u64, "Writing");
    let mut written = Vec::new();
    let mut failed = loaded.failed_files;
    let mut total = loaded.failed_files;
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();

    for (SourcedPage { source, page }, result) in loaded.pages.iter().zip(results) {
        total += 1;
        let label = page_label(source, &page.name);
        let outcome = result.map_err(CliError::from).and_then(|file| {
            if let Some(first) = claimed.get(&file.relative_path) {
                return Err(CliError::OutputCollision {
                    path: file.relative_path.display().to_string(),
                    first: first.clone(),
                });
            }
            claimed.insert(file.relative_path.clone(), label.clone());

            let cmd = config
                .manifest
                .then(|| regenerate_command(source, &config.output_dir));
            let path = write_generated(&config.output_dir, &file, cmd.as_deref())?;
            if config.verbosity.is_verbose() {
                reporter.info(&format!(
                    "{}.{}: {} bytes, input {}",
                    file.package,
                    file.class_name,
                    file.contents.len(),
                    &file.input_hash[..file.input_hash.len().min(12)]
                ));
            }
            Ok(path)
        });
        reporter.increment(1);

        match outcome {
            Ok(path) => {
                reporter.success(&format!("{label} → {}", path.display()));
                written.push(path);
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
    reporter.finish();
    reporter.summary("page(s)", total - failed, failed, started.elapsed());

    info!(
        written = written.len(),
        failed,
        output = %config.output_dir.display(),
        "generation finished"
    );

    if failed > 0 {
        return Err(CliError::Generation { failed, total });
    }
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LOGIN: &str = "\
name: Login
package: com.example
entries:
  - name: username
  - name: password
    locators:
      - id: pass
";

    fn args(inputs: Vec<PathBuf>, output: &Path) -> GenerateArgs {
        GenerateArgs {
            inputs,
            output: Some(output.to_path_buf()),
            runtime_package: None,
            no_manifest: false,
            jobs: Some(1),
            fail_fast: false,
        }
    }

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(crate::Verbosity::Quiet)
    }

    #[test]
    fn test_apply_args_overrides_config() {
        let mut a = args(vec![], Path::new("out"));
        a.runtime_package = Some("com.acme.ui".to_string());
        a.no_manifest = true;
        a.fail_fast = true;
        let config = apply_args(CliConfig::new().with_output_dir("elsewhere"), &a);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.generator.runtime_package, "com.acme.ui");
        assert_eq!(config.parallel_jobs, 1);
        assert!(!config.manifest);
        assert!(config.fail_fast);
    }

    #[test]
    fn test_apply_args_keeps_config_when_unset() {
        let a = GenerateArgs {
            inputs: vec![],
            output: None,
            runtime_package: None,
            no_manifest: false,
            jobs: None,
            fail_fast: false,
        };
        let base = CliConfig::new().with_output_dir("from-file").with_parallel_jobs(7);
        assert_eq!(apply_args(base.clone(), &a), base);
    }

    #[test]
    fn test_generate_writes_kotlin_and_manifest() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("login.yaml");
        std::fs::write(&input, LOGIN).unwrap();
        let out = dir.path().join("out");

        let written = execute_generate(&quiet(), &args(vec![input], &out)).unwrap();
        let expected = out.join("com/example/generated/Login.kt");
        assert_eq!(written, vec![expected.clone()]);
        assert!(std::fs::read_to_string(&expected)
            .unwrap()
            .contains("public class Login {"));
        pagegen::verify(&expected).unwrap();
    }

    #[test]
    fn test_generate_reports_invalid_page() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("pages.yaml");
        std::fs::write(
            &input,
            "- name: Good\n  entries: [{ name: a }]\n- name: Bad\n  entries: []\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let err = execute_generate(&quiet(), &args(vec![input], &out)).unwrap_err();
        assert!(matches!(err, CliError::Generation { failed: 1, total: 2 }));
        assert!(out.join("generated/Good.kt").exists());
        assert!(!out.join("generated/Bad.kt").exists());
    }

    #[test]
    fn test_generate_rejects_shared_output_path() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("forms.yaml");
        std::fs::write(
            &input,
            "\
- name: LoginA
  class_name: Form
  entries: [{ name: first }]
- name: LoginB
  class_name: Form
  entries: [{ name: second }]
",
        )
        .unwrap();
        let out = dir.path().join("out");

        let err = execute_generate(&quiet(), &args(vec![input], &out)).unwrap_err();
        assert!(matches!(err, CliError::Generation { failed: 1, total: 2 }));

        let source = std::fs::read_to_string(out.join("generated/Form.kt")).unwrap();
        assert!(source.contains("val first"));
        assert!(!source.contains("val second"));
        pagegen::verify(&out.join("generated/Form.kt")).unwrap();
    }

    #[test]
    fn test_verbose_generate_succeeds() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("login.yaml");
        std::fs::write(&input, LOGIN).unwrap();
        let out = dir.path().join("out");
        let config = CliConfig::new()
            .with_verbosity(crate::Verbosity::Verbose)
            .with_color(crate::ColorChoice::Never);

        let written = execute_generate(&config, &args(vec![input], &out)).unwrap();
        assert_eq!(written.len(), 1);
    }

    #[test]
    fn test_no_manifest_removes_stale_manifest() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("login.yaml");
        std::fs::write(&input, LOGIN).unwrap();
        let out = dir.path().join("out");

        let first = execute_generate(&quiet(), &args(vec![input.clone()], &out)).unwrap();
        assert!(pagegen::FileManifest::manifest_path(&first[0]).exists());

        let mut a = args(vec![input], &out);
        a.no_manifest = true;
        let second = execute_generate(&quiet(), &a).unwrap();
        assert_eq!(first, second);
        assert!(!pagegen::FileManifest::manifest_path(&second[0]).exists());
    }

    #[test]
    fn test_no_manifest() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("login.yaml");
        std::fs::write(&input, LOGIN).unwrap();
        let out = dir.path().join("out");
        let mut a = args(vec![input], &out);
        a.no_manifest = true;

        let written = execute_generate(&quiet(), &a).unwrap();
        assert!(!pagegen::FileManifest::manifest_path(&written[0]).exists());
    }

    #[test]
    fn test_regenerate_command() {
        assert_eq!(
            regenerate_command(Path::new("pages/login.yaml"), Path::new("out")),
            "pagegen generate pages/login.yaml -o out"
        );
    }
}
