//! End-to-end pipeline: validate, build, emit.

use crate::builder::build_class;
use crate::codegen;
use crate::config::GeneratorOptions;
use crate::declaration::PageDescriptor;
use crate::error::Result;
use crate::validate::validate;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

/// One emitted Kotlin unit, not yet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Declaration the file was generated from
    pub declaration: String,
    /// Kotlin package of the class
    pub package: String,
    /// Name of the generated class
    pub class_name: String,
    /// Path relative to the output root
    pub relative_path: PathBuf,
    /// Kotlin source text
    pub contents: String,
    /// Blake3 hash of the descriptor
    pub input_hash: String,
}

/// Run the whole pipeline for one descriptor.
///
/// Validation failures abort before any IR is built.
pub fn generate(descriptor: &PageDescriptor, options: &GeneratorOptions) -> Result<GeneratedFile> {
    let declaration = validate(descriptor)?;
    let class = build_class(&declaration, options);
    let contents = codegen::generate(&class);

    let file = GeneratedFile {
        declaration: descriptor.name.clone(),
        package: class.package.clone(),
        class_name: class.name.to_string(),
        relative_path: class.relative_path(),
        contents,
        input_hash: descriptor.input_hash()?,
    };

    info!(
        declaration = %file.declaration,
        path = %file.relative_path.display(),
        bytes = file.contents.len(),
        "generated page accessor"
    );
    Ok(file)
}

/// Run the pipeline for many descriptors.
///
/// Descriptors are independent, so they are spread across `jobs` scoped
/// threads (`0` picks the available parallelism). Results come back in
/// input order regardless of scheduling.
pub fn generate_all(
    descriptors: &[PageDescriptor],
    options: &GeneratorOptions,
    jobs: usize,
) -> Vec<Result<GeneratedFile>> {
    let workers = effective_jobs(jobs).min(descriptors.len()).max(1);
    debug!(pages = descriptors.len(), workers, "generating pages");

    if workers == 1 {
        return descriptors.iter().map(|d| generate(d, options)).collect();
    }

    let next = AtomicUsize::new(0);
    let slots: Vec<Mutex<Option<Result<GeneratedFile>>>> =
        descriptors.iter().map(|_| Mutex::new(None)).collect();

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(descriptor) = descriptors.get(index) else {
                    break;
                };
                let result = generate(descriptor, options);
                if let Ok(mut slot) = slots[index].lock() {
                    *slot = Some(result);
                }
            });
        }
    });

    slots
        .into_iter()
        .zip(descriptors)
        .map(|(slot, descriptor)| {
            slot.into_inner()
                .ok()
                .flatten()
                .unwrap_or_else(|| generate(descriptor, options))
        })
        .collect()
}

/// Resolve a configured job count, `0` meaning all available cores.
#[must_use]
pub fn effective_jobs(jobs: usize) -> usize {
    if jobs > 0 {
        return jobs;
    }
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
