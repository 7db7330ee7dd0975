//! Output writing and manifest verification.
//!
//! # Purpose
//!
//! Generated Kotlin files are owned by the generator. Each one gets a
//! sidecar `<ClassName>.kt.manifest.json` recording the blake3 hash of its
//! contents, so hand edits are caught by [`verify`].
//!
//! # Workflow
//!
//! 1. Generate → write `.kt` atomically + `.kt.manifest.json`
//! 2. Verify → hash the `.kt` file and compare with the manifest
//! 3. Mismatch → error telling the user to regenerate

use crate::error::{PageGenError, Result};
use crate::generator::GeneratedFile;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Tool name recorded in manifests.
pub const TOOL_NAME: &str = "pagegen";

/// Provenance of a generated file.
///
/// The timestamp lives here and never in the generated source, so output
/// stays byte-identical across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Generator name
    pub tool: String,
    /// Generator version
    pub version: String,
    /// Declaration the file was generated from
    pub declaration: String,
    /// Blake3 hash of the descriptor
    pub input_hash: String,
    /// RFC 3339 generation time
    pub timestamp: String,
    /// Command that regenerates the file
    pub regenerate_cmd: String,
}

impl GenerationMetadata {
    /// Metadata for `file`, stamped with the current time.
    #[must_use]
    pub fn for_file(file: &GeneratedFile, regenerate_cmd: impl Into<String>) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            declaration: file.declaration.clone(),
            input_hash: file.input_hash.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            regenerate_cmd: regenerate_cmd.into(),
        }
    }
}

/// Manifest for a generated file.
///
/// Stored alongside generated files as `<filename>.manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileManifest {
    /// Version of manifest format
    pub manifest_version: u32,
    /// File name of the generated file
    pub output_path: String,
    /// Blake3 hash of generated file contents
    pub output_hash: String,
    /// Generation metadata
    pub generation: GenerationMetadata,
}

impl FileManifest {
    /// Current manifest format version.
    pub const VERSION: u32 = 1;

    /// Create a new manifest.
    #[must_use]
    pub fn new(
        output_path: impl Into<String>,
        output_hash: impl Into<String>,
        generation: GenerationMetadata,
    ) -> Self {
        Self {
            manifest_version: Self::VERSION,
            output_path: output_path.into(),
            output_hash: output_hash.into(),
            generation,
        }
    }

    /// Get the manifest file path for a generated file.
    #[must_use]
    pub fn manifest_path(generated_path: &Path) -> PathBuf {
        let mut filename = generated_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        filename.push_str(".manifest.json");
        generated_path.with_file_name(filename)
    }

    /// Read manifest from file.
    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&json)?;
        Ok(manifest)
    }
}

/// Compute Blake3 hash of file contents.
#[must_use]
pub fn hash_file_contents(contents: &str) -> String {
    blake3::hash(contents.as_bytes()).to_hex().to_string()
}

/// Write `contents` so readers never observe a partial file.
///
/// The bytes go to a temporary file in the target directory, which is then
/// renamed over `path`. Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    stage(path, contents)?.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write `contents` to a synced temporary file next to `path`.
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Verify a generated file matches its manifest.
///
/// Fails if:
/// - Manifest file doesn't exist or cannot be parsed
/// - Hash mismatch (file was modified)
pub fn verify(generated_path: &Path) -> Result<()> {
    let manifest_path = FileManifest::manifest_path(generated_path);

    let manifest = FileManifest::read(&manifest_path).map_err(|e| PageGenError::ManifestError {
        path: generated_path.display().to_string(),
        reason: format!("cannot read manifest at {}: {e}", manifest_path.display()),
    })?;

    let contents = std::fs::read_to_string(generated_path)?;
    let actual_hash = hash_file_contents(&contents);

    if actual_hash != manifest.output_hash {
        return Err(PageGenError::HashMismatch {
            path: generated_path.display().to_string(),
            expected: manifest.output_hash,
            actual: actual_hash,
        });
    }

    debug!(path = %generated_path.display(), "manifest verified");
    Ok(())
}

/// Write generated Kotlin with manifest.
///
/// Both files are staged before either is moved into place. If the manifest
/// cannot be placed, the freshly written `.kt` file is removed again so no
/// file is left without its manifest.
pub fn write_with_manifest(path: &Path, contents: &str, metadata: GenerationMetadata) -> Result<()> {
    let manifest = FileManifest::new(
        path.file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
        hash_file_contents(contents),
        metadata,
    );
    let manifest_path = FileManifest::manifest_path(path);
    let manifest_json = serde_json::to_string_pretty(&manifest)?;

    let staged_source = stage(path, contents.as_bytes())?;
    let staged_manifest = stage(&manifest_path, manifest_json.as_bytes())?;

    staged_source.persist(path).map_err(|e| e.error)?;
    if let Err(e) = staged_manifest.persist(&manifest_path) {
        if let Err(cleanup) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "could not remove unmanifested file");
        }
        return Err(e.error.into());
    }
    Ok(())
}

/// Remove the manifest next to `path`, if there is one.
pub fn remove_manifest(path: &Path) -> Result<()> {
    match std::fs::remove_file(FileManifest::manifest_path(path)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Write a generated file under `root`, returning the path written.
///
/// With `regenerate_cmd` set, a manifest is written next to the file;
/// without it, a manifest left by an earlier run is removed.
pub fn write_generated(
    root: &Path,
    file: &GeneratedFile,
    regenerate_cmd: Option<&str>,
) -> Result<PathBuf> {
    let path = root.join(&file.relative_path);
    match regenerate_cmd {
        Some(cmd) => {
            write_with_manifest(&path, &file.contents, GenerationMetadata::for_file(file, cmd))?;
        }
        None => {
            write_atomic(&path, file.contents.as_bytes())?;
            remove_manifest(&path)?;
        }
    }
    debug!(path = %path.display(), "wrote generated file");
    Ok(path)
}
