//! Upload staging and temp-file lifecycle
//!
//! Every upload is materialized to a uniquely named file under the staging
//! directory for the duration of one request. `StagedFile` removes its path
//! when dropped, so cleanup happens on every exit path without best-effort
//! logic in handlers.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use stex_common::{Error, Result};

/// Staging directory for request-scoped upload copies
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    /// Select the staging directory, probing the primary location once and
    /// falling back if it is not writable.
    ///
    /// When neither location is writable the service still starts; every
    /// staging attempt then fails with a storage error for that request.
    pub fn initialize(primary: PathBuf, fallback: PathBuf) -> Self {
        if is_writable(&primary) {
            return Self { dir: primary };
        }

        warn!(
            "Staging folder {} is not writable, falling back to {}",
            primary.display(),
            fallback.display()
        );
        if is_writable(&fallback) {
            return Self { dir: fallback };
        }

        warn!(
            "Fallback staging folder {} is not writable either; uploads will fail until fixed",
            fallback.display()
        );
        Self { dir: primary }
    }

    /// Staging directory currently in use
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write upload bytes to a unique path under the staging directory.
    ///
    /// The directory is created lazily. The returned handle owns the file
    /// exclusively; concurrent requests never share a path.
    pub fn stage(&self, bytes: &[u8], original_name: &str) -> Result<StagedFile> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::Storage(format!(
                "Cannot create staging folder {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.dir.join(format!(
            "{}_{}",
            Uuid::new_v4(),
            sanitize_filename(original_name)
        ));
        fs::write(&path, bytes).map_err(|e| {
            Error::Storage(format!("Cannot stage upload at {}: {}", path.display(), e))
        })?;

        debug!("Staged upload: {} ({} bytes)", path.display(), bytes.len());
        Ok(StagedFile { path })
    }
}

/// One request's on-disk copy of an uploaded file.
///
/// The file is removed when this handle drops.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    /// Path of the staged file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(
                "Failed to remove staged file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Probe a directory for writability by creating it and touching a file
fn is_writable(dir: &Path) -> bool {
    if fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(format!(".probe_{}", Uuid::new_v4()));
    match fs::write(&probe, b"") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

/// Keep staged filenames path-safe; anything unexpected becomes '_'
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
