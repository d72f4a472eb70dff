//! Upload validation and storage housekeeping.
//!
//! The upload directory is a single-slot store: before a new file is written,
//! every existing entry is removed, so the directory only ever reflects the
//! most recent upload. Callers that serve concurrent requests must serialize
//! access to the store themselves.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{NailDxError, Result};

/// File extensions accepted for upload (lowercase)
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Check whether a filename carries an allowed image extension.
///
/// Accepts only names that contain a `.` whose final extension, lowercased,
/// is one of [`ALLOWED_EXTENSIONS`]. Pure predicate, no I/O.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Drops any path components and maps characters outside `[A-Za-z0-9._-]`
/// to `_`. Leading and trailing dots are stripped so the result can never
/// name a hidden file or traverse upward.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_matches('.').to_string()
}

/// Single-slot storage for the most recent upload.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Open (creating if necessary) the upload directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove every entry currently in the upload directory.
    ///
    /// Deletion errors propagate; a partially cleared directory is reported,
    /// not silently accepted.
    pub fn clear(&self) -> Result<()> {
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Clear the directory, then write `bytes` under the sanitized filename.
    ///
    /// Postcondition: the directory contains exactly the one new file.
    /// Returns the path the upload was saved to.
    pub fn store(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = sanitize_filename(filename);
        if name.is_empty() {
            return Err(NailDxError::EmptyFilename);
        }

        self.clear()?;

        let path = self.dir.join(name);
        fs::write(&path, bytes)?;
        debug!("Stored upload at {:?} ({} bytes)", path, bytes.len());
        Ok(path)
    }
}
