//! Ignore-aware walk of an app directory.
//!
//! Produces one [`LocalFileRecord`] per eligible file with its relative
//! path normalized to forward slashes, plus its SHA-1 and size.

use std::path::Path;

use appbits_resources::LocalFileRecord;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::AppFilesError;
use crate::fingerprint::{file_digest, symlink_digest};
use crate::ignore::{CfIgnore, IgnoreConfig};

/// Lists the files of an app directory that should be considered for upload.
#[derive(Debug, Clone, Default)]
pub struct AppFiles {
    ignore: IgnoreConfig,
}

impl AppFiles {
    pub fn new(ignore: IgnoreConfig) -> Self {
        Self { ignore }
    }

    pub fn ignore_config(&self) -> &IgnoreConfig {
        &self.ignore
    }

    /// Walks `root` and returns every file not excluded by the ignore rules.
    ///
    /// Directories are never listed themselves; ignored directories are
    /// pruned. Symbolic links are listed but not followed. Entries are
    /// visited in file-name order.
    pub fn app_files_in_dir(&self, root: &Path) -> Result<Vec<LocalFileRecord>, AppFilesError> {
        if !root.is_dir() {
            return Err(AppFilesError::InvalidPath(format!(
                "not a directory: {}",
                root.display()
            )));
        }

        let rules = self.ignore.rules_for(root)?;
        let mut files = Vec::new();

        self.walk_app_files(root, &rules, |rel_path, entry| {
            let (digest, size) = if entry.file_type().is_symlink() {
                symlink_digest(entry.path())?
            } else {
                file_digest(entry.path())?
            };
            files.push(LocalFileRecord::with_digest(rel_path, digest, size));
            Ok(())
        })?;

        debug!(root = %root.display(), files = files.len(), "app files listed");
        Ok(files)
    }

    /// Calls `on_file` for each eligible file under `root`.
    fn walk_app_files<F>(&self, root: &Path, rules: &CfIgnore, mut on_file: F) -> Result<(), AppFilesError>
    where
        F: FnMut(&str, &DirEntry) -> Result<(), AppFilesError>,
    {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                match relative_path(root, entry.path()) {
                    Some(rel) => !rules.file_should_be_ignored(&rel),
                    None => true,
                }
            });

        for entry in walker {
            let entry = entry?;
            if entry.depth() == 0 || entry.file_type().is_dir() {
                continue;
            }

            let Some(rel_path) = relative_path(root, entry.path()) else {
                warn!(path = %entry.path().display(), "skipping entry outside app root");
                continue;
            };

            on_file(&rel_path, &entry)?;
        }

        Ok(())
    }
}

/// Returns `path` relative to `root` with `/` separators.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}
