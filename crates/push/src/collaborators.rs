//! Collaborator traits used by the push actor.
//!
//! Production implementations come from `appbits-app-files`; tests
//! substitute doubles that count calls or fail on demand.

use std::path::Path;

use appbits_app_files::{AppFiles, AppFilesError, KnownResources, ZipArchiver};
use appbits_resources::{LocalFileRecord, RemoteFileDescriptor, UploadFileDescriptor};

/// Archive detection, extraction and packaging.
pub trait Zipper {
    /// Reports whether `path` is a zip archive, judged by content.
    fn is_zip_file(&self, path: &Path) -> bool;

    /// Extracts `source` into the existing directory `dest`.
    fn unzip(&self, source: &Path, dest: &Path) -> Result<(), AppFilesError>;

    /// Writes `files` (relative to `root`) into a new archive at `dest`.
    fn zip(
        &self,
        root: &Path,
        files: &[UploadFileDescriptor],
        dest: &Path,
    ) -> Result<(), AppFilesError>;
}

/// Ignore-aware listing of an app directory.
pub trait AppFileWalker {
    fn app_files_in_dir(&self, root: &Path) -> Result<Vec<LocalFileRecord>, AppFilesError>;
}

/// Lookup of files the server already holds.
pub trait ResourceMatcher {
    /// Returns the subset of `files` the server already stores.
    fn resources_already_present(
        &self,
        files: &[LocalFileRecord],
    ) -> Result<Vec<RemoteFileDescriptor>, AppFilesError>;
}

impl Zipper for ZipArchiver {
    fn is_zip_file(&self, path: &Path) -> bool {
        ZipArchiver::is_zip_file(self, path)
    }

    fn unzip(&self, source: &Path, dest: &Path) -> Result<(), AppFilesError> {
        ZipArchiver::unzip(self, source, dest)
    }

    fn zip(
        &self,
        root: &Path,
        files: &[UploadFileDescriptor],
        dest: &Path,
    ) -> Result<(), AppFilesError> {
        ZipArchiver::zip(self, root, files, dest)
    }
}

impl AppFileWalker for AppFiles {
    fn app_files_in_dir(&self, root: &Path) -> Result<Vec<LocalFileRecord>, AppFilesError> {
        AppFiles::app_files_in_dir(self, root)
    }
}

impl ResourceMatcher for KnownResources {
    fn resources_already_present(
        &self,
        files: &[LocalFileRecord],
    ) -> Result<Vec<RemoteFileDescriptor>, AppFilesError> {
        Ok(self.matching(files))
    }
}
