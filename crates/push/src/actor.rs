//! Gathers an app's files for upload.
//!
//! `PushActor` decides which local files must be uploaded and which the
//! server already holds. It owns no state; every call works on the paths
//! it is given and the collaborators it was built with.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use appbits_app_files::{file_mode, format_mode, validate_relative_path};
use appbits_resources::{LocalFileRecord, RemoteFileDescriptor, UploadFileDescriptor};
use tracing::{debug, info};

use crate::collaborators::{AppFileWalker, ResourceMatcher, Zipper};
use crate::error::PushError;
use crate::types::GatheredFiles;

pub struct PushActor<'a> {
    zipper: &'a dyn Zipper,
    walker: &'a dyn AppFileWalker,
    matcher: &'a dyn ResourceMatcher,
}

impl<'a> PushActor<'a> {
    pub fn new(
        zipper: &'a dyn Zipper,
        walker: &'a dyn AppFileWalker,
        matcher: &'a dyn ResourceMatcher,
    ) -> Self {
        Self {
            zipper,
            walker,
            matcher,
        }
    }

    /// Gathers the files of the app at `source` for upload.
    ///
    /// A zip archive is extracted into `scratch_dir`, which the caller
    /// must create and must not share with another running gather. A
    /// directory is walked in place. Files the server already holds are
    /// returned in `present`; everything else in `upload`. Both lists
    /// carry their on-disk modes.
    pub fn gather_files(&self, source: &Path, scratch_dir: &Path) -> Result<GatheredFiles, PushError> {
        let root = self.working_root(source, scratch_dir)?;

        let local = self
            .walker
            .app_files_in_dir(&root)
            .map_err(PushError::Walk)?;

        if local.is_empty() {
            info!(root = %root.display(), "no eligible files, nothing to upload");
            return Ok(GatheredFiles::empty(root));
        }

        let remote = self
            .matcher
            .resources_already_present(&local)
            .map_err(PushError::RemoteLookup)?;

        let (present, upload) = split_present(local, &remote);

        let gathered = GatheredFiles {
            upload: self.populate_file_mode(&root, &upload)?,
            present: self.populate_file_mode(&root, &present)?,
            root,
        };

        info!(
            root = %gathered.root.display(),
            upload = gathered.upload.len(),
            present = gathered.present.len(),
            upload_bytes = gathered.upload_size(),
            "app files gathered"
        );
        Ok(gathered)
    }

    /// Annotates `files` with their mode under `root`.
    ///
    /// Output order matches input order. Symlinks report their own mode.
    /// The first file that cannot be inspected aborts the whole call.
    pub fn populate_file_mode(
        &self,
        root: &Path,
        files: &[LocalFileRecord],
    ) -> Result<Vec<UploadFileDescriptor>, PushError> {
        files
            .iter()
            .map(|file| {
                let mode = resolve_mode(root, &file.path).map_err(|source| PushError::FileMode {
                    path: file.path.clone(),
                    source,
                })?;
                Ok(UploadFileDescriptor::from_record(file, format_mode(mode)))
            })
            .collect()
    }

    /// Packages the upload set of `gathered` into a zip at `dest`.
    ///
    /// Returns `None` without touching `dest` when there is nothing to
    /// upload.
    pub fn build_upload_archive(
        &self,
        gathered: &GatheredFiles,
        dest: &Path,
    ) -> Result<Option<PathBuf>, PushError> {
        if !gathered.has_files_to_upload() {
            debug!("upload set empty, skipping archive");
            return Ok(None);
        }

        self.zipper
            .zip(&gathered.root, &gathered.upload, dest)
            .map_err(PushError::Archive)?;

        debug!(dest = %dest.display(), files = gathered.upload.len(), "upload archive built");
        Ok(Some(dest.to_path_buf()))
    }

    fn working_root(&self, source: &Path, scratch_dir: &Path) -> Result<PathBuf, PushError> {
        if self.zipper.is_zip_file(source) {
            debug!(
                source = %source.display(),
                scratch = %scratch_dir.display(),
                "extracting app archive"
            );
            self.zipper
                .unzip(source, scratch_dir)
                .map_err(PushError::Extraction)?;
            Ok(scratch_dir.to_path_buf())
        } else {
            Ok(source.to_path_buf())
        }
    }
}

fn resolve_mode(root: &Path, relative: &str) -> std::io::Result<u32> {
    validate_relative_path(relative)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    file_mode(&root.join(relative))
}

/// Splits `local` into files the server holds and files to upload.
///
/// When both sides carry a digest they are compared by digest; otherwise
/// by path. Input order is kept in both halves.
fn split_present(
    local: Vec<LocalFileRecord>,
    remote: &[RemoteFileDescriptor],
) -> (Vec<LocalFileRecord>, Vec<LocalFileRecord>) {
    let digests: HashSet<&str> = remote
        .iter()
        .filter(|r| r.has_digest())
        .map(|r| r.digest.as_str())
        .collect();
    let all_paths: HashSet<&str> = remote.iter().map(|r| r.path.as_str()).collect();
    let undigested_paths: HashSet<&str> = remote
        .iter()
        .filter(|r| !r.has_digest())
        .map(|r| r.path.as_str())
        .collect();

    local.into_iter().partition(|file| {
        if file.has_digest() {
            digests.contains(file.digest.as_str()) || undigested_paths.contains(file.path.as_str())
        } else {
            all_paths.contains(file.path.as_str())
        }
    })
}
