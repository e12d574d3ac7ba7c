//! Zip detection, extraction and packaging.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use appbits_resources::UploadFileDescriptor;
use tracing::{debug, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::AppFilesError;
use crate::mode::{S_IFREG, is_dir_mode, is_symlink_mode, parse_mode};
use crate::validation::validate_relative_path;

/// Reads and writes app archives with the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }

    /// Reports whether `path` is a readable zip archive.
    ///
    /// Decided by parsing the central directory, not by extension.
    pub fn is_zip_file(&self, path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }
        match File::open(path) {
            Ok(file) => ZipArchive::new(file).is_ok(),
            Err(_) => false,
        }
    }

    /// Extracts `source` into `dest`.
    ///
    /// Entry names are validated before anything is written, unix modes
    /// are restored, and symlinks are created after all regular files so
    /// no entry is written through a link.
    pub fn unzip(&self, source: &Path, dest: &Path) -> Result<(), AppFilesError> {
        let mut archive = ZipArchive::new(File::open(source)?)?;

        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            validate_relative_path(entry.name())?;
        }

        let mut links: Vec<(PathBuf, String)> = Vec::new();
        let mut extracted = 0usize;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let out_path = dest.join(entry.name());
            let mode = entry.unix_mode();

            if entry.is_dir() || mode.is_some_and(is_dir_mode) {
                std::fs::create_dir_all(&out_path)?;
                continue;
            }

            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            if mode.is_some_and(is_symlink_mode) {
                let mut target = String::new();
                entry.read_to_string(&mut target)?;
                links.push((out_path, target));
                continue;
            }

            let mut out = File::create(&out_path)?;
            std::io::copy(&mut entry, &mut out)?;
            drop(out);
            extracted += 1;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = mode.map_or(0, |m| m & 0o7777);
                if perms != 0 {
                    std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(perms))?;
                }
            }
        }

        for (path, target) in &links {
            create_symlink(target, path)?;
        }

        debug!(
            source = %source.display(),
            dest = %dest.display(),
            files = extracted,
            links = links.len(),
            "archive extracted"
        );
        Ok(())
    }

    /// Packages `files` (relative to `root`) into a new zip at `dest`.
    ///
    /// Each entry records the permission bits from its descriptor.
    /// Symlinks are stored as links holding their target text, never the
    /// contents they point at.
    pub fn zip(
        &self,
        root: &Path,
        files: &[UploadFileDescriptor],
        dest: &Path,
    ) -> Result<(), AppFilesError> {
        if files.is_empty() {
            return Err(AppFilesError::EmptyDir(root.display().to_string()));
        }

        let mut writer = ZipWriter::new(File::create(dest)?);

        for file in files {
            validate_relative_path(&file.path)?;

            let mode = parse_mode(&file.mode).unwrap_or_else(|| {
                warn!(path = %file.path, mode = %file.mode, "unparseable mode, using default");
                S_IFREG | 0o644
            });
            let options = FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(mode & 0o777);

            if is_symlink_mode(mode) {
                let target = std::fs::read_link(root.join(&file.path))?;
                writer.add_symlink(
                    file.path.as_str(),
                    target.to_string_lossy().into_owned(),
                    options,
                )?;
                continue;
            }

            writer.start_file(file.path.as_str(), options)?;
            let mut source = File::open(root.join(&file.path))?;
            std::io::copy(&mut source, &mut writer)?;
        }

        let mut out = writer.finish()?;
        out.flush()?;

        debug!(dest = %dest.display(), files = files.len(), "archive written");
        Ok(())
    }
}

#[cfg(unix)]
fn create_symlink(target: &str, path: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, path)
}

#[cfg(not(unix))]
fn create_symlink(target: &str, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_zip(path: &Path, entries: &[(&str, &[u8], u32)]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, data, perms) in entries {
            let options = FileOptions::default().unix_permissions(*perms);
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    fn desc(path: &str, mode: &str) -> UploadFileDescriptor {
        UploadFileDescriptor {
            path: path.into(),
            mode: mode.into(),
            digest: None,
            size: None,
        }
    }

    #[test]
    fn detects_zip_by_content() {
        let dir = TempDir::new().unwrap();
        let zip_path = dir.path().join("app.bin");
        write_zip(&zip_path, &[("app.rb", b"x", 0o644)]);

        let fake = dir.path().join("fake.zip");
        std::fs::write(&fake, b"not a zip at all").unwrap();

        let zipper = ZipArchiver::new();
        assert!(zipper.is_zip_file(&zip_path));
        assert!(!zipper.is_zip_file(&fake));
        assert!(!zipper.is_zip_file(dir.path()));
        assert!(!zipper.is_zip_file(&dir.path().join("missing.zip")));
    }

    #[test]
    fn unzip_extracts_nested_files() {
        let dir = TempDir::new().unwrap();
        let zip_path = dir.path().join("app.zip");
        write_zip(
            &zip_path,
            &[
                ("example-app/app.rb", b"puts 1", 0o644),
                ("example-app/lib/util.rb", b"module Util; end", 0o644),
            ],
        );

        let dest = TempDir::new().unwrap();
        ZipArchiver::new().unzip(&zip_path, dest.path()).unwrap();

        let content = std::fs::read_to_string(dest.path().join("example-app/lib/util.rb")).unwrap();
        assert_eq!(content, "module Util; end");
        assert!(dest.path().join("example-app/app.rb").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn unzip_restores_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let zip_path = dir.path().join("app.zip");
        write_zip(&zip_path, &[("bin/start", b"#!/bin/sh", 0o755)]);

        let dest = TempDir::new().unwrap();
        ZipArchiver::new().unzip(&zip_path, dest.path()).unwrap();

        let mode = std::fs::metadata(dest.path().join("bin/start"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn unzip_rejects_traversal_before_writing() {
        let dir = TempDir::new().unwrap();
        let zip_path = dir.path().join("evil.zip");
        write_zip(
            &zip_path,
            &[("good.txt", b"ok", 0o644), ("../escape.txt", b"bad", 0o644)],
        );

        let dest = TempDir::new().unwrap();
        let result = ZipArchiver::new().unzip(&zip_path, dest.path());
        assert!(matches!(result, Err(AppFilesError::InvalidPath(_))));
        assert!(!dest.path().join("good.txt").exists());
    }

    #[test]
    fn unzip_corrupt_archive_fails() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.zip");
        std::fs::write(&bad, b"PK\x03\x04garbage").unwrap();

        let dest = TempDir::new().unwrap();
        assert!(ZipArchiver::new().unzip(&bad, dest.path()).is_err());
    }

    #[test]
    fn zip_packages_selected_files() {
        let src = TempDir::new().unwrap();
        std::fs::write(src.path().join("app.rb"), b"puts 1").unwrap();
        std::fs::write(src.path().join("skip.rb"), b"nope").unwrap();

        let out = TempDir::new().unwrap();
        let dest = out.path().join("upload.zip");
        let files = vec![desc("app.rb", "0100755")];
        ZipArchiver::new().zip(src.path(), &files, &dest).unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
        let entry = archive.by_index(0).unwrap();
        assert_eq!(entry.name(), "app.rb");
        assert_eq!(entry.unix_mode().map(|m| m & 0o777), Some(0o755));
    }

    #[test]
    fn zip_with_no_files_is_empty_dir_error() {
        let src = TempDir::new().unwrap();
        let dest = src.path().join("upload.zip");
        let result = ZipArchiver::new().zip(src.path(), &[], &dest);
        assert!(matches!(result, Err(AppFilesError::EmptyDir(_))));
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_survives_zip_and_unzip() {
        use crate::mode::{file_mode, format_mode};

        let src = TempDir::new().unwrap();
        std::fs::create_dir(src.path().join("real")).unwrap();
        std::fs::write(src.path().join("real/file"), b"data").unwrap();
        std::os::unix::fs::symlink("real", src.path().join("alias")).unwrap();

        let out = TempDir::new().unwrap();
        let dest = out.path().join("upload.zip");
        let files = vec![desc("alias", "0120777"), desc("real/file", "0100644")];
        ZipArchiver::new().zip(src.path(), &files, &dest).unwrap();

        {
            let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
            let mut entry = archive.by_name("alias").unwrap();
            assert_eq!(entry.unix_mode(), Some(0o120_777));
            let mut target = String::new();
            entry.read_to_string(&mut target).unwrap();
            assert_eq!(target, "real");
        }

        let extracted = TempDir::new().unwrap();
        ZipArchiver::new().unzip(&dest, extracted.path()).unwrap();

        let link = extracted.path().join("alias");
        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_link(&link).unwrap(), PathBuf::from("real"));
        assert_eq!(format_mode(file_mode(&link).unwrap()), "0120777");
        assert_eq!(std::fs::read_to_string(link.join("file")).unwrap(), "data");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_leaving_root_stores_only_its_target() {
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, b"do not upload").unwrap();

        let src = TempDir::new().unwrap();
        std::os::unix::fs::symlink(&secret, src.path().join("leak")).unwrap();

        let dest = src.path().join("upload.zip");
        ZipArchiver::new()
            .zip(src.path(), &[desc("leak", "0120777")], &dest)
            .unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut entry = archive.by_name("leak").unwrap();
        let mut stored = String::new();
        entry.read_to_string(&mut stored).unwrap();
        assert_eq!(stored, secret.to_string_lossy());
    }
}
