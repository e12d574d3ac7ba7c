//! POSIX file modes as the control plane expects them.

use std::path::Path;

pub(crate) const S_IFMT: u32 = 0o170_000;
pub(crate) const S_IFDIR: u32 = 0o040_000;
pub(crate) const S_IFREG: u32 = 0o100_000;
pub(crate) const S_IFLNK: u32 = 0o120_000;

/// Reads the full mode (type and permission bits) of `path`.
///
/// Symbolic links are not followed, so a link reports `S_IFLNK`
/// rather than the mode of its target.
pub fn file_mode(path: &Path) -> std::io::Result<u32> {
    let metadata = std::fs::symlink_metadata(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(metadata.mode())
    }

    #[cfg(not(unix))]
    {
        let file_type = metadata.file_type();
        let mode = if file_type.is_symlink() {
            S_IFLNK | 0o777
        } else if file_type.is_dir() {
            S_IFDIR | 0o755
        } else if metadata.permissions().readonly() {
            S_IFREG | 0o444
        } else {
            S_IFREG | 0o644
        };
        Ok(mode)
    }
}

/// Formats a mode as zero-padded octal, e.g. `0100644`.
pub fn format_mode(mode: u32) -> String {
    format!("{mode:07o}")
}

/// Parses a mode string produced by [`format_mode`].
pub fn parse_mode(mode: &str) -> Option<u32> {
    u32::from_str_radix(mode, 8).ok()
}

pub(crate) fn is_symlink_mode(mode: u32) -> bool {
    mode & S_IFMT == S_IFLNK
}

pub(crate) fn is_dir_mode(mode: u32) -> bool {
    mode & S_IFMT == S_IFDIR
}
