use std::io::Read;
use std::path::Path;

use sha1::{Digest, Sha1};

use crate::AppFilesError;

/// Computes the SHA-1 of a file's contents.
///
/// Returns the hex-encoded digest and the number of bytes hashed.
pub fn file_digest(path: &Path) -> Result<(String, i64), AppFilesError> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha1::new();
    let mut buf = [0u8; 8192];
    let mut size: i64 = 0;
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        size += n as i64;
    }
    Ok((hex::encode(hasher.finalize()), size))
}

/// Fingerprints a symbolic link by its target text, not the target's contents.
pub fn symlink_digest(path: &Path) -> Result<(String, i64), AppFilesError> {
    let target = std::fs::read_link(path)?;
    let text = target.to_string_lossy();
    let digest = Sha1::digest(text.as_bytes());
    Ok((hex::encode(digest), text.len() as i64))
}
