use std::path::{Component, Path};

use crate::AppFilesError;

/// Checks that a zip entry name or record path resolves inside the app root.
///
/// `.` segments are harmless; a root, a drive prefix or any `..` segment is
/// refused, even when a later segment would climb back in.
pub fn validate_relative_path(name: &str) -> Result<(), AppFilesError> {
    let refuse = |why: &str| Err(AppFilesError::InvalidPath(format!("{why}: {name:?}")));

    if name.is_empty() {
        return refuse("entry has no name");
    }

    let mut climbs = false;
    for component in Path::new(name).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {
                return refuse("entry is rooted outside the app");
            }
            Component::ParentDir => climbs = true,
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    if climbs {
        refuse("entry climbs out of the app root")
    } else {
        Ok(())
    }
}
