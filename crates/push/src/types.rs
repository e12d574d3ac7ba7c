//! Data types for the gather flow.

use std::path::PathBuf;

use appbits_resources::{AppFileResource, UploadFileDescriptor};
use serde::Serialize;

/// Result of gathering an app for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatheredFiles {
    /// Files the server does not have yet, in walk order.
    pub upload: Vec<UploadFileDescriptor>,
    /// Files the server already holds, in walk order and local path space.
    pub present: Vec<UploadFileDescriptor>,
    /// Directory the relative paths resolve against.
    pub root: PathBuf,
}

impl GatheredFiles {
    pub(crate) fn empty(root: PathBuf) -> Self {
        Self {
            upload: Vec::new(),
            present: Vec::new(),
            root,
        }
    }

    pub fn has_files_to_upload(&self) -> bool {
        !self.upload.is_empty()
    }

    /// Sum of known upload sizes in bytes.
    pub fn upload_size(&self) -> i64 {
        self.upload.iter().filter_map(|f| f.size).sum()
    }

    /// The matched-resources list sent alongside the upload archive.
    pub fn present_resources(&self) -> Vec<AppFileResource> {
        self.present.iter().map(AppFileResource::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(path: &str, size: Option<i64>) -> UploadFileDescriptor {
        UploadFileDescriptor {
            path: path.into(),
            mode: "0100644".into(),
            digest: size.map(|_| "d".to_string()),
            size,
        }
    }

    #[test]
    fn upload_size_skips_unknown_sizes() {
        let gathered = GatheredFiles {
            upload: vec![desc("a", Some(10)), desc("b", None), desc("c", Some(5))],
            present: Vec::new(),
            root: PathBuf::from("/app"),
        };
        assert!(gathered.has_files_to_upload());
        assert_eq!(gathered.upload_size(), 15);
    }

    #[test]
    fn present_resources_use_wire_shape() {
        let gathered = GatheredFiles {
            upload: Vec::new(),
            present: vec![desc("Gemfile", Some(7))],
            root: PathBuf::from("/app"),
        };
        let resources = gathered.present_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].path, "Gemfile");
        assert_eq!(resources[0].mode, "0100644");
        assert!(!gathered.has_files_to_upload());
    }
}
