//! Fingerprints the server is known to hold.
//!
//! Loaded from a JSON array of resources as returned by the
//! resource-match endpoint. Matching is content addressed: a local file
//! is present when its digest (and size) is known, whatever its path.

use std::collections::HashMap;
use std::path::Path;

use appbits_resources::{AppFileResource, LocalFileRecord, RemoteFileDescriptor};
use tracing::debug;

use crate::AppFilesError;

#[derive(Debug, Clone, Default)]
pub struct KnownResources {
    by_digest: HashMap<String, AppFileResource>,
}

impl KnownResources {
    pub fn new(resources: impl IntoIterator<Item = AppFileResource>) -> Self {
        let by_digest = resources
            .into_iter()
            .filter(|r| !r.sha1.is_empty())
            .map(|r| (r.sha1.clone(), r))
            .collect();
        Self { by_digest }
    }

    /// Reads a JSON array of resources from `path`.
    pub fn load(path: &Path) -> Result<Self, AppFilesError> {
        let content = std::fs::read_to_string(path)?;
        let resources: Vec<AppFileResource> = serde_json::from_str(&content)?;
        debug!(path = %path.display(), resources = resources.len(), "known resources loaded");
        Ok(Self::new(resources))
    }

    pub fn len(&self) -> usize {
        self.by_digest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_digest.is_empty()
    }

    /// Returns the subset of `files` whose content is already known.
    ///
    /// Results are echoed in the caller's path space, in input order.
    pub fn matching(&self, files: &[LocalFileRecord]) -> Vec<RemoteFileDescriptor> {
        files
            .iter()
            .filter_map(|file| {
                let known = self.by_digest.get(&file.digest)?;
                (known.size == file.size).then(|| RemoteFileDescriptor {
                    path: file.path.clone(),
                    digest: file.digest.clone(),
                    size: file.size,
                    mode: (!known.mode.is_empty()).then(|| known.mode.clone()),
                })
            })
            .collect()
    }
}
