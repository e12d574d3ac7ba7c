use serde::{Deserialize, Serialize};

/// A file discovered under the app root.
///
/// `path` is relative to the root and always uses `/` as separator.
/// The walker fills `digest` (SHA-1 hex) and `size`; callers that only
/// know the path leave them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalFileRecord {
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub digest: String,
    #[serde(default)]
    pub size: i64,
}

impl LocalFileRecord {
    /// Creates a record that only carries a relative path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            digest: String::new(),
            size: 0,
        }
    }

    /// Creates a fully fingerprinted record.
    pub fn with_digest(path: impl Into<String>, digest: impl Into<String>, size: i64) -> Self {
        Self {
            path: path.into(),
            digest: digest.into(),
            size,
        }
    }

    pub fn has_digest(&self) -> bool {
        !self.digest.is_empty()
    }
}

/// A file the server already stores from an earlier upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileDescriptor {
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub digest: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl RemoteFileDescriptor {
    pub fn has_digest(&self) -> bool {
        !self.digest.is_empty()
    }
}

/// A file handed to the uploader, annotated with its on-disk mode.
///
/// `mode` is the full POSIX mode (type and permission bits) as a
/// zero-padded octal string, e.g. `0100644`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileDescriptor {
    pub path: String,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl UploadFileDescriptor {
    /// Builds a descriptor for `record` with the given mode string.
    ///
    /// Digest and size are carried over only when the record has them.
    pub fn from_record(record: &LocalFileRecord, mode: String) -> Self {
        let (digest, size) = if record.has_digest() {
            (Some(record.digest.clone()), Some(record.size))
        } else {
            (None, None)
        };
        Self {
            path: record.path.clone(),
            mode,
            digest,
            size,
        }
    }
}
