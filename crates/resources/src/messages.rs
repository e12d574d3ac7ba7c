//! JSON shapes exchanged with the control plane.
//!
//! The resource-match endpoint takes and returns arrays of
//! [`AppFileResource`]; the upload request sends the matched subset
//! back as its `resources` field.

use serde::{Deserialize, Serialize};

use crate::types::{RemoteFileDescriptor, UploadFileDescriptor};

/// A file fingerprint as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppFileResource {
    #[serde(rename = "fn")]
    pub path: String,
    pub sha1: String,
    pub size: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mode: String,
}

/// Digest and size pair used by the bits endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityFields {
    pub sha1: String,
    pub size: i64,
}

impl AppFileResource {
    pub fn to_integrity_fields(&self) -> IntegrityFields {
        IntegrityFields {
            sha1: self.sha1.clone(),
            size: self.size,
        }
    }
}

impl From<&UploadFileDescriptor> for AppFileResource {
    fn from(desc: &UploadFileDescriptor) -> Self {
        Self {
            path: desc.path.clone(),
            sha1: desc.digest.clone().unwrap_or_default(),
            size: desc.size.unwrap_or_default(),
            mode: desc.mode.clone(),
        }
    }
}

impl From<AppFileResource> for RemoteFileDescriptor {
    fn from(resource: AppFileResource) -> Self {
        Self {
            path: resource.path,
            digest: resource.sha1,
            size: resource.size,
            mode: (!resource.mode.is_empty()).then_some(resource.mode),
        }
    }
}
