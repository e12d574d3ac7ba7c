//! File records and wire resources for app pushes.
//!
//! `types` holds the in-memory records a push works with; `messages`
//! holds the JSON shapes exchanged with the control plane.

pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use messages::{AppFileResource, IntegrityFields};
pub use types::{LocalFileRecord, RemoteFileDescriptor, UploadFileDescriptor};
