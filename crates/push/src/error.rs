//! Push error types.

use appbits_app_files::AppFilesError;

/// Errors produced while gathering files for a push.
///
/// Every variant aborts the push; nothing is retried here.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("extracting app archive: {0}")]
    Extraction(#[source] AppFilesError),

    #[error("listing app files: {0}")]
    Walk(#[source] AppFilesError),

    #[error("matching resources with the server: {0}")]
    RemoteLookup(#[source] AppFilesError),

    #[error("reading mode of {path}: {source}")]
    FileMode {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("packaging upload archive: {0}")]
    Archive(#[source] AppFilesError),
}
