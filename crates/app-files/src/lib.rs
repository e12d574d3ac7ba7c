//! Local side of an app push: walking, ignoring, fingerprinting and zipping.
//!
//! Everything here works on plain paths and the records from
//! `appbits-resources`; the push flow itself lives in `appbits-push`.

mod fingerprint;
mod ignore;
mod known;
mod mode;
mod validation;
mod walk;
mod zipper;

pub use fingerprint::{file_digest, symlink_digest};
pub use ignore::{CfIgnore, DEFAULT_IGNORE_FILES, IgnoreConfig};
pub use known::KnownResources;
pub use mode::{file_mode, format_mode, parse_mode};
pub use validation::validate_relative_path;
pub use walk::AppFiles;
pub use zipper::ZipArchiver;

/// Name of the per-app ignore file looked up at the root.
pub const IGNORE_FILE_NAME: &str = ".cfignore";

/// Errors produced by the app-files crate.
#[derive(Debug, thiserror::Error)]
pub enum AppFilesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid ignore pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("{0} is empty")]
    EmptyDir(String),

    #[error("{0}")]
    Other(String),
}
