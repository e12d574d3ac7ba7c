//! Push file gathering: decide what to upload for an app.
//!
//! This crate holds the **business logic** of preparing an app push. It
//! has no transport dependency: the resource lookup is a trait, and the
//! production implementations of all collaborators live in
//! `appbits-app-files`.
//!
//! # Pipeline
//!
//! 1. **Detect**: is the source a zip archive or a directory?
//! 2. **Extract**: unpack archives into the caller's scratch directory
//! 3. **Walk**: list eligible files, applying ignore rules
//! 4. **Match**: ask which files the server already holds
//! 5. **Annotate**: record each file's POSIX mode

pub mod actor;
pub mod collaborators;
pub mod error;
pub mod types;

// Re-export primary types for convenience.
pub use actor::PushActor;
pub use collaborators::{AppFileWalker, ResourceMatcher, Zipper};
pub use error::PushError;
pub use types::GatheredFiles;
