//! File and directory transfer flow for skipper.
//!
//! This crate implements the **business logic** for copying local
//! files and directory trees to remote hosts. It is a library crate
//! with no transport dependencies: the surrounding tool provides a
//! [`RemoteSession`](skipper_session::RemoteSession) implementation
//! that bridges to the actual SSH client.
//!
//! # Pipeline
//!
//! 1. **Resolve** the requested destination into a concrete remote
//!    path (home expansion, directory-target detection)
//! 2. **Walk** a source tree, parents before children
//! 3. **Upload** files and directories through the session
//! 4. **Batch** many requests per host, collecting outcomes
//!
//! `upload`/`upload_dir` are the single-shot entry points;
//! [`BulkUploader`] queues requests and runs them per host.

pub mod bulk;
pub mod error;
pub mod resolver;
pub mod types;
pub mod uploader;
pub mod walker;

#[cfg(test)]
mod testutil;

// Re-export primary types for convenience.
pub use bulk::BulkUploader;
pub use error::{PathResolutionError, TransferError, TraversalError};
pub use resolver::{join_remote, resolve_destination};
pub use types::{
    BatchReport, DirectoryEntry, EntryKind, ResolvedDestination, TransferOutcome, TransferRequest,
};
pub use uploader::{upload, upload_dir};
pub use walker::{Walk, walk};
