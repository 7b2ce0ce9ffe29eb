//! Transfer error types.

use std::path::PathBuf;

use skipper_session::SessionError;

/// Errors produced while resolving a remote destination.
#[derive(Debug, thiserror::Error)]
pub enum PathResolutionError {
    #[error("cannot read local source {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot resolve remote home directory: {0}")]
    HomeDirectory(#[source] SessionError),

    #[error("cannot stat remote path {path}: {source}")]
    RemoteStat {
        path: String,
        #[source]
        source: SessionError,
    },
}

/// Errors produced while walking a local directory tree.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    #[error("not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced while uploading a single request.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("path resolution failed: {0}")]
    Resolution(#[from] PathResolutionError),

    #[error("traversal failed: {0}")]
    Traversal(#[from] TraversalError),

    #[error("cannot read local file {}: {source}", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("upload of {} to {remote} failed: {source}", .local.display())]
    Put {
        local: PathBuf,
        remote: String,
        #[source]
        source: SessionError,
    },

    #[error("cannot create remote directory {remote}: {source}")]
    CreateDirectory {
        remote: String,
        #[source]
        source: SessionError,
    },

    #[error("cancelled")]
    Cancelled,
}
