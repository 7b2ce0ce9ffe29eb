//! Data types for the transfer flow.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A request to copy one local path to one remote destination.
///
/// `destination` may start with `~` or `~/` to refer to the remote
/// user's home directory; expansion happens at upload time, against
/// the session the request runs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Local file or directory to copy.
    pub source: PathBuf,
    /// Requested remote path, `/`-separated.
    pub destination: String,
}

impl TransferRequest {
    /// Creates a request.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Concrete remote target computed from a request plus remote state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    /// Final remote path the transfer writes to, `/`-separated.
    pub remote_path: String,
    /// True when the requested destination named an existing remote
    /// directory and the source file name was appended to it.
    pub is_directory_target: bool,
}

/// Kind of a walked directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One entry produced by the directory walker.
///
/// `relative_path` uses `/` as separator (even on Windows) to match
/// the remote side's expectations. A directory's entry is always
/// yielded before entries for anything inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub relative_path: String,
    pub kind: EntryKind,
}

/// Result of a single transfer request against a single host.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub request: TransferRequest,
    pub success: bool,
    pub error: Option<String>,
}

/// Batch results for one target host.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub host: String,
    pub outcomes: Vec<TransferOutcome>,
}

impl BatchReport {
    /// Returns `true` if every outcome in the batch succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }
}
