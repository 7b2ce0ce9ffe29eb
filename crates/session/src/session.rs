//! Remote session trait.
//!
//! `RemoteSession` is implemented by the surrounding tool to bridge
//! transfer logic to the actual transport.

use std::future::Future;
use std::pin::Pin;

use crate::error::SessionError;

/// Abstract session to one remote host.
///
/// The surrounding tool implements this trait on top of its SSH/SFTP
/// client. Using a trait keeps transfer logic decoupled from transport
/// and testable with in-memory fakes. A session is assumed to be
/// already authenticated and is not safe for concurrent use by two
/// in-flight transfers.
pub trait RemoteSession: Send + Sync {
    /// Writes `data` to `remote_path`, replacing any existing file.
    ///
    /// The parent directory must already exist.
    fn put(
        &self,
        data: &[u8],
        remote_path: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), SessionError>> + Send + '_>>;

    /// Returns whether `remote_path` exists on the remote host.
    fn path_exists(
        &self,
        remote_path: &str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, SessionError>> + Send + '_>>;

    /// Returns whether `remote_path` is an existing remote directory.
    ///
    /// Nonexistent paths report `Ok(false)`, not an error.
    fn path_is_directory(
        &self,
        remote_path: &str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, SessionError>> + Send + '_>>;

    /// Creates the directory at `remote_path`.
    ///
    /// Succeeds if the directory already exists. The parent directory
    /// must already exist.
    fn make_directory(
        &self,
        remote_path: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), SessionError>> + Send + '_>>;

    /// Resolves the remote user's home directory to an absolute path.
    fn resolve_home_directory(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<String, SessionError>> + Send + '_>>;

    /// Returns a stable label for the remote host (e.g. `user@host`).
    fn host_id(&self) -> &str;
}
