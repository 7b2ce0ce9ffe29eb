//! Remote destination resolution.
//!
//! Turns a requested destination into the concrete remote path a
//! transfer will write to: expands `~` against the session's home
//! directory and decides whether a file lands inside a remote
//! directory or at the literal path.

use std::path::Path;

use skipper_session::RemoteSession;

use crate::error::PathResolutionError;
use crate::types::ResolvedDestination;

/// Resolves `destination` for uploading `source` over `session`.
///
/// A leading `~` or `~/` is replaced with the remote home directory
/// first. A directory source then keeps the destination as the
/// literal remote root its contents are replicated under. A file
/// source targets `destination/<file name>` when the destination is
/// an existing remote directory, and the literal `destination`
/// otherwise.
///
/// Resolution reads the current remote state (at most one type
/// query) and never mutates it. The answer is only valid until the
/// remote side changes, so callers resolve at upload time.
pub async fn resolve_destination(
    source: &Path,
    destination: &str,
    session: &dyn RemoteSession,
) -> Result<ResolvedDestination, PathResolutionError> {
    let destination = expand_home(destination, session).await?;

    let metadata = std::fs::metadata(source).map_err(|e| PathResolutionError::Source {
        path: source.to_path_buf(),
        source: e,
    })?;

    if metadata.is_dir() {
        return Ok(ResolvedDestination {
            remote_path: destination,
            is_directory_target: false,
        });
    }

    let is_dir_target = session
        .path_is_directory(&destination)
        .await
        .map_err(|e| PathResolutionError::RemoteStat {
            path: destination.clone(),
            source: e,
        })?;

    if is_dir_target {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(ResolvedDestination {
            remote_path: join_remote(&destination, &name),
            is_directory_target: true,
        })
    } else {
        Ok(ResolvedDestination {
            remote_path: destination,
            is_directory_target: false,
        })
    }
}

/// Joins a remote base path and a `/`-separated relative path.
pub fn join_remote(base: &str, rel: &str) -> String {
    if rel.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return rel.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), rel)
}

/// Expands a leading `~` to the session's home directory.
///
/// `~user` forms are passed through untouched.
async fn expand_home(
    destination: &str,
    session: &dyn RemoteSession,
) -> Result<String, PathResolutionError> {
    if destination != "~" && !destination.starts_with("~/") {
        return Ok(destination.to_string());
    }

    let home = session
        .resolve_home_directory()
        .await
        .map_err(PathResolutionError::HomeDirectory)?;

    match destination.strip_prefix("~/") {
        Some(rest) => Ok(join_remote(&home, rest)),
        None => Ok(home),
    }
}
