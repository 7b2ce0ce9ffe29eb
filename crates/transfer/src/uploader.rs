//! Single-shot upload operations.
//!
//! `upload` copies one local file, `upload_dir` replicates a whole
//! directory tree. Both resolve the destination against the current
//! remote state first, then write through the session. The first
//! failed operation aborts the call; whatever was already written
//! stays in place.

use std::path::Path;

use skipper_session::RemoteSession;
use tracing::{debug, info};

use crate::error::TransferError;
use crate::resolver::{join_remote, resolve_destination};
use crate::types::EntryKind;
use crate::walker;

/// Uploads a single local file.
///
/// When `destination` names an existing remote directory the file
/// lands inside it under its own name, otherwise `destination` is
/// the final remote path. An existing remote file is replaced.
pub async fn upload(
    source: &Path,
    destination: &str,
    session: &dyn RemoteSession,
) -> Result<(), TransferError> {
    let resolved = resolve_destination(source, destination, session).await?;
    put_file(source, &resolved.remote_path, session).await?;

    info!(
        host = %session.host_id(),
        source = %source.display(),
        remote = %resolved.remote_path,
        "file uploaded"
    );
    Ok(())
}

/// Replicates the directory tree at `source` under `destination`.
///
/// The remote root is created if missing, then every subdirectory
/// and file is written in an order that guarantees parents exist
/// before their contents. Remote entries with no local counterpart
/// are left untouched.
pub async fn upload_dir(
    source: &Path,
    destination: &str,
    session: &dyn RemoteSession,
) -> Result<(), TransferError> {
    let resolved = resolve_destination(source, destination, session).await?;
    let root = resolved.remote_path;

    // Validate the source before touching the remote side.
    let entries = walker::walk(source)?;

    session
        .make_directory(&root)
        .await
        .map_err(|e| TransferError::CreateDirectory {
            remote: root.clone(),
            source: e,
        })?;

    let mut files = 0usize;
    for entry in entries {
        let entry = entry?;
        let remote_path = join_remote(&root, &entry.relative_path);
        match entry.kind {
            EntryKind::Directory => {
                session
                    .make_directory(&remote_path)
                    .await
                    .map_err(|e| TransferError::CreateDirectory {
                        remote: remote_path.clone(),
                        source: e,
                    })?;
            }
            EntryKind::File => {
                put_file(&source.join(&entry.relative_path), &remote_path, session).await?;
                files += 1;
            }
        }
    }

    info!(
        host = %session.host_id(),
        source = %source.display(),
        remote = %root,
        files,
        "directory uploaded"
    );
    Ok(())
}

/// Reads one local file and writes it to the remote path.
async fn put_file(
    local: &Path,
    remote: &str,
    session: &dyn RemoteSession,
) -> Result<(), TransferError> {
    let data = tokio::fs::read(local)
        .await
        .map_err(|e| TransferError::ReadSource {
            path: local.to_path_buf(),
            source: e,
        })?;

    session
        .put(&data, remote)
        .await
        .map_err(|e| TransferError::Put {
            local: local.to_path_buf(),
            remote: remote.to_string(),
            source: e,
        })?;

    debug!(remote = %remote, bytes = data.len(), "file written");
    Ok(())
}
