//! Local directory traversal.
//!
//! Walks a directory tree depth-first and yields entries in an order
//! that is safe to replay against a remote host: every directory is
//! yielded before anything inside it. Entries within a directory are
//! sorted by name so runs are deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TraversalError;
use crate::types::{DirectoryEntry, EntryKind};

/// Starts a walk over the tree rooted at `root`.
///
/// Fails when `root` is missing or not a directory. The returned
/// iterator reads directories lazily, one listing at a time, and
/// reflects the on-disk state at the moment each directory is read.
/// Entries that are neither regular files nor directories (sockets,
/// symlinks) are skipped. The iterator yields no further entries
/// after the first error.
pub fn walk(root: &Path) -> Result<Walk, TraversalError> {
    let metadata = fs::metadata(root).map_err(|e| TraversalError::ReadDir {
        path: root.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(TraversalError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    Ok(Walk {
        root: root.to_path_buf(),
        stack: Vec::new(),
        unread: Some(PathBuf::new()),
    })
}

/// Lazy depth-first iterator over a directory tree.
///
/// Yields paths relative to the walk root; the root itself is not
/// yielded.
pub struct Walk {
    root: PathBuf,
    /// Open directory listings, innermost last.
    stack: Vec<std::vec::IntoIter<(PathBuf, EntryKind)>>,
    /// Relative path of a directory yielded but not yet listed.
    unread: Option<PathBuf>,
}

impl Iterator for Walk {
    type Item = Result<DirectoryEntry, TraversalError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(rel) = self.unread.take() {
                match read_sorted(&self.root.join(&rel), &rel) {
                    Ok(children) => self.stack.push(children.into_iter()),
                    Err(e) => {
                        self.stack.clear();
                        return Some(Err(e));
                    }
                }
            }

            let listing = self.stack.last_mut()?;
            match listing.next() {
                None => {
                    self.stack.pop();
                }
                Some((rel, kind)) => {
                    if kind == EntryKind::Directory {
                        self.unread = Some(rel.clone());
                    }
                    return Some(Ok(DirectoryEntry {
                        relative_path: rel.to_string_lossy().replace('\\', "/"),
                        kind,
                    }));
                }
            }
        }
    }
}

/// Reads one directory and returns its entries, sorted by name.
fn read_sorted(dir: &Path, rel: &Path) -> Result<Vec<(PathBuf, EntryKind)>, TraversalError> {
    let read_err = |e: std::io::Error| TraversalError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut out = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let file_type = entry.file_type().map_err(read_err)?;

        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            continue;
        };
        out.push((rel.join(entry.file_name()), kind));
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}
