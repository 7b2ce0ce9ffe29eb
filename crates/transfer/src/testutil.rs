//! In-memory remote session used by the unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use skipper_session::{RemoteSession, SessionError};

/// Remote operation recorded by [`MemorySession`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Home,
    Stat(String),
    MakeDir(String),
    Put(String),
}

/// In-memory remote filesystem implementing [`RemoteSession`].
///
/// Rejects writes and directory creation when the parent directory
/// does not exist yet, so ordering bugs show up as test failures
/// instead of passing silently.
pub struct MemorySession {
    id: String,
    home: String,
    state: Mutex<State>,
}

struct State {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, Vec<u8>>,
    ops: Vec<Op>,
    fail_put_on: Option<String>,
    fail_home: bool,
}

impl State {
    fn has_dir(&self, path: &str) -> bool {
        path.is_empty() || path == "/" || self.dirs.contains(path)
    }

    fn parent_ok(&self, path: &str) -> bool {
        match parent(path) {
            None => true,
            Some(p) => self.has_dir(&p),
        }
    }
}

impl MemorySession {
    /// Creates a session for `deck@steamdeck` with home `/home/deck`.
    pub fn new(id: &str) -> Self {
        Self::with_home(id, "/home/deck")
    }

    /// Creates a session with a custom home directory (pre-created).
    pub fn with_home(id: &str, home: &str) -> Self {
        let mut dirs = BTreeSet::new();
        seed_chain(&mut dirs, home);
        Self {
            id: id.to_string(),
            home: home.to_string(),
            state: Mutex::new(State {
                dirs,
                files: BTreeMap::new(),
                ops: Vec::new(),
                fail_put_on: None,
                fail_home: false,
            }),
        }
    }

    /// Creates `path` and all its ancestors, without recording ops.
    pub fn seed_dir(&self, path: &str) {
        let mut state = self.state.lock().unwrap();
        seed_chain(&mut state.dirs, &norm(path));
    }

    /// Creates a file (and its ancestor directories), without recording ops.
    pub fn seed_file(&self, path: &str, data: &[u8]) {
        let mut state = self.state.lock().unwrap();
        let path = norm(path);
        if let Some(p) = parent(&path) {
            seed_chain(&mut state.dirs, &p);
        }
        state.files.insert(path, data.to_vec());
    }

    /// Makes every subsequent `put` to `remote_path` fail.
    pub fn fail_put_on(&self, remote_path: &str) {
        self.state.lock().unwrap().fail_put_on = Some(norm(remote_path));
    }

    /// Makes home directory resolution fail.
    pub fn fail_home_lookup(&self) {
        self.state.lock().unwrap().fail_home = true;
    }

    /// Returns the stored bytes for `path`, if it is a file.
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(&norm(path)).cloned()
    }

    /// Returns whether `path` is a directory.
    pub fn is_dir(&self, path: &str) -> bool {
        self.state.lock().unwrap().has_dir(&norm(path))
    }

    /// All recorded operations, including reads.
    pub fn ops(&self) -> Vec<Op> {
        self.state.lock().unwrap().ops.clone()
    }

    /// Recorded operations that mutate the remote side.
    pub fn mutations(&self) -> Vec<Op> {
        self.ops()
            .into_iter()
            .filter(|op| matches!(op, Op::MakeDir(_) | Op::Put(_)))
            .collect()
    }
}

impl RemoteSession for MemorySession {
    fn put(
        &self,
        data: &[u8],
        remote_path: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), SessionError>> + Send + '_>> {
        let result = {
            let mut state = self.state.lock().unwrap();
            let path = norm(remote_path);
            state.ops.push(Op::Put(path.clone()));

            if state.fail_put_on.as_deref() == Some(path.as_str()) {
                Err(SessionError::Remote(format!("injected failure on {path}")))
            } else if state.dirs.contains(&path) {
                Err(SessionError::Remote(format!("{path} is a directory")))
            } else if !state.parent_ok(&path) {
                Err(SessionError::Remote(format!("no parent directory for {path}")))
            } else {
                state.files.insert(path, data.to_vec());
                Ok(())
            }
        };
        Box::pin(async move { result })
    }

    fn path_exists(
        &self,
        remote_path: &str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, SessionError>> + Send + '_>> {
        let result = {
            let mut state = self.state.lock().unwrap();
            let path = norm(remote_path);
            state.ops.push(Op::Stat(path.clone()));
            Ok(state.has_dir(&path) || state.files.contains_key(&path))
        };
        Box::pin(async move { result })
    }

    fn path_is_directory(
        &self,
        remote_path: &str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, SessionError>> + Send + '_>> {
        let result = {
            let mut state = self.state.lock().unwrap();
            let path = norm(remote_path);
            state.ops.push(Op::Stat(path.clone()));
            Ok(state.has_dir(&path))
        };
        Box::pin(async move { result })
    }

    fn make_directory(
        &self,
        remote_path: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), SessionError>> + Send + '_>> {
        let result = {
            let mut state = self.state.lock().unwrap();
            let path = norm(remote_path);
            state.ops.push(Op::MakeDir(path.clone()));

            if state.files.contains_key(&path) {
                Err(SessionError::Remote(format!("{path} is a file")))
            } else if !state.parent_ok(&path) {
                Err(SessionError::Remote(format!("no parent directory for {path}")))
            } else {
                state.dirs.insert(path);
                Ok(())
            }
        };
        Box::pin(async move { result })
    }

    fn resolve_home_directory(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<String, SessionError>> + Send + '_>> {
        let result = {
            let mut state = self.state.lock().unwrap();
            state.ops.push(Op::Home);
            if state.fail_home {
                Err(SessionError::Remote("home directory unavailable".into()))
            } else {
                Ok(self.home.clone())
            }
        };
        Box::pin(async move { result })
    }

    fn host_id(&self) -> &str {
        &self.id
    }
}

fn norm(path: &str) -> String {
    if path == "/" {
        return path.to_string();
    }
    path.trim_end_matches('/').to_string()
}

fn parent(path: &str) -> Option<String> {
    let path = path.trim_end_matches('/');
    path.rfind('/').map(|i| {
        if i == 0 {
            "/".to_string()
        } else {
            path[..i].to_string()
        }
    })
}

fn seed_chain(dirs: &mut BTreeSet<String>, path: &str) {
    let absolute = path.starts_with('/');
    let mut acc = String::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        if absolute || !acc.is_empty() {
            acc.push('/');
        }
        acc.push_str(part);
        dirs.insert(acc.clone());
    }
}
