// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    reads: Vec<PathBuf>,
    writes: Vec<PathBuf>,
    denied: Vec<PathBuf>,
}

/// In-memory filesystem for tests.
///
/// Paths are stored normalized (no `.` components), so `./src/a.mjml` and
/// `src/a.mjml` refer to the same entry. Reads and writes are recorded so
/// tests can assert that a path was never touched.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A poisoned mock only happens after a test already panicked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a file, creating its parent directories implicitly.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            insert_dir_chain(&mut state.dirs, parent);
        }
        state.files.insert(path, content.into());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut state = self.lock();
        insert_dir_chain(&mut state.dirs, &path);
    }

    /// Make every write below `prefix` fail, to simulate permission errors.
    pub fn deny_writes_under(&self, prefix: impl AsRef<Path>) {
        let prefix = normalize(prefix.as_ref());
        self.lock().denied.push(prefix);
    }

    /// Current contents of a file as UTF-8 text.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = normalize(path.as_ref());
        self.lock()
            .files
            .get(&path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Every path passed to `read_to_string`, in call order.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.lock().reads.clone()
    }

    /// Every path successfully written, in call order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.lock().writes.clone()
    }
}

fn insert_dir_chain(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        dirs.insert(current.clone());
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let key = normalize(path);
        let mut state = self.lock();
        state.reads.push(key.clone());
        match state.files.get(&key) {
            Some(content) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            None if state.dirs.contains(&key) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let key = normalize(path);
        let mut state = self.lock();
        if state.files.contains_key(&key) {
            return Err(anyhow!("File exists: {:?}", path));
        }
        insert_dir_chain(&mut state.dirs, &key);
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let key = normalize(path);
        let mut state = self.lock();

        if state.denied.iter().any(|prefix| key.starts_with(prefix)) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        let parent_exists = match key.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => state.dirs.contains(parent),
            _ => true,
        };
        if !parent_exists {
            return Err(anyhow!("No such file or directory: {:?}", path));
        }

        state.files.insert(key.clone(), contents.to_vec());
        state.writes.push(key);
        Ok(())
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        let key = normalize(path);
        match self.lock().files.get(&key) {
            Some(content) => Ok(content.len() as u64),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock().files.contains_key(&normalize(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let key = normalize(path);
        key.as_os_str().is_empty() || self.lock().dirs.contains(&key)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let key = normalize(path);
        let state = self.lock();
        if !key.as_os_str().is_empty() && !state.dirs.contains(&key) {
            return Err(anyhow!("Not a directory or not found: {:?}", path));
        }

        let is_child = |candidate: &Path| candidate.parent() == Some(key.as_path());
        let names: BTreeSet<_> = state
            .dirs
            .iter()
            .map(PathBuf::as_path)
            .chain(state.files.keys().map(PathBuf::as_path))
            .filter(|candidate| is_child(candidate))
            .filter_map(|candidate| candidate.file_name().map(|n| n.to_os_string()))
            .collect();

        Ok(names.into_iter().map(|name| path.join(name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_existing_parent() {
        let fs = MockFileSystem::new();
        assert!(fs.write(Path::new("out/a/b.html"), b"x").is_err());

        fs.create_dir_all(Path::new("out/a")).unwrap();
        fs.write(Path::new("out/a/b.html"), b"x").unwrap();
        assert_eq!(fs.contents("out/a/b.html").as_deref(), Some("x"));
        assert!(fs.is_dir(Path::new("out")));
    }

    #[test]
    fn read_dir_lists_files_and_dirs_once() {
        let fs = MockFileSystem::new();
        fs.add_file("src/mjml/a.mjml", "a");
        fs.add_file("src/mjml/views/b.mjml", "b");

        let entries = fs.read_dir(Path::new("src/mjml")).unwrap();
        assert_eq!(
            entries,
            vec![PathBuf::from("src/mjml/a.mjml"), PathBuf::from("src/mjml/views")]
        );
    }

    #[test]
    fn dot_prefixed_paths_are_the_same_entry() {
        let fs = MockFileSystem::new();
        fs.add_file("./src/a.mjml", "a");
        assert!(fs.is_file(Path::new("src/a.mjml")));
        assert_eq!(fs.read_to_string(Path::new("src/a.mjml")).unwrap(), "a");
        assert_eq!(fs.reads(), vec![PathBuf::from("src/a.mjml")]);
    }
}
