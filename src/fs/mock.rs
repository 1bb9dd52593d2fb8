use super::FileSystem;
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A file holds its bytes, a directory holds nothing.
type Entry = Option<Vec<u8>>;

/// In-memory workspace. Relative paths are anchored at the mock root (`/mock`
/// unless built with [`MockFileSystem::with_root`]).
pub struct MockFileSystem {
    entries: RwLock<BTreeMap<PathBuf, Entry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            entries: RwLock::new(BTreeMap::new()),
            root,
        };
        let root = fs.root.clone();
        fs.add_dir(root);
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.add_file_bytes(path, content.as_bytes());
    }

    pub fn add_file_bytes(&self, path: impl AsRef<Path>, content: &[u8]) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut entries, parent);
        }
        entries.insert(path, Some(content.to_vec()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();

        Self::ensure_parents(&mut entries, &path);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(entries: &mut BTreeMap<PathBuf, Entry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            entries.entry(current.clone()).or_insert(None);
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).with_context(|| format!("Failed to read file {:?}", path))
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let path = self.normalize_path(path);
        let entries = self.entries.read().unwrap();

        match entries.get(&path) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => Err(anyhow!("Not a file: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn walk_files(&self, root: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>> {
        let root = self.normalize_path(root);
        let entries = self.entries.read().unwrap();

        if !matches!(entries.get(&root), Some(None)) {
            return Err(anyhow!("Directory not found: {:?}", root));
        }

        let found = entries
            .iter()
            .filter(|(_, entry)| entry.is_some())
            .filter_map(|(path, _)| {
                let depth = path.strip_prefix(&root).ok()?.components().count();
                match max_depth {
                    Some(max) if depth > max => None,
                    _ => Some(path.clone()),
                }
            })
            .collect();

        Ok(found)
    }
}
