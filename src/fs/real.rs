use super::FileSystem;
use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).context(format!("Failed to read file {:?}", path))
    }

    fn walk_files(&self, root: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            bail!("Directory not found: {:?}", root);
        }

        // Artifacts are frequently gitignored build outputs, so no filtering here.
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(true)
            .max_depth(max_depth)
            .build();

        let mut files = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }
            if entry.path().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("dist/nested")).unwrap();
        fs::write(base.join("pom.xml"), "<version>1.0</version>").unwrap();
        fs::write(base.join("dist/app-1.0.jar"), "jar").unwrap();
        fs::write(base.join("dist/nested/lib-2.0.jar"), "jar").unwrap();

        dir
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("pom.xml")).unwrap();
        assert_eq!(content, "<version>1.0</version>");
    }

    #[test]
    fn test_read_to_string_missing_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let err = fs
            .read_to_string(&temp.path().join("missing.xml"))
            .unwrap_err();
        assert!(err.to_string().contains("missing.xml"));
    }

    #[test]
    fn test_read_bytes_keeps_non_utf8_content() {
        let temp = create_test_dir();
        let path = temp.path().join("latin1.properties");
        fs::write(&path, b"author=Ren\xe9\n").unwrap();
        let fs = RealFileSystem::new();

        assert!(fs.read_to_string(&path).is_err());
        assert_eq!(fs.read_bytes(&path).unwrap(), b"author=Ren\xe9\n");
    }

    #[test]
    fn test_read_bytes_missing_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let err = fs.read_bytes(&temp.path().join("missing.bin")).unwrap_err();
        assert!(err.to_string().contains("missing.bin"));
    }

    #[test]
    fn test_walk_files_depth_limited() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let files = fs.walk_files(&temp.path().join("dist"), Some(1)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app-1.0.jar"));
    }

    #[test]
    fn test_walk_files_recursive() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let files = fs.walk_files(temp.path(), None).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn test_walk_files_missing_root() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.walk_files(&temp.path().join("nope"), None).is_err());
    }
}
