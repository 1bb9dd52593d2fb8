//! Wildcard file specifier resolution
//!
//! Turns a specifier such as `dist/app-*.jar` into the name of the single file it
//! designates. Zero or several candidates are errors: extracting variables from
//! an arbitrary pick among several artifacts would silently produce wrong values.

use crate::error::ResolveError;
use crate::fs::FileSystem;
use globset::GlobBuilder;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const WILDCARD_CHARS: &[char] = &['*', '?', '[', '{'];

pub struct FileResolver<'a> {
    fs: &'a dyn FileSystem,
}

/// A specifier split into the directory to scan and the glob to match beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSpecifier {
    pub base: PathBuf,
    pub glob: String,
}

impl<'a> FileResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Resolve `specifier` below `base_dir` to exactly one file and return its name.
    pub fn resolve(&self, base_dir: &Path, specifier: &str) -> Result<String, ResolveError> {
        let split = split_specifier(base_dir, specifier);
        let display_path = split.base.join(&split.glob);

        let matcher = GlobBuilder::new(&split.glob)
            .literal_separator(true)
            .build()
            .map_err(|e| ResolveError::InvalidGlob {
                specifier: specifier.to_string(),
                message: e.to_string(),
            })?
            .compile_matcher();

        let max_depth = if split.glob.contains("**") {
            None
        } else {
            Some(split.glob.split('/').filter(|s| !s.is_empty()).count())
        };

        debug!(
            base = %split.base.display(),
            glob = %split.glob,
            ?max_depth,
            "Resolving file specifier"
        );

        let candidates = match self.fs.walk_files(&split.base, max_depth) {
            Ok(files) => files,
            Err(err) => {
                debug!(error = %err, "Base directory not readable");
                return Err(ResolveError::NotFound { path: display_path });
            }
        };

        let mut matches: Vec<PathBuf> = candidates
            .into_iter()
            .filter_map(|path| {
                let relative = path.strip_prefix(&split.base).ok()?;
                let relative = to_slash(relative);
                matcher.is_match(&relative).then_some(path)
            })
            .collect();
        matches.sort();

        match matches.len() {
            0 => Err(ResolveError::NotFound { path: display_path }),
            1 => Ok(file_name_of(&matches[0])),
            _ => Err(ResolveError::Ambiguous {
                path: display_path,
                matches: matches
                    .iter()
                    .map(|m| to_slash(m.strip_prefix(&split.base).unwrap_or(m)))
                    .collect(),
            }),
        }
    }
}

/// Split off the literal directory prefix of `specifier`.
///
/// Leading components without wildcards form the base (an absolute prefix replaces
/// `base_dir`, a relative one is joined onto it); the last component always stays
/// in the glob.
pub fn split_specifier(base_dir: &Path, specifier: &str) -> SplitSpecifier {
    let normalized = specifier.replace('\\', "/");
    let absolute = normalized.starts_with('/') || Path::new(specifier).is_absolute();
    let parts: Vec<&str> = normalized.split('/').collect();

    let literal_dirs = parts[..parts.len().saturating_sub(1)]
        .iter()
        .take_while(|p| !p.contains(WILDCARD_CHARS))
        .count();

    let prefix = parts[..literal_dirs].join("/");
    let glob = parts[literal_dirs..]
        .iter()
        .filter(|p| !p.is_empty() && **p != ".")
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    let base = if absolute {
        if prefix.is_empty() {
            PathBuf::from("/")
        } else {
            PathBuf::from(&prefix)
        }
    } else if prefix.is_empty() {
        base_dir.to_path_buf()
    } else {
        base_dir.join(&prefix)
    };

    SplitSpecifier {
        base: normalize(&base),
        glob,
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
