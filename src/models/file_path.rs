use camino::{Utf8Path, Utf8PathBuf};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// A file queued for patching.
///
/// Equality and ordering compare the path text byte by byte rather than
/// path components, so `/tmp/a-b` sorts before `/tmp/a/b` and `a//b` is a
/// different entry from `a/b`.
#[derive(Debug, Clone)]
pub struct FilePath(Utf8PathBuf);

impl FilePath {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self(path.into())
    }

    /// Convert a native path handed over by a file picker.
    ///
    /// Relative paths are combined with `base_dir` when one is given.
    /// Returns `None` for paths that are not valid UTF-8.
    pub fn from_native(base_dir: Option<&Path>, raw: &Path) -> Option<Self> {
        let combined: PathBuf = match base_dir {
            Some(base) if raw.is_relative() => base.join(raw),
            _ => raw.to_path_buf(),
        };

        match Utf8PathBuf::try_from(combined) {
            Ok(path) => Some(Self(path)),
            Err(e) => {
                tracing::warn!("Dropping non UTF-8 path: {}", e.as_path().display());
                None
            }
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }
}

impl PartialEq for FilePath {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for FilePath {}

impl Hash for FilePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for FilePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FilePath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FilePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for FilePath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<Utf8PathBuf> for FilePath {
    fn from(path: Utf8PathBuf) -> Self {
        Self(path)
    }
}

impl AsRef<Utf8Path> for FilePath {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}
