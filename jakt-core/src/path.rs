use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

/// A normalized filesystem path.
///
/// Paths are made absolute against the current directory and `.`/`..`
/// components are resolved lexically, so two spellings of the same file
/// compare equal without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath {
    path: PathBuf,
}

impl FilePath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self {
            path: normalize(&absolute),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extension without the leading dot, if any.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }

    /// Final component of the path.
    pub fn basename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Basename with the extension and its leading dot stripped.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_resolves_dots() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c/d.jakt")),
            PathBuf::from("/a/c/d.jakt")
        );
    }

    #[test]
    fn test_normalize_parent_of_root() {
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_relative_paths_become_absolute() {
        let path = FilePath::new("samples/hello.jakt");
        assert!(path.path().is_absolute());
        assert!(path.path().ends_with("samples/hello.jakt"));
    }

    #[test]
    fn test_equivalent_spellings_compare_equal() {
        assert_eq!(
            FilePath::new("src/../src/./main.jakt"),
            FilePath::new("src/main.jakt")
        );
    }

    #[test]
    fn test_extension_basename_stem() {
        let path = FilePath::new("/tmp/project/foo.jakt");
        assert_eq!(path.extension(), Some("jakt"));
        assert_eq!(path.basename(), "foo.jakt");
        assert_eq!(path.stem(), "foo");
    }

    #[test]
    fn test_stem_keeps_inner_dots() {
        let path = FilePath::new("/tmp/foo.test.jakt");
        assert_eq!(path.stem(), "foo.test");
        assert_eq!(path.extension(), Some("jakt"));
    }

    #[test]
    fn test_missing_extension() {
        assert_eq!(FilePath::new("/tmp/Makefile").extension(), None);
    }
}
