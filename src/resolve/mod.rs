// src/resolve/mod.rs

//! Path resolution: which files compile, and where their output goes.
//!
//! - [`Location`] classifies a user-supplied location string (glob, single
//!   file, or directory) and derives the glob to search.
//! - [`glob`] expands a location into concrete source files through the
//!   [`crate::fs::FileSystem`] abstraction.
//! - [`output`] maps a source file to its output file.
//!
//! Containment and extension checks are real path predicates
//! ([`is_under`], [`is_source_file`]), not substring matches.

use std::fmt;
use std::path::{Component, Path, PathBuf};

pub mod glob;
pub mod output;

pub use glob::collect_source_files;
pub use output::to_output_path;

/// Extension (without the dot) of compilable template files.
pub const SOURCE_EXTENSION: &str = "mjml";

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// A logical location as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// Already a glob pattern; searched as-is.
    Glob(String),
    /// A single source file; resolves to a one-element file set.
    File(PathBuf),
    /// A directory; searched recursively for source files.
    Directory(PathBuf),
}

impl Location {
    pub fn parse(value: &str) -> Self {
        if value.contains(GLOB_META) {
            Location::Glob(value.to_string())
        } else if is_source_file(Path::new(value)) {
            Location::File(PathBuf::from(value))
        } else {
            Location::Directory(PathBuf::from(value))
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::parse(&path.to_string_lossy())
    }

    /// Glob pattern to search for this location.
    ///
    /// `None` for [`Location::File`], which is not searched at all.
    pub fn search_pattern(&self) -> Option<String> {
        match self {
            Location::Glob(pattern) => Some(pattern.clone()),
            Location::File(_) => None,
            Location::Directory(dir) => {
                let dir = to_slash(dir);
                let dir = dir.trim_end_matches('/');
                if dir.is_empty() || dir == "." {
                    Some(format!("**/*.{SOURCE_EXTENSION}"))
                } else {
                    Some(format!("{dir}/**/*.{SOURCE_EXTENSION}"))
                }
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Glob(pattern) => f.write_str(pattern),
            Location::File(path) | Location::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

/// True if `path` has exactly the source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// True if `path` is `root` or lies below it, compared component-wise.
pub fn is_under(path: &Path, root: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(root))
}

/// Drop `.` components so `./src/a` and `src/a` compare equal.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Path as a string with forward slashes.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classifies_locations() {
        assert_eq!(
            Location::parse("src/**/*.mjml"),
            Location::Glob("src/**/*.mjml".to_string())
        );
        assert_eq!(
            Location::parse("src/mjml/welcome.mjml"),
            Location::File(PathBuf::from("src/mjml/welcome.mjml"))
        );
        assert_eq!(
            Location::parse("src/mjml"),
            Location::Directory(PathBuf::from("src/mjml"))
        );
    }

    #[test]
    fn directory_pattern_appends_recursive_suffix() {
        let loc = Location::parse("src/mjml/");
        assert_eq!(loc.search_pattern().as_deref(), Some("src/mjml/**/*.mjml"));
        assert_eq!(
            Location::parse(".").search_pattern().as_deref(),
            Some("**/*.mjml")
        );
    }

    #[test]
    fn single_file_has_no_search_pattern() {
        assert_eq!(Location::parse("a/b.mjml").search_pattern(), None);
    }

    #[test]
    fn extension_check_is_exact() {
        assert!(is_source_file(Path::new("src/mjml/a.mjml")));
        assert!(!is_source_file(Path::new("src/mjml/a.mjml.bak")));
        assert!(!is_source_file(Path::new("src/mjml/a.mjmlx")));
        assert!(!is_source_file(Path::new("src/mjml/readme.txt")));
    }

    #[test]
    fn containment_is_a_prefix_relationship() {
        let root = Path::new("src/mjml");
        assert!(is_under(Path::new("src/mjml/views/a.mjml"), root));
        assert!(is_under(Path::new("./src/mjml/a.mjml"), root));
        assert!(!is_under(Path::new("other/src/mjml/a.mjml"), root));
        assert!(!is_under(Path::new("src/mjml-old/a.mjml"), root));
    }
}
