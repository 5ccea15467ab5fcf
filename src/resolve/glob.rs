// src/resolve/glob.rs

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use crate::errors::{MjmlError, Result};
use crate::fs::FileSystem;
use crate::resolve::{to_slash, Location, GLOB_META};

/// Expand `location` into the concrete source files it denotes.
///
/// - A missing directory (or a glob whose base directory is missing) yields
///   an empty list, never an error.
/// - Hidden files and directories are skipped.
/// - The result is sorted so batches compile in a stable order.
pub fn collect_source_files(fs: &dyn FileSystem, location: &Location) -> Result<Vec<PathBuf>> {
    let pattern = match location.search_pattern() {
        Some(pattern) => pattern,
        None => {
            let Location::File(path) = location else {
                return Ok(Vec::new());
            };
            return Ok(if fs.is_file(path) {
                vec![path.clone()]
            } else {
                debug!(?path, "source file does not exist");
                Vec::new()
            });
        }
    };

    let matcher = build_matcher(&pattern)?;
    let base = literal_base(&pattern);

    let mut files = walk_matching(fs, &base, &matcher)?;
    files.sort();

    debug!(%location, %pattern, count = files.len(), "expanded location");
    Ok(files)
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| MjmlError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
    Ok(glob.compile_matcher())
}

/// Leading path components of `pattern` that contain no glob syntax.
///
/// `"src/mjml/**/*.mjml"` → `"src/mjml"`, `"**/*.mjml"` → `""`.
fn literal_base(pattern: &str) -> PathBuf {
    let literal: Vec<&str> = pattern
        .split('/')
        .take_while(|segment| !segment.contains(GLOB_META))
        .collect();
    PathBuf::from(literal.join("/"))
}

fn walk_matching(fs: &dyn FileSystem, base: &Path, matcher: &GlobMatcher) -> Result<Vec<PathBuf>> {
    let from_cwd = base.as_os_str().is_empty();
    let root = if from_cwd { PathBuf::from(".") } else { base.to_path_buf() };

    if !fs.is_dir(&root) {
        debug!(?root, "search base is not a directory; nothing to compile");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut stack = vec![root];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if is_hidden(&path) {
                continue;
            }
            let path = if from_cwd {
                path.strip_prefix(".").map(Path::to_path_buf).unwrap_or(path)
            } else {
                path
            };

            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) && matcher.is_match(to_slash(&path)) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
