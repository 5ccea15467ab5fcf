// src/resolve/output.rs

use std::path::{Path, PathBuf};

use crate::config::CompileOptions;
use crate::resolve::{is_source_file, normalize_path};

/// Derive the output path for a source file.
///
/// The `input` prefix is swapped for `output` and the `.mjml` extension for
/// the configured one; the rest of the relative path is kept. A source that
/// is not below `input` keeps its directory, so its output lands next to it.
/// Pure path arithmetic, no filesystem access.
pub fn to_output_path(source: &Path, options: &CompileOptions) -> PathBuf {
    let source = normalize_path(source);
    let input = normalize_path(options.input());

    let relocated = match source.strip_prefix(&input) {
        Ok(rest) => options.output().join(rest),
        Err(_) => source.clone(),
    };

    replace_source_extension(&relocated, options.extension())
}

fn replace_source_extension(path: &Path, extension: &str) -> PathBuf {
    if is_source_file(path) {
        path.with_extension(extension.trim_start_matches('.'))
    } else {
        path.to_path_buf()
    }
}
