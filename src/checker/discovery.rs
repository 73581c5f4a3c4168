//! Input file discovery and report naming.

use std::path::{Path, PathBuf};

/// List the input files in `dir`.
///
/// A file qualifies when its name ends in `extension` and does not end in
/// `result_suffix` (leading whitespace ignored), so reports from earlier
/// runs are never fed back in.
/// Directories are skipped. An unreadable directory is logged and yields
/// no files. The result is sorted by path.
pub fn discover_input_files(dir: &Path, extension: &str, result_suffix: &str) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(dir = %dir.display(), error = %e, "Failed to read directory");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .map(|name| is_input_name(&name.to_string_lossy(), extension, result_suffix))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    files
}

/// Whether a bare file name is an input file
pub fn is_input_name(name: &str, extension: &str, result_suffix: &str) -> bool {
    name.ends_with(extension) && !name.ends_with(result_suffix.trim_start())
}

/// Report path for an input file: `dir/list.txt` becomes `dir/list result.txt`.
///
/// Only a trailing `extension` is replaced; a name without it keeps its full
/// name as the stem.
pub fn result_path(input: &Path, extension: &str, result_suffix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(extension).unwrap_or(&name);
    input.with_file_name(format!("{}{}", stem, result_suffix))
}
