//! Measurement directory scanning and file-name conventions.

use crate::{Error, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Lists the regular files in `dir` whose extension is `suffix` (without the dot), sorted by name.
pub fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    log::trace!("scanning {} for .{suffix}", dir.display());
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(suffix) {
            files.push(path);
        }
    }
    files.sort();
    log::debug!("{} .{suffix} file(s) in {}", files.len(), dir.display());
    Ok(files)
}

/// First file (by name) in `dir` with extension `suffix`.
pub fn first_file_with_suffix(dir: &Path, suffix: &str) -> Result<PathBuf> {
    let files = files_with_suffix(dir, suffix)?;
    if files.len() > 1 {
        log::warn!(
            "{} .{suffix} files in {}, using the first one",
            files.len(),
            dir.display()
        );
    }
    files.into_iter().next().ok_or_else(|| Error::NoInputFile {
        dir: dir.to_owned(),
        suffix: suffix.to_owned(),
    })
}

/// File stem as an owned string; empty if the path has none.
pub fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File stem split on `_`.
pub fn stem_parts(path: &Path) -> Vec<String> {
    stem(path).split('_').map(str::to_owned).collect()
}

pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
