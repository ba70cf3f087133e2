//! Publish directory preparation: clean and copy static files.
//!
//! Each [`CopyEntry`] names a source relative to the project root and a
//! destination relative to the publish directory:
//!
//! - A plain `src` is one file, copied to exactly `dest`.
//! - A `src` containing glob metacharacters (`*`, `?`, `[`) is expanded; every
//!   matching file is copied flat into the `dest` directory under its own
//!   file name. A pattern matching nothing is reported, not fatal.

use crate::config::CopyEntry;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to copy {from} to {to}: {err}", from = .0.display(), to = .1.display(), err = .2)]
    Copy(PathBuf, PathBuf, std::io::Error),
    #[error("Invalid glob pattern {0}: {1}")]
    Pattern(String, glob::PatternError),
    #[error("Failed to read glob match: {0}")]
    Glob(#[from] glob::GlobError),
}

/// One file placed in the publish directory.
#[derive(Debug, Clone, PartialEq)]
pub struct CopiedFile {
    pub source: PathBuf,
    /// Relative to the publish directory.
    pub dest: PathBuf,
}

/// Outcome of copying a list of entries.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub copied: Vec<CopiedFile>,
    /// Glob patterns that matched no files.
    pub unmatched: Vec<String>,
}

/// Remove the publish directory and everything in it. Absent is fine.
///
/// Returns whether anything was removed.
pub fn clean_dir(dir: &Path) -> Result<bool, AssetError> {
    if !dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(dir)?;
    Ok(true)
}

fn is_glob(src: &str) -> bool {
    src.contains(['*', '?', '['])
}

fn copy_file(source: &Path, dest: &Path) -> Result<(), AssetError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)
        .map(|_| ())
        .map_err(|e| AssetError::Copy(source.to_path_buf(), dest.to_path_buf(), e))
}

/// Copy every entry from `root` into `publish_dir`, in order.
pub fn copy_entries(
    entries: &[CopyEntry],
    root: &Path,
    publish_dir: &Path,
) -> Result<CopyReport, AssetError> {
    let mut report = CopyReport::default();

    for entry in entries {
        if !is_glob(&entry.src) {
            let source = root.join(&entry.src);
            copy_file(&source, &publish_dir.join(&entry.dest))?;
            report.copied.push(CopiedFile {
                source,
                dest: PathBuf::from(&entry.dest),
            });
            continue;
        }

        let pattern = root.join(&entry.src);
        let pattern = pattern.to_string_lossy();
        let paths = glob::glob(&pattern).map_err(|e| AssetError::Pattern(entry.src.clone(), e))?;

        let mut matches = Vec::new();
        for path in paths {
            let path = path?;
            if path.is_file() {
                matches.push(path);
            }
        }
        matches.sort();

        if matches.is_empty() {
            report.unmatched.push(entry.src.clone());
            continue;
        }

        for source in matches {
            let Some(name) = source.file_name() else {
                continue;
            };
            let dest = Path::new(&entry.dest).join(name);
            copy_file(&source, &publish_dir.join(&dest))?;
            report.copied.push(CopiedFile { source, dest });
        }
    }

    Ok(report)
}
