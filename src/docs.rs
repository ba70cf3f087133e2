//! Documentation index generation.
//!
//! Walks the documentation source tree, parses every file with the configured
//! extension, and folds the valid records into one [`DocCollection`] keyed by
//! qualified name. The collection is written as pretty-printed JSON for the
//! cheatsheet front-end.
//!
//! ## Pipeline
//!
//! ```text
//! docs/**/*.cljsdoc → scan_sections → parse_record → DocCollection → docs.json
//! ```
//!
//! ## Ordering and Overwrites
//!
//! Files are visited in sorted path order. When two files declare the same
//! qualified name, the later one wins and the overwrite is recorded in
//! [`DocBuild::overwrites`] so the CLI can warn about it. Overwrites never
//! fail the run.
//!
//! ## Failure Semantics
//!
//! Files missing a required section are skipped and listed in
//! [`DocBuild::skipped`]. Content is decoded leniently: a leading byte-order
//! mark is dropped and invalid UTF-8 becomes U+FFFD. Any other I/O error aborts before the
//! artifact is touched, so a failed run leaves the previous `docs.json` intact.

use crate::record::{self, FunctionRecord};
use crate::sections::scan_sections;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk {path}: {err}", path = .0.display(), err = .1)]
    Walk(PathBuf, walkdir::Error),
    #[error("Failed to read {path}: {err}", path = .0.display(), err = .1)]
    Read(PathBuf, std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Qualified name → record. Sorted so the artifact is byte-stable across runs.
pub type DocCollection = BTreeMap<String, FunctionRecord>;

/// A record that replaced an earlier one with the same qualified name.
#[derive(Debug, Clone, PartialEq)]
pub struct Overwrite {
    pub full_name: String,
    pub replaced: PathBuf,
    pub by: PathBuf,
}

/// Result of one pass over the documentation tree.
#[derive(Debug, Default)]
pub struct DocBuild {
    pub collection: DocCollection,
    /// Source file of every record in the collection.
    pub sources: BTreeMap<String, PathBuf>,
    /// Files with the right extension that did not produce a record.
    pub skipped: Vec<PathBuf>,
    pub overwrites: Vec<Overwrite>,
}

impl DocBuild {
    /// Fold one parsed file into the build.
    fn insert(&mut self, record: FunctionRecord, source: &Path) {
        let key = record.full_name.clone();
        if let Some(previous) = self.sources.insert(key.clone(), source.to_path_buf()) {
            self.overwrites.push(Overwrite {
                full_name: key.clone(),
                replaced: previous,
                by: source.to_path_buf(),
            });
        }
        self.collection.insert(key, record);
    }
}

/// Find every file under `root` with the given extension, in sorted order.
///
/// The match is exact and case-sensitive on the final extension. Symlinks are
/// followed; a link cycle is a walk error.
pub fn discover_doc_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, DocsError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| DocsError::Walk(root.to_path_buf(), e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|e| e == extension) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Parse one documentation file.
///
/// `Ok(None)` means a required section is missing.
pub fn parse_doc_file(path: &Path) -> Result<Option<FunctionRecord>, DocsError> {
    let bytes = fs::read(path).map_err(|e| DocsError::Read(path.to_path_buf(), e))?;
    Ok(record::parse_record(scan_sections(&decode_source(&bytes))))
}

/// Lossy UTF-8 decode with any leading byte-order mark removed.
fn decode_source(bytes: &[u8]) -> String {
    let content = String::from_utf8_lossy(bytes);
    let content: &str = &content;
    content.strip_prefix('\u{FEFF}').unwrap_or(content).to_string()
}

/// Parse every documentation file under `source_dir` into a [`DocBuild`].
///
/// Nothing is written; see [`write_docs`].
pub fn build_docs(source_dir: &Path, extension: &str) -> Result<DocBuild, DocsError> {
    let files = discover_doc_files(source_dir, extension)?;
    let mut build = DocBuild::default();
    for path in &files {
        match parse_doc_file(path)? {
            Some(record) => build.insert(record, path),
            None => build.skipped.push(path.clone()),
        }
    }
    Ok(build)
}

/// Serialize the collection as indented JSON.
pub fn render_docs_json(collection: &DocCollection) -> Result<String, DocsError> {
    let mut json = serde_json::to_string_pretty(collection)?;
    json.push('\n');
    Ok(json)
}

/// Write the collection to `output`, replacing any previous artifact.
pub fn write_docs(collection: &DocCollection, output: &Path) -> Result<(), DocsError> {
    let json = render_docs_json(collection)?;
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, json)?;
    Ok(())
}

/// Build the documentation index and write it in one step.
pub fn generate_docs(
    source_dir: &Path,
    extension: &str,
    output: &Path,
) -> Result<DocBuild, DocsError> {
    let build = build_docs(source_dir, extension)?;
    write_docs(&build.collection, output)?;
    Ok(build)
}
