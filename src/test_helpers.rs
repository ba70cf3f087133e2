//! Shared test utilities for the cheatsheet-build test suite.
//!
//! Provides fixture setup, documentation file writers, and lookups over a
//! [`DocCollection`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let build = build_docs(&tmp.path().join("docs"), "cljsdoc").unwrap();
//!
//! let map = find_record(&build.collection, "cljs.core/map");
//! assert_eq!(map.name, "map");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::docs::DocCollection;
use crate::record::FunctionRecord;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/project/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/project");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `dir/rel`, creating parent directories.
pub fn write_doc(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Minimal valid documentation source for `full_name`.
pub fn doc_source(full_name: &str, description: &str) -> String {
    format!(
        "=====function\n{full_name}\n=====signature\n({full_name})\n=====description\n{description}\n"
    )
}

// =========================================================================
// Lookups
// =========================================================================

/// Find a record by qualified name. Panics with the known names if absent.
pub fn find_record<'a>(collection: &'a DocCollection, full_name: &str) -> &'a FunctionRecord {
    collection.get(full_name).unwrap_or_else(|| {
        panic!(
            "record '{}' not found; have {:?}",
            full_name,
            record_names(collection)
        )
    })
}

/// Qualified names in collection order.
pub fn record_names(collection: &DocCollection) -> Vec<&str> {
    collection.keys().map(String::as_str).collect()
}
