//! Content hashing and cache-busting renames.
//!
//! Published assets get the first few hex characters of their SHA-256 digest
//! inserted before the final extension, so browsers refetch them exactly when
//! their content changes:
//!
//! ```text
//! css/main.min.css        → css/main.min.3f2a9c1e.css
//! js/cheatsheet.min.js    → js/cheatsheet.min.b04d77aa.js
//! ```
//!
//! The referencing HTML page is rewritten to point at the new names. Only
//! whole file names are replaced, in one pass, so `a.css` never rewrites
//! inside `ba.css` or inside an already hashed name. All
//! inputs are read before anything is written, so a missing asset leaves the
//! publish directory untouched.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read {path}: {err}", path = .0.display(), err = .1)]
    Read(PathBuf, std::io::Error),
    #[error("Asset has no file name: {path}", path = .0.display())]
    NoFileName(PathBuf),
}

/// SHA-256 of `bytes` as lowercase hex, truncated to `len` characters.
pub fn content_hash(bytes: &[u8], len: usize) -> String {
    let mut hex = format!("{:x}", Sha256::digest(bytes));
    hex.truncate(len);
    hex
}

/// Insert `hash` before the final extension of `file_name`.
///
/// - `main.min.css` → `main.min.<hash>.css`
/// - `LICENSE` → `LICENSE.<hash>`
pub fn hashed_file_name(file_name: &str, hash: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}.{hash}.{ext}"),
        _ => format!("{file_name}.{hash}"),
    }
}

/// An asset renamed by [`hash_assets`], paths relative to the publish directory.
#[derive(Debug, Clone, PartialEq)]
pub struct HashedAsset {
    pub original: PathBuf,
    pub hashed: PathBuf,
    pub hash: String,
}

struct PendingAsset {
    asset: HashedAsset,
    original_name: String,
    hashed_name: String,
    content: Vec<u8>,
}

/// Characters that can continue a file name to the left of a match.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Replace whole-name occurrences of each `(from, to)` pair in one pass.
///
/// At every position the longest matching name wins.
pub fn rewrite_references(page: &str, renames: &[(String, String)]) -> String {
    let mut renames: Vec<&(String, String)> =
        renames.iter().filter(|(from, _)| !from.is_empty()).collect();
    renames.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(page.len());
    let mut prev: Option<char> = None;
    let mut rest = page;
    'scan: while let Some(c) = rest.chars().next() {
        if !prev.is_some_and(is_name_char) {
            for (from, to) in &renames {
                if rest.starts_with(from.as_str()) {
                    out.push_str(to);
                    prev = from.chars().last();
                    rest = &rest[from.len()..];
                    continue 'scan;
                }
            }
        }
        out.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn read(path: &Path) -> Result<Vec<u8>, HashError> {
    fs::read(path).map_err(|e| HashError::Read(path.to_path_buf(), e))
}

/// Rename each asset under `publish_dir` to its hashed name and rewrite every
/// reference to it in `html`.
pub fn hash_assets(
    publish_dir: &Path,
    assets: &[String],
    html: &str,
    hash_length: usize,
) -> Result<Vec<HashedAsset>, HashError> {
    let html_path = publish_dir.join(html);
    let page = String::from_utf8_lossy(&read(&html_path)?).into_owned();

    let mut pending = Vec::with_capacity(assets.len());
    for rel in assets {
        let original = PathBuf::from(rel);
        let content = read(&publish_dir.join(&original))?;
        let original_name = original
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| HashError::NoFileName(original.clone()))?;
        let hash = content_hash(&content, hash_length);
        let hashed_name = hashed_file_name(&original_name, &hash);
        let hashed = original.with_file_name(&hashed_name);
        pending.push(PendingAsset {
            asset: HashedAsset {
                original,
                hashed,
                hash,
            },
            original_name,
            hashed_name,
            content,
        });
    }

    let renames: Vec<(String, String)> = pending
        .iter()
        .map(|item| (item.original_name.clone(), item.hashed_name.clone()))
        .collect();

    let mut done = Vec::with_capacity(pending.len());
    for item in pending {
        fs::write(publish_dir.join(&item.asset.hashed), &item.content)?;
        if item.asset.hashed != item.asset.original {
            fs::remove_file(publish_dir.join(&item.asset.original))?;
        }
        done.push(item.asset);
    }

    fs::write(&html_path, rewrite_references(&page, &renames))?;
    Ok(done)
}
