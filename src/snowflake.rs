//! Snowflake class-name audit.
//!
//! "Snowflake" class names carry a five-character hex suffix
//! (`button-3f2a9`, `nav-item-0c4e1`) so every class is globally unique and
//! trivially greppable. This audit collects the snowflake classes used by the
//! compiled stylesheets and by the scripts, then lists every class found on
//! one side but not the other: dead CSS or typos in JS.

use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Candidate class names: dash-separated words ending in five hex characters.
pub const DEFAULT_PATTERN: &str = "([a-z0-9]+-){1,}([abcdef0-9]){5}";

#[derive(Error, Debug)]
pub enum SnowflakeError {
    #[error("Failed to read {path}: {err}", path = .0.display(), err = .1)]
    Read(PathBuf, std::io::Error),
    #[error("Invalid class pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Class names must contain at least one digit and one lowercase letter.
pub fn has_numbers_and_letters(class: &str) -> bool {
    class.chars().any(|c| c.is_ascii_digit()) && class.chars().any(|c| c.is_ascii_lowercase())
}

/// Unique snowflake classes in `content`, sorted.
pub fn extract_classes(content: &str, pattern: &Regex) -> BTreeSet<String> {
    pattern
        .find_iter(content)
        .map(|m| m.as_str())
        .filter(|c| has_numbers_and_letters(c))
        .map(str::to_string)
        .collect()
}

/// Union of the snowflake classes found across `files`.
pub fn extract_from_files(
    files: &[PathBuf],
    pattern: &Regex,
) -> Result<BTreeSet<String>, SnowflakeError> {
    let mut classes = BTreeSet::new();
    for path in files {
        let content =
            fs::read_to_string(path).map_err(|e| SnowflakeError::Read(path.clone(), e))?;
        classes.extend(extract_classes(&content, pattern));
    }
    Ok(classes)
}

/// Classes present in exactly one of the two sets, sorted.
pub fn difference(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Vec<String> {
    a.symmetric_difference(b).cloned().collect()
}

/// Result of comparing stylesheet classes with script classes.
#[derive(Debug, Default)]
pub struct SnowflakeReport {
    pub css_classes: BTreeSet<String>,
    pub js_classes: BTreeSet<String>,
    /// Sorted classes found in one file set but not the other.
    pub mismatched: Vec<String>,
}

/// Run the audit over the given stylesheets and scripts.
///
/// Paths are resolved against `root`.
pub fn audit(
    root: &Path,
    css: &[String],
    js: &[String],
    pattern: &str,
) -> Result<SnowflakeReport, SnowflakeError> {
    let pattern = Regex::new(pattern)?;
    let resolve = |files: &[String]| files.iter().map(|f| root.join(f)).collect::<Vec<_>>();

    let css_classes = extract_from_files(&resolve(css), &pattern)?;
    let js_classes = extract_from_files(&resolve(js), &pattern)?;
    let mismatched = difference(&js_classes, &css_classes);

    Ok(SnowflakeReport {
        css_classes,
        js_classes,
        mismatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn default_pattern() -> Regex {
        Regex::new(DEFAULT_PATTERN).unwrap()
    }

    #[test]
    fn numbers_and_letters_required() {
        assert!(has_numbers_and_letters("button-3f2a9"));
        assert!(!has_numbers_and_letters("abcde-fabcd"));
        assert!(!has_numbers_and_letters("12345-67890"));
    }

    #[test]
    fn extracts_unique_sorted_classes() {
        let css = ".nav-item-0c4e1{x:y}.button-3f2a9{x:y}.button-3f2a9:hover{x:y}";
        let classes = extract_classes(css, &default_pattern());
        let classes: Vec<&str> = classes.iter().map(String::as_str).collect();
        assert_eq!(classes, vec!["button-3f2a9", "nav-item-0c4e1"]);
    }

    #[test]
    fn ignores_words_without_hex_suffix() {
        let js = "$('.header').addClass('active'); var x = 'sidebar-12';";
        assert!(extract_classes(js, &default_pattern()).is_empty());
    }

    #[test]
    fn drops_all_letter_matches() {
        // "fade-deadb" matches the pattern but has no digit
        assert!(extract_classes("fade-deadb", &default_pattern()).is_empty());
    }

    #[test]
    fn symmetric_difference_is_sorted() {
        let a: BTreeSet<String> = ["z-11111", "a-22222", "shared-33333"]
            .into_iter()
            .map(String::from)
            .collect();
        let b: BTreeSet<String> = ["shared-33333", "m-44444"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(difference(&a, &b), vec!["a-22222", "m-44444", "z-11111"]);
    }

    #[test]
    fn audit_over_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.css"), ".row-1a2b3{}.col-4d5e6{}").unwrap();
        fs::write(tmp.path().join("app.js"), "el.className = 'row-1a2b3';").unwrap();
        fs::write(tmp.path().join("client.js"), "$('.btn-7f8a9')").unwrap();

        let report = audit(
            tmp.path(),
            &["main.css".to_string()],
            &["app.js".to_string(), "client.js".to_string()],
            DEFAULT_PATTERN,
        )
        .unwrap();

        assert_eq!(report.css_classes.len(), 2);
        assert_eq!(report.js_classes.len(), 2);
        assert_eq!(report.mismatched, vec!["btn-7f8a9", "col-4d5e6"]);
    }

    #[test]
    fn audit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = audit(tmp.path(), &["missing.css".to_string()], &[], DEFAULT_PATTERN);
        assert!(matches!(result, Err(SnowflakeError::Read(..))));
    }

    #[test]
    fn audit_bad_pattern_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = audit(tmp.path(), &[], &[], "([a-z");
        assert!(matches!(result, Err(SnowflakeError::Pattern(_))));
    }
}
