//! CLI output formatting for every build command.
//!
//! # Information-First Display
//!
//! Output leads with semantic identity (namespace, function name, asset name)
//! and shows filesystem paths as indented `Source:` context lines, so the
//! docs listing reads as an inventory of the cheatsheet's content.
//!
//! # Output Format
//!
//! ## Docs
//!
//! ```text
//! Namespaces
//! 001 cljs.core (2 functions)
//!     001 map (2 signatures)
//!         Source: cljs.core/map.cljsdoc
//!         Returns a lazy sequence consisting of the result of applyin...
//!     002 reduce (2 signatures)
//!         Source: cljs.core/reduce.cljsdoc
//!
//! Skipped
//!     draft.cljsdoc
//!
//! warning: cljs.core/map from a.cljsdoc replaced by b.cljsdoc
//! ```
//!
//! ## Cheatsheet
//!
//! ```text
//! Copied
//!     public/cheatsheet/index.html → cheatsheet/index.html
//!     public/fonts/a.woff → fonts/a.woff
//!
//! Hashed
//!     css/main.min.css → css/main.min.3f2a9c1e.css
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::assets::CopyReport;
use crate::docs::DocBuild;
use crate::hashing::HashedAsset;
use crate::record::FunctionRecord;
use crate::snowflake::SnowflakeReport;
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Singular or plural noun with its count: `1 function`, `2 functions`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Path relative to `base` when possible, for display.
fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Docs
// ============================================================================

/// Format the documentation build: functions grouped by namespace, skipped
/// files, and overwrite warnings.
pub fn format_docs_output(build: &DocBuild, source_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    let mut namespaces: BTreeMap<&str, Vec<&FunctionRecord>> = BTreeMap::new();
    for record in build.collection.values() {
        namespaces
            .entry(record.namespace.as_str())
            .or_default()
            .push(record);
    }

    lines.push("Namespaces".to_string());
    for (ns_pos, (namespace, records)) in namespaces.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(ns_pos + 1),
            namespace,
            count(records.len(), "function")
        ));
        for (pos, record) in records.iter().enumerate() {
            let name = if record.name.is_empty() {
                format!("({})", record.full_name)
            } else {
                record.name.clone()
            };
            lines.push(format!(
                "    {} {} ({})",
                format_index(pos + 1),
                name,
                count(record.signature.len(), "signature")
            ));
            if let Some(source) = build.sources.get(&record.full_name) {
                lines.push(format!("        Source: {}", display_path(source, source_dir)));
            }
            let plain = strip_html_tags(&record.description_html);
            let first_line = plain.trim().lines().next().unwrap_or_default();
            let truncated = truncate_desc(first_line, 60);
            if !truncated.is_empty() {
                lines.push(format!("        {}", truncated));
            }
        }
    }

    if !build.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for path in &build.skipped {
            lines.push(format!("    {}", display_path(path, source_dir)));
        }
    }

    if !build.overwrites.is_empty() {
        lines.push(String::new());
        for ow in &build.overwrites {
            lines.push(format!(
                "warning: {} from {} replaced by {}",
                ow.full_name,
                display_path(&ow.replaced, source_dir),
                display_path(&ow.by, source_dir)
            ));
        }
    }

    lines
}

/// Print docs output to stdout.
pub fn print_docs_output(build: &DocBuild, source_dir: &Path) {
    print_lines(format_docs_output(build, source_dir));
}

/// One-line summary after the artifact is written.
pub fn format_docs_summary(build: &DocBuild, output: &Path) -> String {
    format!(
        "Wrote {} \u{2192} {}",
        count(build.collection.len(), "function"),
        output.display()
    )
}

// ============================================================================
// Stylesheet
// ============================================================================

/// Format the stylesheet compile result.
pub fn format_stylesheet_output(source: &Path, output: &Path, bytes: usize) -> Vec<String> {
    vec![
        format!("{} \u{2192} {} ({} bytes)", source.display(), output.display(), bytes),
    ]
}

/// Print stylesheet output to stdout.
pub fn print_stylesheet_output(source: &Path, output: &Path, bytes: usize) {
    print_lines(format_stylesheet_output(source, output, bytes));
}

// ============================================================================
// Cheatsheet publishing
// ============================================================================

/// Format the copy step: every placed file plus unmatched patterns.
pub fn format_copy_output(report: &CopyReport, root: &Path) -> Vec<String> {
    let mut lines = vec!["Copied".to_string()];
    for file in &report.copied {
        lines.push(format!(
            "    {} \u{2192} {}",
            display_path(&file.source, root),
            file.dest.display()
        ));
    }
    for pattern in &report.unmatched {
        lines.push(format!("warning: no files matched: {}", pattern));
    }
    lines
}

/// Print copy output to stdout.
pub fn print_copy_output(report: &CopyReport, root: &Path) {
    print_lines(format_copy_output(report, root));
}

/// Format the cache-busting step.
pub fn format_hash_output(hashed: &[HashedAsset]) -> Vec<String> {
    let mut lines = vec!["Hashed".to_string()];
    for asset in hashed {
        lines.push(format!(
            "    {} \u{2192} {}",
            asset.original.display(),
            asset.hashed.display()
        ));
    }
    lines
}

/// Print hash output to stdout.
pub fn print_hash_output(hashed: &[HashedAsset]) {
    print_lines(format_hash_output(hashed));
}

// ============================================================================
// Snowflake audit
// ============================================================================

/// Format the class-name audit.
pub fn format_snowflake_output(report: &SnowflakeReport, css_files: &[String]) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} found in {}",
            count(report.css_classes.len(), "class name"),
            css_files.join(", ")
        ),
        format!(
            "{} found in JS files",
            count(report.js_classes.len(), "class name")
        ),
    ];
    if report.mismatched.is_empty() {
        lines.push("All class names are used on both sides".to_string());
    } else {
        lines.push("Classes found in one file but not the other:".to_string());
        for class in &report.mismatched {
            lines.push(format!("    {}", class));
        }
    }
    lines
}

/// Print snowflake output to stdout.
pub fn print_snowflake_output(report: &SnowflakeReport, css_files: &[String]) {
    print_lines(format_snowflake_output(report, css_files));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::Overwrite;
    use crate::record::transform;
    use crate::sections::scan_sections;
    use std::path::PathBuf;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn strip_html_tags_removes_tags() {
        assert_eq!(strip_html_tags("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn truncate_desc_short_text_unchanged() {
        assert_eq!(truncate_desc("short", 60), "short");
    }

    #[test]
    fn truncate_desc_long_text() {
        assert_eq!(truncate_desc("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn truncate_desc_respects_char_boundaries() {
        assert_eq!(truncate_desc("ééééé", 2), "éé...");
    }

    #[test]
    fn count_pluralizes() {
        assert_eq!(count(1, "function"), "1 function");
        assert_eq!(count(0, "function"), "0 functions");
        assert_eq!(count(3, "signature"), "3 signatures");
    }

    // =========================================================================
    // Docs output
    // =========================================================================

    fn record(full_name: &str, signatures: &str, description: &str) -> FunctionRecord {
        transform(scan_sections(&format!(
            "=====function\n{full_name}\n=====signature\n{signatures}\n=====description\n{description}\n"
        )))
    }

    fn sample_build() -> DocBuild {
        let mut build = DocBuild::default();
        for (name, sigs, desc, file) in [
            ("cljs.core/map", "(map f)\n(map f coll)", "Returns a *lazy* sequence.", "core/map.cljsdoc"),
            ("cljs.core/assoc", "(assoc m k v)", "Associates.", "core/assoc.cljsdoc"),
            ("clojure.string/join", "(join coll)", "", "string/join.cljsdoc"),
        ] {
            build
                .collection
                .insert(name.to_string(), record(name, sigs, desc));
            build
                .sources
                .insert(name.to_string(), PathBuf::from("docs").join(file));
        }
        build
    }

    #[test]
    fn docs_grouped_by_namespace() {
        let lines = format_docs_output(&sample_build(), Path::new("docs"));
        assert_eq!(lines[0], "Namespaces");
        assert_eq!(lines[1], "001 cljs.core (2 functions)");
        assert_eq!(lines[2], "    001 assoc (1 signature)");
        assert_eq!(lines[3], "        Source: core/assoc.cljsdoc");
        assert_eq!(lines[4], "        Associates.");
        assert_eq!(lines[5], "    002 map (2 signatures)");
        assert_eq!(lines[7], "        Returns a lazy sequence.");
        assert_eq!(lines[8], "002 clojure.string (1 function)");
    }

    #[test]
    fn docs_empty_description_has_no_context_line() {
        let lines = format_docs_output(&sample_build(), Path::new("docs"));
        assert_eq!(lines.last().unwrap(), "        Source: string/join.cljsdoc");
    }

    #[test]
    fn docs_unnamed_function_shows_full_name() {
        let mut build = DocBuild::default();
        build
            .collection
            .insert("standalone".into(), record("standalone", "(x)", "X."));
        let lines = format_docs_output(&build, Path::new("docs"));
        assert_eq!(lines[1], "001 standalone (1 function)");
        assert_eq!(lines[2], "    001 (standalone) (1 signature)");
    }

    #[test]
    fn docs_skipped_and_overwrites_listed() {
        let mut build = sample_build();
        build.skipped.push(PathBuf::from("docs/draft.cljsdoc"));
        build.overwrites.push(Overwrite {
            full_name: "cljs.core/map".into(),
            replaced: PathBuf::from("docs/a.cljsdoc"),
            by: PathBuf::from("docs/b.cljsdoc"),
        });

        let lines = format_docs_output(&build, Path::new("docs"));
        let skipped_at = lines.iter().position(|l| l == "Skipped").unwrap();
        assert_eq!(lines[skipped_at + 1], "    draft.cljsdoc");
        assert_eq!(
            lines.last().unwrap(),
            "warning: cljs.core/map from a.cljsdoc replaced by b.cljsdoc"
        );
    }

    #[test]
    fn docs_summary_line() {
        let summary = format_docs_summary(&sample_build(), Path::new("public/docs.json"));
        assert_eq!(summary, "Wrote 3 functions \u{2192} public/docs.json");
    }

    // =========================================================================
    // Cheatsheet output
    // =========================================================================

    #[test]
    fn copy_output_lists_files_and_unmatched() {
        let report = CopyReport {
            copied: vec![crate::assets::CopiedFile {
                source: PathBuf::from("/proj/public/favicon.png"),
                dest: PathBuf::from("favicon.png"),
            }],
            unmatched: vec!["public/img/*".into()],
        };
        let lines = format_copy_output(&report, Path::new("/proj"));
        assert_eq!(
            lines,
            vec![
                "Copied".to_string(),
                "    public/favicon.png \u{2192} favicon.png".to_string(),
                "warning: no files matched: public/img/*".to_string(),
            ]
        );
    }

    #[test]
    fn hash_output_lists_renames() {
        let hashed = vec![HashedAsset {
            original: PathBuf::from("css/main.min.css"),
            hashed: PathBuf::from("css/main.min.abcd1234.css"),
            hash: "abcd1234".into(),
        }];
        assert_eq!(
            format_hash_output(&hashed)[1],
            "    css/main.min.css \u{2192} css/main.min.abcd1234.css"
        );
    }

    // =========================================================================
    // Snowflake output
    // =========================================================================

    #[test]
    fn snowflake_output_lists_mismatches() {
        let report = SnowflakeReport {
            css_classes: ["a-11111".to_string()].into_iter().collect(),
            js_classes: ["a-11111".to_string(), "b-22222".to_string()]
                .into_iter()
                .collect(),
            mismatched: vec!["b-22222".to_string()],
        };
        let lines = format_snowflake_output(&report, &["public/css/main.min.css".into()]);
        assert_eq!(lines[0], "1 class name found in public/css/main.min.css");
        assert_eq!(lines[1], "2 class names found in JS files");
        assert_eq!(lines[2], "Classes found in one file but not the other:");
        assert_eq!(lines[3], "    b-22222");
    }

    #[test]
    fn snowflake_output_all_matched() {
        let report = SnowflakeReport::default();
        let lines = format_snowflake_output(&report, &[]);
        assert_eq!(lines[2], "All class names are used on both sides");
    }
}
