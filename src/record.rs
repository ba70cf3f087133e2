//! Validation and transformation of scanned sections into function records.
//!
//! A [`SectionMap`] qualifies as documentation when it carries the three
//! required sections (`function`, `signature`, `description`). Anything else
//! is treated as "not a documentation file" and skipped without complaint.
//!
//! The transform derives the fields the front-end reads:
//!
//! | Section        | Output field(s)                          |
//! |----------------|------------------------------------------|
//! | `function`     | `full-name`, `namespace`, `name`         |
//! | `description`  | `description-html` (markdown → HTML)     |
//! | `signature`    | `signature` (non-empty lines)            |
//! | `related`      | `related` (non-empty lines, optional)    |
//! | anything else  | passed through as a trimmed string       |

use crate::sections::SectionMap;
use pulldown_cmark::{Options, Parser, html as md_html};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sections a file must declare to be treated as documentation.
pub const REQUIRED_SECTIONS: [&str; 3] = ["function", "signature", "description"];

/// Output keys produced by the transform. Pass-through sections with these
/// names would collide with the derived values and are dropped.
const DERIVED_KEYS: [&str; 4] = ["full-name", "namespace", "name", "description-html"];

/// One documented function, as written to `docs.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Qualified name, e.g. `cljs.core/map`. Unique key in the collection.
    #[serde(rename = "full-name")]
    pub full_name: String,
    /// Text before the first `/`.
    pub namespace: String,
    /// Text after the first `/`. Empty when the name has no `/`.
    pub name: String,
    #[serde(rename = "description-html")]
    pub description_html: String,
    /// One entry per call form.
    pub signature: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<String>>,
    /// Free-form sections (`example`, `notes`, ...), trimmed and untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Whether the scanned sections describe a function.
///
/// Only presence is checked; empty sections pass.
pub fn is_valid(sections: &SectionMap) -> bool {
    REQUIRED_SECTIONS
        .iter()
        .all(|key| sections.contains_key(*key))
}

/// Validate and transform in one step. `None` means "not a documentation file".
pub fn parse_record(sections: SectionMap) -> Option<FunctionRecord> {
    if !is_valid(&sections) {
        return None;
    }
    Some(transform(sections))
}

/// Build a [`FunctionRecord`] from sections that passed [`is_valid`].
///
/// Never fails: missing required sections are read as empty strings.
pub fn transform(mut sections: SectionMap) -> FunctionRecord {
    let full_name = sections.remove("function").unwrap_or_default();
    let (namespace, name) = split_qualified_name(&full_name);
    let description = sections.remove("description").unwrap_or_default();
    let signature = split_lines(&sections.remove("signature").unwrap_or_default());
    let related = sections.remove("related").map(|r| split_lines(&r));

    for key in DERIVED_KEYS {
        sections.remove(key);
    }

    FunctionRecord {
        namespace: namespace.to_string(),
        name: name.to_string(),
        description_html: render_markdown(&description),
        signature,
        related,
        extra: sections,
        full_name,
    }
}

/// Split `namespace/name` on the first `/`.
///
/// - `"math/add"` → `("math", "add")`
/// - `"clojure.string/join"` → `("clojure.string", "join")`
/// - `"cljs.core//"` → `("cljs.core", "/")`
/// - `"standalone"` → `("standalone", "")`
pub fn split_qualified_name(full_name: &str) -> (&str, &str) {
    full_name.split_once('/').unwrap_or((full_name, ""))
}

/// Split a section body into its non-empty lines, preserving order.
///
/// `"a\n\nb\n"` → `["a", "b"]`. Whitespace-only lines are kept as written;
/// only truly empty lines are dropped.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render markdown to HTML with the extensions the cheatsheet front-end expects.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
