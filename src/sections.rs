//! Section scanner for `.cljsdoc` source files.
//!
//! A documentation file is a sequence of named blocks. Each block starts with a
//! delimiter line made of five or more `=` characters followed by the section
//! name:
//!
//! ```text
//! =====function
//! cljs.core/map
//! =====signature
//! (map f)
//! (map f coll)
//! =====description
//! Returns a lazy sequence of applying `f` to each item in `coll`.
//! ```
//!
//! Section names are case-folded, so `=====Signature` and `=====signature`
//! land on the same key. Anything before the first delimiter is ignored.

use std::collections::BTreeMap;

/// Minimum run of `=` that marks a section delimiter line.
const DELIMITER_RUN: usize = 5;

/// Section name → trimmed section body.
pub type SectionMap = BTreeMap<String, String>;

/// Whether a line opens a new section.
pub fn is_section_line(line: &str) -> bool {
    line.chars().take_while(|&c| c == '=').count() >= DELIMITER_RUN
}

/// Extract the lowercased section name from a delimiter line.
///
/// `"===== Signature "` → `"signature"`
fn section_name(line: &str) -> String {
    line.trim_start_matches('=').trim().to_lowercase()
}

/// Split one documentation file into its named sections.
///
/// Every value is trimmed before returning. A section with no body maps to an
/// empty string; a file with no delimiter lines yields an empty map. When the
/// same name appears twice, the later block replaces the earlier one.
pub fn scan_sections(content: &str) -> SectionMap {
    let mut sections = SectionMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        if is_section_line(line) {
            let name = section_name(line);
            sections.insert(name.clone(), String::new());
            current = Some(name);
            continue;
        }

        let Some(name) = current.as_ref() else {
            continue;
        };
        if let Some(body) = sections.get_mut(name) {
            body.push_str(line);
            body.push('\n');
        }
    }

    for body in sections.values_mut() {
        *body = body.trim().to_string();
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_needs_five_equals() {
        assert!(is_section_line("=====function"));
        assert!(is_section_line("========== related"));
        assert!(!is_section_line("====function"));
        assert!(!is_section_line(" =====function"));
        assert!(!is_section_line("plain text"));
    }

    #[test]
    fn scans_named_sections() {
        let sections = scan_sections(
            "=====function\nmath/add\n=====signature\n(add a b)\n=====description\nAdds.\n",
        );
        assert_eq!(sections.len(), 3);
        assert_eq!(sections["function"], "math/add");
        assert_eq!(sections["signature"], "(add a b)");
        assert_eq!(sections["description"], "Adds.");
    }

    #[test]
    fn section_names_are_lowercased_and_trimmed() {
        let sections = scan_sections("=====  Signature  \n(f)\n");
        assert_eq!(sections["signature"], "(f)");
    }

    #[test]
    fn longer_delimiter_runs_are_stripped() {
        let sections = scan_sections("==========Related\na/b\n");
        assert_eq!(sections["related"], "a/b");
    }

    #[test]
    fn lines_before_first_delimiter_are_discarded() {
        let sections = scan_sections("preamble\nmore\n=====function\nns/f\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["function"], "ns/f");
    }

    #[test]
    fn no_delimiters_yields_empty_map() {
        assert!(scan_sections("just some text\nand more\n").is_empty());
        assert!(scan_sections("").is_empty());
    }

    #[test]
    fn empty_section_keeps_its_key() {
        let sections = scan_sections("=====related\n=====function\nns/f\n");
        assert_eq!(sections["related"], "");
        assert_eq!(sections["function"], "ns/f");
    }

    #[test]
    fn bodies_are_trimmed_but_inner_blank_lines_kept() {
        let sections = scan_sections("=====signature\n\n  (f a)\n\n(f a b)  \n\n");
        assert_eq!(sections["signature"], "(f a)\n\n(f a b)");
    }

    #[test]
    fn crlf_line_endings() {
        let sections = scan_sections("=====function\r\nns/f\r\n=====signature\r\n(f)\r\n(f x)\r\n");
        assert_eq!(sections["function"], "ns/f");
        assert_eq!(sections["signature"], "(f)\n(f x)");
    }

    #[test]
    fn repeated_section_name_keeps_last_block() {
        let sections = scan_sections("=====example\nfirst\n=====EXAMPLE\nsecond\n");
        assert_eq!(sections["example"], "second");
    }
}
