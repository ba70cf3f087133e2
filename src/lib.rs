//! # Cheatsheet Build
//!
//! Build pipeline for a documentation and cheatsheet website. Every command
//! is a one-shot, synchronous file transformation; there is no server and no
//! build graph.
//!
//! # Documentation Index
//!
//! The core of the crate turns a tree of `.cljsdoc` files into the JSON index
//! the front-end searches:
//!
//! ```text
//! docs/**/*.cljsdoc  →  sections  →  record  →  docs.json
//!                      (scan)      (validate,   (aggregate,
//!                                   transform)   serialize)
//! ```
//!
//! Each stage is a pure function except the last, so the parsing rules are
//! unit-tested without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sections`] | Splits a documentation file into `=====name` sections |
//! | [`record`] | Validates sections and derives a [`record::FunctionRecord`] |
//! | [`docs`] | Discovers files, folds records into the collection, writes `docs.json` |
//! | [`stylesheet`] | Stylesheet compiler trait and the built-in CSS compressor |
//! | [`assets`] | Cleans the publish directory and copies static files into it |
//! | [`hashing`] | Content hashes and cache-busting renames with HTML rewrite |
//! | [`snowflake`] | Audits snowflake class names between CSS and JS |
//! | [`config`] | `build.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Known Fields Plus an Extension Bag
//!
//! Documentation files may declare any section. The recognized ones become
//! typed fields on [`record::FunctionRecord`]; everything else lands in a
//! sorted string map that serde flattens into the same JSON object. No
//! dynamic property access, and the front-end sees one flat record.
//!
//! ## Deterministic Output
//!
//! Files are visited in sorted path order and every map in the artifact is a
//! `BTreeMap`, so two runs over the same tree produce byte-identical
//! `docs.json`. It also makes "the later file wins" well defined when two
//! files declare the same qualified name.
//!
//! ## Fail Before Writing
//!
//! The docs and hash steps read all of their inputs before writing anything.
//! A missing directory or unreadable file stops the run and leaves the
//! previous artifacts as they were.

pub mod assets;
pub mod config;
pub mod docs;
pub mod hashing;
pub mod output;
pub mod record;
pub mod sections;
pub mod snowflake;
pub mod stylesheet;

#[cfg(test)]
pub(crate) mod test_helpers;
