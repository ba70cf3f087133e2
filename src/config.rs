//! Build configuration module.
//!
//! Handles loading, validating, and merging `build.toml`. Stock defaults
//! describe the standard cheatsheet project layout; a `build.toml` in the
//! project root only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [docs]
//! source_dir = "docs"              # Scanned recursively
//! extension = "cljsdoc"            # Only files with this extension are parsed
//! output = "public/docs.json"      # Aggregate artifact
//!
//! [stylesheet]
//! source = "styles/main.css"
//! output = "public/css/main.min.css"
//! compress = true
//!
//! [cheatsheet]
//! publish_dir = "00-publish"
//! html = "cheatsheet/index.html"   # Relative to publish_dir
//! hash = ["css/main.min.css", "js/cheatsheet.min.js"]
//! hash_length = 8
//!
//! [[cheatsheet.copy]]
//! src = "public/fonts/*"           # Relative to the project root, globs allowed
//! dest = "fonts/"                  # Relative to publish_dir
//!
//! [snowflake]
//! css = ["public/css/main.min.css"]
//! js = ["app.js", "public/js/client.min.js"]
//! pattern = "([a-z0-9]+-){1,}([abcdef0-9]){5}"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Arrays (including the
//! `[[cheatsheet.copy]]` list) replace the stock value wholesale.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the project configuration.
pub const CONFIG_FILENAME: &str = "build.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `build.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Documentation source discovery and artifact location.
    pub docs: DocsConfig,
    /// Stylesheet compilation.
    pub stylesheet: StylesheetConfig,
    /// Publish directory layout, copy list, and cache-busting.
    pub cheatsheet: CheatsheetConfig,
    /// Class-name audit inputs.
    pub snowflake: SnowflakeConfig,
}

impl BuildConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.docs.extension().is_empty() {
            return Err(ConfigError::Validation(
                "docs.extension must not be empty".into(),
            ));
        }
        if self.docs.output.is_empty() {
            return Err(ConfigError::Validation(
                "docs.output must not be empty".into(),
            ));
        }
        if self.stylesheet.output.is_empty() {
            return Err(ConfigError::Validation(
                "stylesheet.output must not be empty".into(),
            ));
        }
        if !(1..=64).contains(&self.cheatsheet.hash_length) {
            return Err(ConfigError::Validation(
                "cheatsheet.hash_length must be 1-64".into(),
            ));
        }
        if let Err(e) = Regex::new(&self.snowflake.pattern) {
            return Err(ConfigError::Validation(format!(
                "snowflake.pattern is not a valid regex: {e}"
            )));
        }
        Ok(())
    }
}

/// Documentation source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Directory scanned recursively for documentation files.
    pub source_dir: String,
    /// File extension of documentation files, with or without a leading dot.
    #[serde(rename = "extension")]
    pub raw_extension: String,
    /// Path of the generated JSON index.
    pub output: String,
}

impl DocsConfig {
    /// Extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.raw_extension.trim_start_matches('.')
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: "docs".to_string(),
            raw_extension: "cljsdoc".to_string(),
            output: "public/docs.json".to_string(),
        }
    }
}

/// Stylesheet compilation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesheetConfig {
    /// Source stylesheet.
    pub source: String,
    /// Compiled output.
    pub output: String,
    /// Strip comments and redundant whitespace.
    pub compress: bool,
}

impl Default for StylesheetConfig {
    fn default() -> Self {
        Self {
            source: "styles/main.css".to_string(),
            output: "public/css/main.min.css".to_string(),
            compress: true,
        }
    }
}

/// One file (or glob) copied into the publish directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyEntry {
    /// Source path relative to the project root. May be a glob pattern.
    pub src: String,
    /// Destination relative to the publish directory. A directory when `src`
    /// is a glob.
    pub dest: String,
}

impl CopyEntry {
    fn new(src: &str, dest: &str) -> Self {
        Self {
            src: src.to_string(),
            dest: dest.to_string(),
        }
    }
}

/// Cheatsheet publishing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheatsheetConfig {
    /// Output directory, wiped at the start of every cheatsheet build.
    pub publish_dir: String,
    /// HTML page whose asset references are rewritten, relative to `publish_dir`.
    pub html: String,
    /// Assets renamed with a content hash, relative to `publish_dir`.
    pub hash: Vec<String>,
    /// Number of hex characters of the content hash kept in file names.
    pub hash_length: usize,
    /// Files copied into `publish_dir`.
    pub copy: Vec<CopyEntry>,
}

impl Default for CheatsheetConfig {
    fn default() -> Self {
        Self {
            publish_dir: "00-publish".to_string(),
            html: "cheatsheet/index.html".to_string(),
            hash: vec![
                "css/main.min.css".to_string(),
                "js/cheatsheet.min.js".to_string(),
            ],
            hash_length: 8,
            copy: vec![
                CopyEntry::new("public/cheatsheet/index.html", "cheatsheet/index.html"),
                CopyEntry::new("public/css/main.min.css", "css/main.min.css"),
                CopyEntry::new("public/fonts/*", "fonts/"),
                CopyEntry::new("public/img/*", "img/"),
                CopyEntry::new("public/js/cheatsheet.min.js", "js/cheatsheet.min.js"),
                CopyEntry::new(
                    "public/js/libs/jquery-2.1.1.min.js",
                    "js/libs/jquery-2.1.1.min.js",
                ),
                CopyEntry::new("public/favicon.png", "favicon.png"),
            ],
        }
    }
}

/// Class-name audit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnowflakeConfig {
    /// Compiled stylesheets.
    pub css: Vec<String>,
    /// Scripts referencing class names.
    pub js: Vec<String>,
    /// Regex matching candidate class names.
    pub pattern: String,
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self {
            css: vec!["public/css/main.min.css".to_string()],
            js: vec!["app.js".to_string(), "public/js/client.min.js".to_string()],
            pattern: crate::snowflake::DEFAULT_PATTERN.to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(BuildConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `build.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it is invalid TOML.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BuildConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the project config from `build.toml` in `root`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<BuildConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `build.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Cheatsheet Build Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the project
# root unless stated otherwise. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Documentation index
# ---------------------------------------------------------------------------
[docs]
# Directory scanned recursively for documentation files.
source_dir = "docs"

# Only files with this extension are parsed.
extension = "cljsdoc"

# Generated JSON index, overwritten on every run.
output = "public/docs.json"

# ---------------------------------------------------------------------------
# Stylesheet
# ---------------------------------------------------------------------------
[stylesheet]
source = "styles/main.css"
output = "public/css/main.min.css"

# Strip comments and redundant whitespace.
compress = true

# ---------------------------------------------------------------------------
# Cheatsheet publishing
# ---------------------------------------------------------------------------
[cheatsheet]
# Wiped at the start of every cheatsheet build.
publish_dir = "00-publish"

# Page whose asset references are rewritten (relative to publish_dir).
html = "cheatsheet/index.html"

# Assets renamed with a content hash (relative to publish_dir).
hash = ["css/main.min.css", "js/cheatsheet.min.js"]

# Hex characters of the content hash kept in file names (1-64).
hash_length = 8

# Files copied into publish_dir. `src` may be a glob; matches are copied
# flat into the `dest` directory.
[[cheatsheet.copy]]
src = "public/cheatsheet/index.html"
dest = "cheatsheet/index.html"

[[cheatsheet.copy]]
src = "public/css/main.min.css"
dest = "css/main.min.css"

[[cheatsheet.copy]]
src = "public/fonts/*"
dest = "fonts/"

[[cheatsheet.copy]]
src = "public/img/*"
dest = "img/"

[[cheatsheet.copy]]
src = "public/js/cheatsheet.min.js"
dest = "js/cheatsheet.min.js"

[[cheatsheet.copy]]
src = "public/js/libs/jquery-2.1.1.min.js"
dest = "js/libs/jquery-2.1.1.min.js"

[[cheatsheet.copy]]
src = "public/favicon.png"
dest = "favicon.png"

# ---------------------------------------------------------------------------
# Snowflake class audit
# ---------------------------------------------------------------------------
[snowflake]
css = ["public/css/main.min.css"]
js = ["app.js", "public/js/client.min.js"]

# Candidate class names. Matches must also contain a digit and a letter.
pattern = "([a-z0-9]+-){1,}([abcdef0-9]){5}"
"##
}
