//! Stylesheet compilation.
//!
//! The [`StylesheetCompiler`] trait turns a source stylesheet into the CSS
//! text shipped with the site. The built-in [`CssCompiler`] reads plain CSS
//! and optionally compresses it; preprocessors can be plugged in behind the
//! same trait.
//!
//! ## Compression
//!
//! With `compress` enabled the output has comments stripped, whitespace runs
//! collapsed, and no whitespace around `{`, `}`, `;`, `,`, `>` or after `:`.
//! The final `;` in a block is dropped. Quoted strings are left untouched.
//!
//! ```text
//! a > b {              a>b{color:red;margin:0 auto}
//!     color: red;  →
//!     margin: 0 auto;
//! }
//! ```

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read stylesheet {0}: {1}")]
    Source(String, std::io::Error),
    #[error("Unterminated {0} in stylesheet")]
    Unterminated(&'static str),
}

/// Source stylesheet → compiled CSS text.
pub trait StylesheetCompiler {
    fn compile(&self, source: &Path) -> Result<String, StylesheetError>;
}

/// Plain CSS passthrough with optional compression.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssCompiler {
    pub compress: bool,
}

impl CssCompiler {
    pub fn new(compress: bool) -> Self {
        Self { compress }
    }
}

impl StylesheetCompiler for CssCompiler {
    fn compile(&self, source: &Path) -> Result<String, StylesheetError> {
        let css = fs::read_to_string(source)
            .map_err(|e| StylesheetError::Source(source.display().to_string(), e))?;
        if self.compress {
            compress_css(&css)
        } else {
            Ok(css)
        }
    }
}

/// Characters that need no surrounding whitespace.
fn is_tight(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | ',' | '>')
}

/// Strip comments and redundant whitespace from CSS.
pub fn compress_css(css: &str) -> Result<String, StylesheetError> {
    let mut out = String::with_capacity(css.len());
    let mut pending_space = false;
    let mut chars = css.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                loop {
                    match chars.next() {
                        Some('/') if prev == '*' => break,
                        Some(ch) => prev = ch,
                        None => return Err(StylesheetError::Unterminated("comment")),
                    }
                }
                pending_space = true;
            }
            c if c.is_whitespace() => pending_space = true,
            c if is_tight(c) => {
                if c == '}' && out.ends_with(';') {
                    out.pop();
                }
                out.push(c);
                pending_space = false;
            }
            _ => {
                if pending_space
                    && !out.is_empty()
                    && !out.ends_with(|p: char| is_tight(p) || p == ':')
                {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
                if c == '"' || c == '\'' {
                    copy_string(c, &mut chars, &mut out)?;
                }
            }
        }
    }

    Ok(out)
}

/// Copy the rest of a quoted string, including its closing quote.
fn copy_string(
    quote: char,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    out: &mut String,
) -> Result<(), StylesheetError> {
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if c == quote {
            return Ok(());
        }
    }
    Err(StylesheetError::Unterminated("string"))
}

/// Compile `source` and write the result to `output`, creating parent
/// directories. Returns the number of bytes written.
pub fn compile_stylesheet(
    compiler: &dyn StylesheetCompiler,
    source: &Path,
    output: &Path,
) -> Result<usize, StylesheetError> {
    let css = compiler.compile(source)?;
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &css)?;
    Ok(css.len())
}
