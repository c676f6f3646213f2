// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Instruction tree for compiled templates.
//!
//! The parser turns template source into a [`Template`]: a list of [`Node`]s
//! in which stand-alone whitespace has already been removed and sections
//! hold their children. The tree is immutable and can be rendered any
//! number of times, from any thread.
//!
//! # Node Types
//!
//! - literal text
//! - interpolations (`{{name}}`, `{{{name}}}`, `{{&name}}`)
//! - sections and inverted sections (`{{#name}}...{{/name}}`, `{{^name}}...{{/name}}`)
//! - partials (`{{>name}}`)
//!
//! Comments and set-delimiter tags leave no node behind.

use crate::error::StacheError;
use crate::escape::Escape;
use crate::path::Path;
use serde::Deserialize;

/// An opening and closing tag delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawDelimiters")]
pub struct Delimiters {
    open: String,
    close: String,
}

#[derive(Deserialize)]
struct RawDelimiters {
    open: String,
    close: String,
}

impl TryFrom<RawDelimiters> for Delimiters {
    type Error = StacheError;

    fn try_from(raw: RawDelimiters) -> Result<Self, Self::Error> {
        Delimiters::new(raw.open, raw.close)
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "{{".to_string(),
            close: "}}".to_string(),
        }
    }
}

impl Delimiters {
    /// Creates a validated delimiter pair.
    ///
    /// Neither delimiter may be empty or contain whitespace or `=`.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, StacheError> {
        let open = open.into();
        let close = close.into();

        let reason = if open.is_empty() || close.is_empty() {
            Some("delimiters must not be empty")
        } else if open.contains(char::is_whitespace) || close.contains(char::is_whitespace) {
            Some("delimiters must not contain whitespace")
        } else if open.contains('=') || close.contains('=') {
            Some("delimiters must not contain '='")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StacheError::InvalidDelimiters {
                open,
                close,
                reason,
            }),
            None => Ok(Self { open, close }),
        }
    }

    /// The opening delimiter.
    pub fn open(&self) -> &str {
        &self.open
    }

    /// The closing delimiter.
    pub fn close(&self) -> &str {
        &self.close
    }
}

/// Location of a tag in its template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the opening delimiter.
    pub start: usize,
    /// Byte offset just past the closing delimiter.
    pub end: usize,
    /// 1-based line of `start`.
    pub line: usize,
    /// 1-based column of `start`, in characters.
    pub column: usize,
}

/// A compiled template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    /// The template name, when compiled from a named source (a partial or a file).
    pub name: Option<String>,
    /// Top-level nodes.
    pub nodes: Vec<Node>,
}

/// One instruction of a compiled template.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, written unchanged.
    Text(String),
    /// A value lookup written to the output.
    Interpolation {
        /// The dotted path to resolve.
        path: Path,
        /// Escaping requested by the tag.
        escape: Escape,
        /// Tag location.
        span: Span,
    },
    /// A section or inverted section.
    Section {
        /// The dotted path to resolve.
        path: Path,
        /// `true` for `{{^name}}`.
        inverted: bool,
        /// Nodes between the open and close tags.
        children: Vec<Node>,
        /// Raw source between the open and close tags, handed to lambdas.
        inner: String,
        /// Delimiters active at the open tag.
        delimiters: Delimiters,
        /// Location of the open tag.
        span: Span,
    },
    /// A partial inclusion.
    Partial {
        /// The partial name.
        name: String,
        /// Whitespace preceding a stand-alone partial tag, prepended to every
        /// line of the partial.
        indentation: String,
        /// Tag location.
        span: Span,
    },
}

impl Template {
    /// Rough number of output bytes contributed by literal text.
    pub fn literal_len(&self) -> usize {
        fn walk(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::Text(text) => text.len(),
                    Node::Section { children, .. } => walk(children),
                    _ => 0,
                })
                .sum()
        }
        walk(&self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delimiters() {
        let delimiters = Delimiters::default();
        assert_eq!(delimiters.open(), "{{");
        assert_eq!(delimiters.close(), "}}");
    }

    #[test]
    fn test_rejects_bad_delimiters() {
        assert!(Delimiters::new("", "}}").is_err());
        assert!(Delimiters::new("< %", "%>").is_err());
        assert!(Delimiters::new("<=", "=>").is_err());
        let ok = Delimiters::new("<%", "%>").unwrap();
        assert_eq!(ok.open(), "<%");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Delimiters = serde_json::from_str(r#"{"open":"[[","close":"]]"}"#).unwrap();
        assert_eq!(ok.close(), "]]");
        let bad: Result<Delimiters, _> = serde_json::from_str(r#"{"open":"","close":"]]"}"#);
        assert!(bad.is_err());
    }
}
