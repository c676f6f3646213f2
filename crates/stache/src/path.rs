// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Dotted paths and resolution depth.

use std::fmt;

/// A dotted identifier split into segments.
///
/// `a.b.c` becomes `["a", "b", "c"]`. Both `.` and the empty string denote
/// the current context and parse to an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parses a dotted identifier.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name == "." {
            return Self::default();
        }
        Self {
            segments: name.split('.').map(str::to_string).collect(),
        }
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// `true` for the self path.
    pub fn is_self(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for Path {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(".");
        }
        f.write_str(&self.segments.join("."))
    }
}

/// How deep into a context frame a path segment is evaluated.
///
/// Only a failure at [`Depth::Root`] lets the caller fall back to an
/// enclosing context frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// The first segment, evaluated against the frame itself.
    Root,
    /// Any later segment.
    Leaf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        let path = Path::parse("a.b.c");
        assert_eq!(path.segments(), ["a", "b", "c"]);
        assert_eq!(path.to_string(), "a.b.c");
    }

    #[test]
    fn test_self_paths() {
        assert!(Path::parse(".").is_self());
        assert!(Path::parse("").is_self());
        assert!(Path::parse("  ").is_self());
        assert_eq!(Path::parse("."), Path::parse(""));
        assert_eq!(Path::default().to_string(), ".");
    }
}
