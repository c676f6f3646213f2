// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Rendering options.
//!
//! [`Options`] deserializes from any serde format with every field optional,
//! e.g. as the `[render]` table of a TOML file:
//!
//! ```toml
//! escape = "none"
//! max_partial_depth = 16
//! delimiters = { open = "<%", close = "%>" }
//! ```

use crate::ast::Delimiters;
use crate::escape::Escape;
use serde::Deserialize;

/// Engine-wide rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Options {
    /// Escaping for `{{name}}` tags. [`Escape::None`] makes every tag raw.
    #[serde(default)]
    pub escape: Escape,

    /// Delimiters templates start with (default: `{{` `}}`).
    #[serde(default)]
    pub delimiters: Delimiters,

    /// How deeply partials may include partials (default: 32).
    #[serde(default = "default_max_partial_depth")]
    pub max_partial_depth: usize,
}

fn default_max_partial_depth() -> usize {
    32
}

impl Default for Options {
    fn default() -> Self {
        Self {
            escape: Escape::default(),
            delimiters: Delimiters::default(),
            max_partial_depth: default_max_partial_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let options: Options = serde_json::from_str(r#"{"escape":"none"}"#).unwrap();
        assert_eq!(options.escape, Escape::None);
        assert_eq!(options.delimiters, Delimiters::default());
        assert_eq!(options.max_partial_depth, 32);
        assert_eq!(
            serde_json::from_str::<Options>("{}").unwrap(),
            Options::default()
        );
    }
}
