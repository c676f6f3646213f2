// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! stache CLI configuration.
//!
//! Configuration is loaded from `stache.toml` in the working directory, or
//! from the file given with `--config`. Every table and field is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! [render]
//! escape = "html"
//! max_partial_depth = 16
//! delimiters = { open = "{{", close = "}}" }
//!
//! [partials]
//! dir = "templates/partials"
//! extension = "mustache"
//! ```

use anyhow::Context;
use serde::Deserialize;
use stache::Options;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "stache.toml";

/// Main configuration structure loaded from `stache.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Engine options.
    #[serde(default)]
    pub render: Options,
    /// Where partials are read from.
    #[serde(default)]
    pub partials: PartialsConfig,
}

/// Partials directory settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PartialsConfig {
    /// Directory containing partials (default: none, every partial is empty).
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// File extension of partial files, without the dot (default: "mustache").
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "mustache".to_string()
}

impl Default for PartialsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, `stache.toml` in the
    /// working directory is read when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(CONFIG_FILE);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("invalid configuration in {}", config_path.display()))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }
}
