// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Data file loading.
//!
//! Render data comes from a `.json` or `.toml` file. TOML documents are
//! converted into a [`serde_json::Value`] so both formats render the same way.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures loading a data file.
#[derive(Error, Debug)]
pub enum DataError {
    /// The file could not be read.
    #[error("failed to read data file {path}: {source}")]
    Read {
        /// The data file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// The data file.
        path: PathBuf,
        /// The parser error.
        source: serde_json::Error,
    },

    /// The file is not valid TOML.
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        /// The data file.
        path: PathBuf,
        /// The parser error.
        source: toml::de::Error,
    },

    /// The extension names neither format.
    #[error("unsupported data file {0}: expected a .json or .toml extension")]
    UnsupportedFormat(PathBuf),
}

/// Loads render data from `path`, or an empty object when there is none.
pub fn load(path: Option<&Path>) -> Result<Value, DataError> {
    let Some(path) = path else {
        return Ok(Value::Object(Default::default()));
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&Path, &str) -> Result<Value, DataError> = match extension.as_deref() {
        Some("json") => parse_json,
        Some("toml") => parse_toml,
        _ => return Err(DataError::UnsupportedFormat(path.to_path_buf())),
    };

    let content = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &content)
}

fn parse_json(path: &Path, content: &str) -> Result<Value, DataError> {
    serde_json::from_str(content).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml(path: &Path, content: &str) -> Result<Value, DataError> {
    toml::from_str(content).map_err(|source| DataError::Toml {
        path: path.to_path_buf(),
        source,
    })
}
