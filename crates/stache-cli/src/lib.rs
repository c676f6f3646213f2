// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! stache CLI library.
//!
//! This crate provides the command-line interface for the stache Mustache
//! engine: rendering a template file against JSON or TOML data, and checking
//! template files for syntax errors.
//!
//! # Usage
//!
//! This crate is primarily used through the `stache` binary:
//!
//! ```bash
//! stache render page.mustache --data page.json --partials partials/
//! stache check "templates/**/*.mustache"
//! ```
//!
//! # Configuration
//!
//! Rendering options and the partials directory can be set in `stache.toml`
//! in the working directory.

/// CLI commands (render, check).
pub mod commands;
/// Configuration from `stache.toml`.
pub mod config;
/// Data file loading.
pub mod data;
/// Partials read from a directory.
pub mod partials;
