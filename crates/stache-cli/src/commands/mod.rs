// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `render`: Render a template file to stdout or a file
//! - `check`: Compile template files and report syntax errors

/// Template syntax check command.
pub mod check;
/// Template render command.
pub mod render;
