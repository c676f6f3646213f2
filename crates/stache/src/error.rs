// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the stache template engine.
//!
//! This module defines [`StacheError`], the main error enum, [`SinkError`],
//! the failure domain of output sinks, and helper types for rich error
//! reporting with source context.
//!
//! # Error Categories
//!
//! - **Parse errors**: Invalid template syntax
//! - **Sink errors**: Output could not be written or allocated
//! - **Partial errors**: Partial lookup failed or nested too deeply
//! - **Delimiter errors**: An invalid delimiter pair was configured
//!
//! Missing values are *not* errors: a path that resolves to nothing renders
//! as empty output.

use std::convert::Infallible;
use std::fmt;
use std::io;
use thiserror::Error;

/// A few lines of template source around an error, with a caret under the
/// failing column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    /// Numbered source lines (1-based), up to two either side of the error.
    pub lines: Vec<(usize, String)>,
    /// Line of the error (1-based).
    pub line: usize,
    /// Column of the error in characters (1-based).
    pub column: usize,
}

impl SourceContext {
    /// Cuts the snippet for `line` and `column` out of `source`.
    pub fn from_source(source: &str, line: usize, column: usize) -> Self {
        let first = line.saturating_sub(2).max(1);
        let lines = source
            .lines()
            .enumerate()
            .map(|(index, text)| (index + 1, text.to_string()))
            .skip(first - 1)
            .take(line + 3 - first)
            .collect();

        Self {
            lines,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceContext {
    /// ```text
    ///    1 | <ul>
    ///    2 | {{#items}}
    ///      | ^
    ///    3 | </ul>
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (number, text) in &self.lines {
            writeln!(f, "{number:4} | {text}")?;
            if *number == self.line {
                writeln!(f, "     | {:>width$}", "^", width = self.column.max(1))?;
            }
        }
        Ok(())
    }
}

fn snippet(context: &Option<SourceContext>) -> String {
    context.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Failures raised by an output [`Sink`](crate::Sink).
///
/// These are the only failures that abort a render from inside the
/// resolver's actions. A lambda that fails with one of these values has
/// its failure re-raised instead of swallowed.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The underlying writer rejected the output.
    #[error("write error: {0}")]
    Write(#[from] io::Error),

    /// A formatter reported an error while producing output.
    #[error("formatting error")]
    Format(#[from] fmt::Error),

    /// The output buffer could not grow.
    #[error("out of memory while growing the output buffer")]
    OutOfMemory,
}

/// The main error type for stache operations.
#[derive(Error, Debug)]
pub enum StacheError {
    /// Template parsing failed due to invalid syntax.
    #[error("Parse error in {file:?}: {message} at line {line}, column {column}\n{}", snippet(source_context))]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred.
        line: usize,
        /// Column number where the error occurred.
        column: usize,
        /// The template name, if known.
        file: Option<String>,
        /// Source context for rich error display.
        source_context: Option<SourceContext>,
    },

    /// Output could not be written.
    #[error("Output error: {0}")]
    Sink(#[from] SinkError),

    /// A delimiter pair is unusable.
    #[error("Invalid delimiters {open:?} {close:?}: {reason}")]
    InvalidDelimiters {
        /// The opening delimiter.
        open: String,
        /// The closing delimiter.
        close: String,
        /// Why the pair was rejected.
        reason: &'static str,
    },

    /// A partial resolver failed to produce a partial.
    #[error("Partial {name:?} could not be loaded: {message}")]
    Partial {
        /// The partial name as written in the template.
        name: String,
        /// Description of the failure.
        message: String,
    },

    /// Partials nested deeper than the configured limit.
    #[error("Partial {name:?} exceeds the maximum nesting depth of {limit}")]
    PartialDepth {
        /// The partial that would have exceeded the limit.
        name: String,
        /// The configured limit.
        limit: usize,
    },
}

impl From<Infallible> for StacheError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl From<io::Error> for StacheError {
    fn from(err: io::Error) -> Self {
        StacheError::Sink(SinkError::Write(err))
    }
}

/// Convenience type alias for Results with [`StacheError`].
pub type Result<T> = std::result::Result<T, StacheError>;
