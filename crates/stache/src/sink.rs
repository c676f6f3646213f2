// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Output sinks.
//!
//! A [`Sink`] receives rendered text. Besides writing, a sink decides which
//! lambda failures belong to its own failure domain: those are re-raised to
//! the caller of the render, everything else a lambda returns is treated as
//! a template-level problem and swallowed.

use crate::error::{SinkError, StacheError};
use crate::lambda::LambdaError;
use std::io;

/// Destination for rendered output.
pub trait Sink {
    /// Appends `text` to the output.
    fn write_str(&mut self, text: &str) -> Result<(), SinkError>;

    /// Claims a lambda failure as one of this sink's own failures.
    ///
    /// Returns `Ok` with the sink failure to re-raise, or gives the failure
    /// back unchanged when it is foreign to this sink.
    fn recognize(&self, failure: LambdaError) -> Result<SinkError, LambdaError> {
        SinkError::recognize(failure)
    }
}

impl SinkError {
    /// Default classification: a [`SinkError`], a [`StacheError::Sink`], or
    /// an [`io::Error`] belongs to the sink domain.
    pub fn recognize(failure: LambdaError) -> Result<SinkError, LambdaError> {
        let failure = match failure.downcast::<SinkError>() {
            Ok(err) => return Ok(*err),
            Err(other) => other,
        };
        let failure = match failure.downcast::<StacheError>() {
            Ok(err) => match *err {
                StacheError::Sink(err) => return Ok(err),
                other => return Err(Box::new(other)),
            },
            Err(other) => other,
        };
        match failure.downcast::<io::Error>() {
            Ok(err) => Ok(SinkError::Write(*err)),
            Err(other) => Err(other),
        }
    }
}

impl Sink for String {
    fn write_str(&mut self, text: &str) -> Result<(), SinkError> {
        self.try_reserve(text.len())
            .map_err(|_| SinkError::OutOfMemory)?;
        self.push_str(text);
        Ok(())
    }
}

/// A [`Sink`] over any [`io::Write`].
#[derive(Debug)]
pub struct WriteSink<W: io::Write> {
    writer: W,
}

impl<W: io::Write> WriteSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Sink for WriteSink<W> {
    fn write_str(&mut self, text: &str) -> Result<(), SinkError> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }
}
