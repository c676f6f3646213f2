// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::data::{Data, Shape, Value};
use crate::error::SinkError;
use crate::escape::{write_escaped, Escape};
use crate::lambda::Lambda;
use crate::resolver::Action;
use crate::sink::Sink;

/// Writes the resolved value to a sink.
///
/// Strings, bytes (as lossy UTF-8), scalars and booleans have a textual
/// form. Records, sequences, tuples and absent optionals write nothing.
/// Lambdas are left to [`ExpandLambda`](super::ExpandLambda).
pub struct Interpolate<'s> {
    sink: &'s mut dyn Sink,
    escape: Escape,
}

impl<'s> Interpolate<'s> {
    /// Writes into `sink` with `escape` applied.
    pub fn new(sink: &'s mut dyn Sink, escape: Escape) -> Self {
        Self { sink, escape }
    }
}

impl<'a> Action<'a> for Interpolate<'_> {
    type Output = ();
    type Error = SinkError;

    fn field(&mut self, value: Value<'a>) -> Result<(), SinkError> {
        write_value(&mut *self.sink, value, self.escape)
    }

    fn lambda(&mut self, _lambda: &dyn Lambda) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes the textual form of `value`, if it has one.
pub fn write_value(sink: &mut dyn Sink, value: Value<'_>, escape: Escape) -> Result<(), SinkError> {
    match value {
        Value::Count(count) => sink.write_str(&count.to_string()),
        Value::Ref(data) => write_data(sink, data, escape),
    }
}

fn write_data(sink: &mut dyn Sink, data: &dyn Data, escape: Escape) -> Result<(), SinkError> {
    match data.shape() {
        Shape::Str(text) => write_escaped(sink, text, escape),
        Shape::Bytes(bytes) => write_escaped(sink, &String::from_utf8_lossy(bytes), escape),
        Shape::Scalar(scalar) => write_escaped(sink, &scalar.to_string(), escape),
        Shape::Bool(flag) => sink.write_str(if flag { "true" } else { "false" }),
        Shape::Pointer(inner) | Shape::Optional(Some(inner)) => write_data(sink, inner, escape),
        Shape::Optional(None)
        | Shape::Record(_)
        | Shape::Sequence(_)
        | Shape::Tuple(_)
        | Shape::Lambda(_) => Ok(()),
    }
}
