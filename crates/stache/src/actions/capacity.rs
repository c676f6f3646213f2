// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::data::{Data, Shape, Value};
use crate::lambda::Lambda;
use crate::resolver::Action;
use std::convert::Infallible;
use std::fmt::{self, Write};

/// Estimates the number of bytes a value renders to, before escaping.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapacityHint;

impl<'a> Action<'a> for CapacityHint {
    type Output = usize;
    type Error = Infallible;

    fn field(&mut self, value: Value<'a>) -> Result<usize, Infallible> {
        Ok(match value {
            Value::Count(count) => display_len(&count),
            Value::Ref(data) => data_len(data),
        })
    }

    fn lambda(&mut self, _lambda: &dyn Lambda) -> Result<usize, Infallible> {
        Ok(0)
    }
}

fn data_len(data: &dyn Data) -> usize {
    match data.shape() {
        Shape::Str(text) => text.len(),
        Shape::Bytes(bytes) => bytes.len(),
        Shape::Scalar(scalar) => display_len(scalar),
        Shape::Bool(true) => 4,
        Shape::Bool(false) => 5,
        Shape::Pointer(inner) | Shape::Optional(Some(inner)) => data_len(inner),
        _ => 0,
    }
}

struct Counter(usize);

impl Write for Counter {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.0 += text.len();
        Ok(())
    }
}

fn display_len(value: &dyn fmt::Display) -> usize {
    let mut counter = Counter(0);
    // counting never fails; a failing Display impl just stops the count
    let _ = write!(counter, "{value}");
    counter.0
}
