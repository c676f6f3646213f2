// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::data::Value;
use crate::lambda::Lambda;
use crate::resolver::Action;
use std::convert::Infallible;

/// Returns the resolved value.
///
/// A lambda yields `None`: lambdas are only reachable for the duration of
/// the lookup and are invoked through [`ExpandLambda`](super::ExpandLambda).
#[derive(Debug, Default, Clone, Copy)]
pub struct Get;

impl<'a> Action<'a> for Get {
    type Output = Option<Value<'a>>;
    type Error = Infallible;

    fn field(&mut self, value: Value<'a>) -> Result<Self::Output, Self::Error> {
        Ok(Some(value))
    }

    fn lambda(&mut self, _lambda: &dyn Lambda) -> Result<Self::Output, Self::Error> {
        Ok(None)
    }
}
