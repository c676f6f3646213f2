// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::ast::Delimiters;
use crate::data::Value;
use crate::error::SinkError;
use crate::escape::Escape;
use crate::lambda::{Lambda, LambdaContext, LambdaHost};
use crate::resolver::Action;

/// Invokes a resolved lambda. Plain values are left alone.
///
/// Resolves to `true` when the lambda completed. A lambda failure is handed
/// to the host for classification: failures belonging to the output sink
/// abort the render, anything else resolves to `false` and the caller
/// discards whatever the lambda wrote.
pub struct ExpandLambda<'h> {
    host: &'h mut dyn LambdaHost,
    inner: &'h str,
    escape: Escape,
    delimiters: &'h Delimiters,
}

impl<'h> ExpandLambda<'h> {
    /// Prepares an invocation with the given inner text, escaping and delimiters.
    pub fn new(
        host: &'h mut dyn LambdaHost,
        inner: &'h str,
        escape: Escape,
        delimiters: &'h Delimiters,
    ) -> Self {
        Self {
            host,
            inner,
            escape,
            delimiters,
        }
    }
}

impl<'a> Action<'a> for ExpandLambda<'_> {
    type Output = bool;
    type Error = SinkError;

    fn field(&mut self, _value: Value<'a>) -> Result<bool, SinkError> {
        Ok(false)
    }

    fn lambda(&mut self, lambda: &dyn Lambda) -> Result<bool, SinkError> {
        tracing::debug!(inner_len = self.inner.len(), escape = ?self.escape, "expanding lambda");
        let mut context = LambdaContext::new(self.inner, self.escape, self.delimiters, &mut *self.host);
        let Err(failure) = lambda.call(&mut context) else {
            return Ok(true);
        };

        match self.host.recognize(failure) {
            Ok(sink_failure) => Err(sink_failure),
            Err(foreign) => {
                tracing::debug!(error = %foreign, "lambda failed, discarding its output");
                Ok(false)
            }
        }
    }
}
