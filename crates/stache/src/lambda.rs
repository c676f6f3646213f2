// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Lambdas: callable members of host data.
//!
//! A lambda is invoked with a [`LambdaContext`] carrying the raw inner text
//! of the section that named it, the active escaping and delimiters, and a
//! handle back into the renderer. It may write a literal substitute, render
//! any text as a template against the current context stack, or both.
//!
//! Lambda failures are open-ended ([`LambdaError`]). When one is returned the
//! output sink decides whether it is one of the sink's own failures (which
//! aborts the render) or a template-level failure (which is logged and
//! replaced by whatever output the lambda produced before failing).

use crate::ast::Delimiters;
use crate::error::{SinkError, StacheError};
use crate::escape::Escape;
use std::fmt::Display;
use std::marker::PhantomData;

/// The failure type of lambda invocations.
pub type LambdaError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A callable capability.
pub trait Lambda {
    /// Invokes the lambda.
    fn call(&self, context: &mut LambdaContext<'_>) -> Result<(), LambdaError>;
}

/// The renderer side of a lambda invocation.
pub trait LambdaHost {
    /// Writes `text` to the output with `escape` applied.
    fn write(&mut self, text: &str, escape: Escape) -> Result<(), SinkError>;

    /// Renders `template` against the current context stack.
    fn render(
        &mut self,
        template: &str,
        delimiters: &Delimiters,
        escape: Escape,
    ) -> Result<(), StacheError>;

    /// Classifies a lambda failure, see [`Sink::recognize`](crate::Sink::recognize).
    fn recognize(&self, failure: LambdaError) -> Result<SinkError, LambdaError>;
}

/// What a lambda sees when it is invoked.
pub struct LambdaContext<'c> {
    inner: &'c str,
    escape: Escape,
    delimiters: &'c Delimiters,
    host: &'c mut dyn LambdaHost,
}

impl<'c> LambdaContext<'c> {
    /// Creates a context for one invocation.
    pub fn new(
        inner: &'c str,
        escape: Escape,
        delimiters: &'c Delimiters,
        host: &'c mut dyn LambdaHost,
    ) -> Self {
        Self {
            inner,
            escape,
            delimiters,
            host,
        }
    }

    /// The unrendered text between the section's open and close tags.
    ///
    /// Empty for lambdas used as interpolations.
    pub fn inner_text(&self) -> &str {
        self.inner
    }

    /// The escaping applied by [`write`](Self::write) and [`render`](Self::render).
    pub fn escape(&self) -> Escape {
        self.escape
    }

    /// The delimiters templates are rendered with.
    pub fn delimiters(&self) -> &Delimiters {
        self.delimiters
    }

    /// Writes literal text, escaped per [`escape`](Self::escape).
    pub fn write(&mut self, text: &str) -> Result<(), SinkError> {
        self.host.write(text, self.escape)
    }

    /// Writes literal text without escaping.
    pub fn write_raw(&mut self, text: &str) -> Result<(), SinkError> {
        self.host.write(text, Escape::None)
    }

    /// Renders `template` against the current context stack.
    pub fn render(&mut self, template: &str) -> Result<(), StacheError> {
        self.host.render(template, self.delimiters, self.escape)
    }

    /// Renders the inner text against the current context stack.
    pub fn render_inner(&mut self) -> Result<(), StacheError> {
        let inner = self.inner;
        self.render(inner)
    }
}

/// A lambda stored as data.
///
/// ```rust
/// use std::collections::HashMap;
/// use stache::{LambdaContext, LambdaFn};
///
/// let mut data = HashMap::new();
/// data.insert(
///     "wrapped".to_string(),
///     LambdaFn::new(|ctx: &mut LambdaContext<'_>| {
///         ctx.write_raw("<b>")?;
///         ctx.render_inner()?;
///         ctx.write_raw("</b>")?;
///         Ok(())
///     }),
/// );
///
/// let out = stache::render("{{#wrapped}}hi{{/wrapped}}", &data).unwrap();
/// assert_eq!(out, "<b>hi</b>");
/// ```
pub struct LambdaFn {
    call: Box<dyn Fn(&mut LambdaContext<'_>) -> Result<(), LambdaError> + Send + Sync>,
}

impl LambdaFn {
    /// Wraps a closure receiving the evaluation context.
    pub fn new<F>(call: F) -> Self
    where
        F: Fn(&mut LambdaContext<'_>) -> Result<(), LambdaError> + Send + Sync + 'static,
    {
        Self {
            call: Box::new(call),
        }
    }

    /// Wraps a closure mapping the inner text to a template that is rendered
    /// in its place.
    pub fn expand<F, S>(expand: F) -> Self
    where
        F: Fn(&str) -> S + Send + Sync + 'static,
        S: Display,
    {
        Self::new(move |ctx| {
            let template = expand(ctx.inner_text()).to_string();
            ctx.render(&template)?;
            Ok(())
        })
    }
}

impl Lambda for LambdaFn {
    fn call(&self, context: &mut LambdaContext<'_>) -> Result<(), LambdaError> {
        (self.call)(context)
    }
}

impl crate::Data for LambdaFn {
    fn shape(&self) -> crate::Shape<'_> {
        crate::Shape::Lambda(self)
    }
}

impl std::fmt::Debug for LambdaFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LambdaFn")
    }
}

/// The result of looking up a callable member on a record.
pub enum Method<'a> {
    /// A usable lambda bound to its receiver.
    Bound(Box<dyn Lambda + 'a>),
    /// A member with that name exists but cannot be called as a lambda.
    Unusable,
}

impl<'a> Method<'a> {
    /// Binds `method` to `receiver`.
    ///
    /// `method` is either `Fn(&T) -> impl Display` (its result is rendered
    /// as a template) or `Fn(&T, &mut LambdaContext) -> Result<(), E>`.
    pub fn bind<T, M, F>(receiver: &'a T, method: F) -> Self
    where
        T: ?Sized,
        F: LambdaMethod<T, M> + 'a,
        M: 'a,
    {
        Method::Bound(Box::new(BoundMethod {
            receiver,
            method,
            marker: PhantomData,
        }))
    }
}

/// Marker for methods taking only their receiver.
pub struct ReceiverOnly;

/// Marker for methods taking their receiver and a [`LambdaContext`].
pub struct WithContext;

/// Functions that can be bound to a receiver as a lambda.
///
/// `M` only disambiguates the two accepted signatures.
pub trait LambdaMethod<T: ?Sized, M> {
    /// Invokes the function on `receiver`.
    fn invoke(&self, receiver: &T, context: &mut LambdaContext<'_>) -> Result<(), LambdaError>;
}

impl<T, F, S> LambdaMethod<T, (ReceiverOnly, S)> for F
where
    T: ?Sized,
    F: Fn(&T) -> S,
    S: Display,
{
    fn invoke(&self, receiver: &T, context: &mut LambdaContext<'_>) -> Result<(), LambdaError> {
        let template = self(receiver).to_string();
        context.render(&template)?;
        Ok(())
    }
}

impl<T, F, E> LambdaMethod<T, (WithContext, E)> for F
where
    T: ?Sized,
    F: Fn(&T, &mut LambdaContext<'_>) -> Result<(), E>,
    E: Into<LambdaError>,
{
    fn invoke(&self, receiver: &T, context: &mut LambdaContext<'_>) -> Result<(), LambdaError> {
        self(receiver, context).map_err(Into::into)
    }
}

struct BoundMethod<'a, T: ?Sized, F, M> {
    receiver: &'a T,
    method: F,
    marker: PhantomData<fn() -> M>,
}

impl<T, F, M> Lambda for BoundMethod<'_, T, F, M>
where
    T: ?Sized,
    F: LambdaMethod<T, M>,
{
    fn call(&self, context: &mut LambdaContext<'_>) -> Result<(), LambdaError> {
        self.method.invoke(self.receiver, context)
    }
}
