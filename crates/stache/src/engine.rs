// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template engine for compiling and rendering templates.
//!
//! This module provides the [`Engine`] type, which compiles template source
//! into a [`Template`] and renders templates against host [`Data`].
//!
//! # Quick Start
//!
//! ```rust
//! use stache::{Engine, MemoryPartials};
//! use std::collections::HashMap;
//!
//! let partials = MemoryPartials::new().with("item", "<li>{{.}}</li>\n");
//! let engine = Engine::with_partials(partials);
//!
//! let template = engine.compile("<ul>\n{{#items}}\n  {{>item}}\n{{/items}}\n</ul>\n")?;
//! let mut data = HashMap::new();
//! data.insert("items".to_string(), vec!["a", "b"]);
//!
//! let html = engine.render(&template, &data)?;
//! assert_eq!(html, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n");
//! # Ok::<(), stache::StacheError>(())
//! ```
//!
//! # Rendering
//!
//! Rendering keeps a stack of context frames, starting with the data passed
//! in. Sections push the values they iterate over. A lookup is tried against
//! the innermost frame first and moves outwards only while the path's first
//! segment is missing (see [`resolve_frames`]).
//!
//! # Thread Safety
//!
//! Engines and compiled templates are immutable and `Send + Sync` whenever
//! the partial resolver is. Each render keeps its own state.

use crate::actions::{CapacityHint, ExpandLambda, Get, Interpolate};
use crate::ast::{Delimiters, Node, Span, Template};
use crate::config::Options;
use crate::data::{Data, Value};
use crate::error::{Result, SinkError, StacheError};
use crate::escape::{write_escaped, Escape};
use crate::lambda::{LambdaError, LambdaHost};
use crate::parser::parse;
use crate::partials::{NoPartials, PartialResolver};
use crate::path::Path;
use crate::resolver::{resolve_frames, Resolution};
use crate::sink::Sink;

/// Compiles and renders templates.
///
/// # Type Parameters
///
/// * `P` - Where `{{>name}}` partials are looked up
#[derive(Debug, Clone, Default)]
pub struct Engine<P: PartialResolver = NoPartials> {
    partials: P,
    options: Options,
}

impl Engine<NoPartials> {
    /// Creates an engine without partials and with default options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PartialResolver> Engine<P> {
    /// Creates an engine looking up partials in `partials`.
    pub fn with_partials(partials: P) -> Self {
        Self {
            partials,
            options: Options::default(),
        }
    }

    /// Replaces the rendering options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// The rendering options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The partial resolver.
    pub fn partials(&self) -> &P {
        &self.partials
    }

    /// Compiles an anonymous template.
    pub fn compile(&self, source: &str) -> Result<Template> {
        parse(source, None, &self.options.delimiters)
    }

    /// Compiles a template, naming it in error messages.
    pub fn compile_named(&self, name: &str, source: &str) -> Result<Template> {
        parse(source, Some(name), &self.options.delimiters)
    }

    /// Renders `template` into a new string.
    pub fn render(&self, template: &Template, data: &dyn Data) -> Result<String> {
        let mut out = String::new();
        out.try_reserve(self.capacity_hint(template, data))
            .map_err(|_| SinkError::OutOfMemory)?;
        self.render_to(template, data, &mut out)?;
        Ok(out)
    }

    /// Renders `template` into `sink`.
    ///
    /// On failure, output written before the failure stays in the sink.
    pub fn render_to(&self, template: &Template, data: &dyn Data, sink: &mut dyn Sink) -> Result<()> {
        tracing::debug!(template = ?template.name, "rendering template");
        let mut renderer = Renderer {
            partials: &self.partials,
            options: &self.options,
            frames: vec![Value::Ref(data)],
            sink,
            outer: None,
            partial_depth: 0,
        };
        renderer.render_nodes(&template.nodes)
    }

    /// Compiles and renders `source` in one go.
    pub fn render_source(&self, source: &str, data: &dyn Data) -> Result<String> {
        let template = self.compile(source)?;
        self.render(&template, data)
    }

    /// Estimates the rendered size of `template`.
    ///
    /// Counts literal text plus the values of interpolations resolved
    /// against `data` alone; section bodies are counted once.
    pub fn capacity_hint(&self, template: &Template, data: &dyn Data) -> usize {
        let frames = [Value::Ref(data)];
        template.literal_len() + hint_nodes(&template.nodes, &frames)
    }
}

/// Renders `source` against `data` with a default [`Engine`].
///
/// ```rust
/// let mut data = std::collections::HashMap::new();
/// data.insert("name".to_string(), "world");
/// assert_eq!(stache::render("Hello, {{name}}!", &data).unwrap(), "Hello, world!");
/// ```
pub fn render(source: &str, data: &dyn Data) -> Result<String> {
    Engine::new().render_source(source, data)
}

fn hint_nodes(nodes: &[Node], frames: &[Value<'_>]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Interpolation { path, .. } => {
                match resolve_frames(frames, path, None, &mut CapacityHint) {
                    Ok(Resolution::Field(len)) => len,
                    _ => 0,
                }
            }
            Node::Section { children, .. } => hint_nodes(children, frames),
            _ => 0,
        })
        .sum()
}

/// Prefixes every line of `source` with `indentation`.
fn indent(source: &str, indentation: &str) -> String {
    let mut out = String::with_capacity(source.len() + indentation.len());
    for line in source.split_inclusive('\n') {
        out.push_str(indentation);
        out.push_str(line);
    }
    out
}

struct Renderer<'e, 'a, 's, P> {
    partials: &'e P,
    options: &'e Options,
    frames: Vec<Value<'a>>,
    sink: &'s mut dyn Sink,
    /// The caller's sink while rendering into a scratch buffer; it decides
    /// which lambda failures are its own.
    outer: Option<&'s dyn Sink>,
    partial_depth: usize,
}

impl<'e, 'a, P: PartialResolver> Renderer<'e, 'a, '_, P> {
    fn render_nodes(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => self.sink.write_str(text)?,
                Node::Interpolation { path, escape, span } => {
                    self.render_interpolation(path, *escape, span)?
                }
                Node::Section {
                    path,
                    inverted: true,
                    children,
                    ..
                } => self.render_inverted(path, children)?,
                Node::Section {
                    path,
                    children,
                    inner,
                    delimiters,
                    ..
                } => self.render_section(path, children, inner, delimiters)?,
                Node::Partial {
                    name, indentation, ..
                } => self.render_partial(name, indentation)?,
            }
        }
        Ok(())
    }

    fn render_interpolation(&mut self, path: &Path, escape: Escape, span: &Span) -> Result<()> {
        let escape = match self.options.escape {
            Escape::None => Escape::None,
            Escape::Html => escape,
        };
        let mut action = Interpolate::new(&mut *self.sink, escape);
        let resolution = resolve_frames(&self.frames, path, None, &mut action)?;
        match resolution {
            Resolution::Field(()) => {}
            Resolution::Lambda(()) => {
                let delimiters = Delimiters::default();
                self.expand_lambda(path, None, "", escape, &delimiters)?;
            }
            missing => {
                tracing::debug!(%path, line = span.line, result = ?missing, "nothing to interpolate");
            }
        }
        Ok(())
    }

    fn render_section(
        &mut self,
        path: &Path,
        children: &[Node],
        inner: &str,
        delimiters: &Delimiters,
    ) -> Result<()> {
        let mut index = 0;
        loop {
            match resolve_frames(&self.frames, path, Some(index), &mut Get)? {
                Resolution::Field(Some(value)) => {
                    self.frames.push(value);
                    let rendered = self.render_nodes(children);
                    self.frames.pop();
                    rendered?;
                    index += 1;
                }
                Resolution::Lambda(_) if index == 0 => {
                    return self.expand_lambda(path, Some(0), inner, Escape::None, delimiters);
                }
                _ => return Ok(()),
            }
        }
    }

    fn render_inverted(&mut self, path: &Path, children: &[Node]) -> Result<()> {
        let found = resolve_frames(&self.frames, path, Some(0), &mut Get)?;
        if found.is_resolved() {
            return Ok(());
        }
        self.render_nodes(children)
    }

    fn expand_lambda(
        &mut self,
        path: &Path,
        index: Option<usize>,
        inner: &str,
        escape: Escape,
        delimiters: &Delimiters,
    ) -> Result<()> {
        tracing::debug!(%path, "resolving lambda");
        let mut buffer = String::new();
        let completed = {
            let mut scratch = self.scratch(&mut buffer);
            let mut action = ExpandLambda::new(&mut scratch, inner, escape, delimiters);
            resolve_frames(&self.frames, path, index, &mut action)?
        };

        if let Resolution::Lambda(true) = completed {
            self.sink.write_str(&buffer)?;
        }
        Ok(())
    }

    /// A renderer over the same context writing into `buffer`.
    fn scratch<'b>(&'b self, buffer: &'b mut String) -> Renderer<'e, 'a, 'b, P> {
        Renderer {
            partials: self.partials,
            options: self.options,
            frames: self.frames.clone(),
            sink: buffer,
            outer: Some(self.outer.unwrap_or(&*self.sink)),
            partial_depth: self.partial_depth,
        }
    }

    fn render_partial(&mut self, name: &str, indentation: &str) -> Result<()> {
        let limit = self.options.max_partial_depth;
        if self.partial_depth >= limit {
            return Err(StacheError::PartialDepth {
                name: name.to_string(),
                limit,
            });
        }

        let partials = self.partials;
        let Some(source) = partials.resolve(name)? else {
            tracing::debug!(partial = name, "partial not found, rendering nothing");
            return Ok(());
        };
        let template = if indentation.is_empty() {
            parse(&source, Some(name), &self.options.delimiters)?
        } else {
            parse(&indent(&source, indentation), Some(name), &self.options.delimiters)?
        };

        self.partial_depth += 1;
        let rendered = self.render_nodes(&template.nodes);
        self.partial_depth -= 1;
        rendered
    }
}

impl<P: PartialResolver> LambdaHost for Renderer<'_, '_, '_, P> {
    fn write(&mut self, text: &str, escape: Escape) -> std::result::Result<(), SinkError> {
        write_escaped(&mut *self.sink, text, escape)
    }

    fn render(&mut self, template: &str, delimiters: &Delimiters, escape: Escape) -> Result<()> {
        let compiled = parse(template, None, delimiters)?;
        if escape == Escape::None {
            return self.render_nodes(&compiled.nodes);
        }

        let mut buffer = String::new();
        self.scratch(&mut buffer).render_nodes(&compiled.nodes)?;
        write_escaped(&mut *self.sink, &buffer, escape)?;
        Ok(())
    }

    fn recognize(&self, failure: LambdaError) -> std::result::Result<SinkError, LambdaError> {
        match self.outer {
            Some(outer) => outer.recognize(failure),
            None => self.sink.recognize(failure),
        }
    }
}
