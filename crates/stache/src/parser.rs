// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template parser.
//!
//! Parsing happens in three passes over the source:
//!
//! 1. **Scan**: split the source into alternating literal runs and tags,
//!    following set-delimiter tags as they appear. Every run is fed through a
//!    [`Trimmer`] while it is scanned.
//! 2. **Stand-alone trimming**: a tag other than an interpolation is
//!    stand-alone when the run before it may lose its last line's
//!    whitespace and the run after it may lose its first line. Both trims
//!    are applied and a partial keeps the removed prefix as its indentation.
//! 3. **Tree building**: sections are nested, keeping the raw source between
//!    their open and close tags for lambdas.
//!
//! ```rust
//! use stache::ast::{Delimiters, Node};
//! use stache::parser::parse;
//!
//! let template = parse("{{#items}}\n- {{.}}\n{{/items}}\n", None, &Delimiters::default()).unwrap();
//! let Node::Section { children, .. } = &template.nodes[0] else { panic!() };
//! assert_eq!(children[0], Node::Text("- ".into()));
//! ```

use crate::ast::{Delimiters, Node, Span, Template};
use crate::error::{Result, SourceContext, StacheError};
use crate::escape::Escape;
use crate::path::Path;
use crate::trimmer::{TrimDecision, Trimmer};

/// Parses `source` into a [`Template`], starting with `delimiters`.
pub fn parse(source: &str, name: Option<&str>, delimiters: &Delimiters) -> Result<Template> {
    let mut parser = Parser {
        source,
        name,
        delimiters: delimiters.clone(),
        pos: 0,
        runs: Vec::new(),
        tags: Vec::new(),
    };
    parser.scan()?;
    parser.trim_standalone();
    let nodes = parser.build()?;

    Ok(Template {
        name: name.map(str::to_string),
        nodes,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Escaped,
    Unescaped,
    Section,
    Inverted,
    Close,
    Comment,
    Partial,
    SetDelimiters,
}

impl TagKind {
    fn from_sigil(sigil: u8) -> Option<Self> {
        match sigil {
            b'&' => Some(TagKind::Unescaped),
            b'#' => Some(TagKind::Section),
            b'^' => Some(TagKind::Inverted),
            b'/' => Some(TagKind::Close),
            b'!' => Some(TagKind::Comment),
            b'>' => Some(TagKind::Partial),
            _ => None,
        }
    }

    fn may_stand_alone(self) -> bool {
        !matches!(self, TagKind::Escaped | TagKind::Unescaped)
    }
}

#[derive(Debug)]
struct Tag {
    kind: TagKind,
    name: String,
    span: Span,
    /// Set for section openers.
    delimiters: Option<Delimiters>,
    indentation: String,
}

/// A literal run and the part of it that survives trimming.
#[derive(Debug)]
struct Run {
    start: usize,
    end: usize,
    trimmer: Trimmer,
    keep_from: usize,
    keep_to: usize,
}

impl Run {
    /// Absolute offset where the trailing line prefix starts, when the run
    /// may end in whitespace that begins a stand-alone line.
    fn line_prefix(&self) -> Option<usize> {
        match self.trimmer.right_decision() {
            TrimDecision::AllowTrim(boundary) if boundary.at_line_break || self.start == 0 => {
                Some(self.start + boundary.index)
            }
            _ => None,
        }
    }

    /// Absolute offset just past the leading line suffix, when the run may
    /// begin with whitespace ending a stand-alone line.
    fn line_suffix(&self, source_len: usize) -> Option<usize> {
        match self.trimmer.left_decision() {
            TrimDecision::AllowTrim(boundary) => Some(self.start + boundary.index + 1),
            TrimDecision::Preserve => match self.trimmer.right_decision() {
                TrimDecision::AllowTrim(boundary)
                    if !boundary.at_line_break && self.end == source_len =>
                {
                    Some(self.end)
                }
                _ => None,
            },
        }
    }
}

struct Opening {
    path: Path,
    name: String,
    inverted: bool,
    delimiters: Delimiters,
    span: Span,
}

struct Frame {
    opening: Option<Opening>,
    nodes: Vec<Node>,
}

impl Frame {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.nodes.last_mut() {
            Some(Node::Text(last)) => last.push_str(text),
            _ => self.nodes.push(Node::Text(text.to_string())),
        }
    }
}

struct Parser<'s> {
    source: &'s str,
    name: Option<&'s str>,
    delimiters: Delimiters,
    pos: usize,
    runs: Vec<Run>,
    tags: Vec<Tag>,
}

impl<'s> Parser<'s> {
    fn scan(&mut self) -> Result<()> {
        let source = self.source;
        loop {
            let open = source[self.pos..]
                .find(self.delimiters.open())
                .map(|found| self.pos + found);
            self.push_run(open.unwrap_or(source.len()));

            let Some(start) = open else {
                return Ok(());
            };
            let tag = self.scan_tag(start)?;
            self.pos = tag.span.end;
            self.tags.push(tag);
        }
    }

    fn push_run(&mut self, end: usize) {
        let start = self.pos;
        let trimmer = Trimmer::scan(self.source.as_bytes(), start, end);
        self.runs.push(Run {
            start,
            end,
            trimmer,
            keep_from: start,
            keep_to: end,
        });
    }

    fn scan_tag(&mut self, start: usize) -> Result<Tag> {
        let source = self.source;
        let body = start + self.delimiters.open().len();
        let close = self.delimiters.close();

        let (kind, content_start, terminator) = match source.as_bytes().get(body).copied() {
            Some(b'{') => (TagKind::Unescaped, body + 1, ["}", close].concat()),
            Some(b'=') => (TagKind::SetDelimiters, body + 1, ["=", close].concat()),
            Some(sigil) => match TagKind::from_sigil(sigil) {
                Some(kind) => (kind, body + 1, close.to_string()),
                None => (TagKind::Escaped, body, close.to_string()),
            },
            None => (TagKind::Escaped, body, close.to_string()),
        };

        let Some(found) = source[content_start..].find(&terminator) else {
            return Err(self.error("unclosed tag", start));
        };
        let content_end = content_start + found;
        let content = &source[content_start..content_end];
        let span = self.span(start, content_end + terminator.len());
        let name = content.trim().to_string();

        match kind {
            TagKind::SetDelimiters => {
                let mut parts = content.split_whitespace();
                let delimiters = match (parts.next(), parts.next(), parts.next()) {
                    (Some(open), Some(close), None) => Delimiters::new(open, close)
                        .map_err(|err| {
                            self.error(format!("malformed set-delimiter tag: {err}"), start)
                        })?,
                    _ => return Err(self.error("malformed set-delimiter tag", start)),
                };
                tracing::trace!(
                    open = delimiters.open(),
                    close = delimiters.close(),
                    line = span.line,
                    "delimiters changed"
                );
                self.delimiters = delimiters;
            }
            TagKind::Comment => {}
            _ if name.is_empty() => return Err(self.error("empty tag name", start)),
            _ => {}
        }

        let delimiters = matches!(kind, TagKind::Section | TagKind::Inverted)
            .then(|| self.delimiters.clone());

        Ok(Tag {
            kind,
            name,
            span,
            delimiters,
            indentation: String::new(),
        })
    }

    fn trim_standalone(&mut self) {
        let source_len = self.source.len();
        for (index, tag) in self.tags.iter_mut().enumerate() {
            if !tag.kind.may_stand_alone() {
                continue;
            }
            let Some(cut_from) = self.runs[index].line_prefix() else {
                continue;
            };
            let Some(cut_to) = self.runs[index + 1].line_suffix(source_len) else {
                continue;
            };

            tracing::trace!(tag = %tag.name, line = tag.span.line, "stand-alone tag");
            if tag.kind == TagKind::Partial {
                tag.indentation = self.source[cut_from..self.runs[index].end].to_string();
            }
            self.runs[index].keep_to = cut_from;
            self.runs[index + 1].keep_from = cut_to;
        }
    }

    fn build(&mut self) -> Result<Vec<Node>> {
        let source = self.source;
        let mut stack = vec![Frame {
            opening: None,
            nodes: Vec::new(),
        }];
        let tags = std::mem::take(&mut self.tags);
        let mut tags = tags.into_iter();

        for run in &self.runs {
            if let Some(top) = stack.last_mut() {
                top.push_text(&source[run.keep_from..run.keep_to]);
            }
            let Some(tag) = tags.next() else {
                break;
            };

            match tag.kind {
                TagKind::Escaped | TagKind::Unescaped => {
                    let escape = if tag.kind == TagKind::Escaped {
                        Escape::Html
                    } else {
                        Escape::None
                    };
                    push_node(
                        &mut stack,
                        Node::Interpolation {
                            path: Path::parse(&tag.name),
                            escape,
                            span: tag.span,
                        },
                    );
                }
                TagKind::Section | TagKind::Inverted => stack.push(Frame {
                    opening: Some(Opening {
                        path: Path::parse(&tag.name),
                        inverted: tag.kind == TagKind::Inverted,
                        delimiters: tag.delimiters.unwrap_or_default(),
                        span: tag.span,
                        name: tag.name,
                    }),
                    nodes: Vec::new(),
                }),
                TagKind::Close => {
                    let Some(Frame {
                        opening: Some(opening),
                        nodes,
                    }) = (stack.len() > 1).then(|| stack.pop()).flatten()
                    else {
                        return Err(self.error(
                            format!("closing tag for unopened section \"{}\"", tag.name),
                            tag.span.start,
                        ));
                    };
                    if opening.name != tag.name {
                        return Err(self.error(
                            format!(
                                "section \"{}\" closed by \"{}\"",
                                opening.name, tag.name
                            ),
                            tag.span.start,
                        ));
                    }
                    let inner = source[opening.span.end..tag.span.start].to_string();
                    push_node(
                        &mut stack,
                        Node::Section {
                            path: opening.path,
                            inverted: opening.inverted,
                            children: nodes,
                            inner,
                            delimiters: opening.delimiters,
                            span: opening.span,
                        },
                    );
                }
                TagKind::Partial => push_node(
                    &mut stack,
                    Node::Partial {
                        name: tag.name,
                        indentation: tag.indentation,
                        span: tag.span,
                    },
                ),
                TagKind::Comment | TagKind::SetDelimiters => {}
            }
        }

        match stack.pop() {
            Some(Frame {
                opening: Some(opening),
                ..
            }) => Err(self.error(
                format!("unclosed section \"{}\"", opening.name),
                opening.span.start,
            )),
            Some(root) => Ok(root.nodes),
            None => Ok(Vec::new()),
        }
    }

    fn span(&self, start: usize, end: usize) -> Span {
        let (line, column) = line_column(self.source, start);
        Span {
            start,
            end,
            line,
            column,
        }
    }

    fn error(&self, message: impl Into<String>, offset: usize) -> StacheError {
        let (line, column) = line_column(self.source, offset);
        StacheError::Parse {
            message: message.into(),
            line,
            column,
            file: self.name.map(str::to_string),
            source_context: Some(SourceContext::from_source(self.source, line, column)),
        }
    }
}

fn push_node(stack: &mut [Frame], node: Node) {
    if let Some(top) = stack.last_mut() {
        top.nodes.push(node);
    }
}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |found| found + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
