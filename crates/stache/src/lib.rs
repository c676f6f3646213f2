// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

// Parse errors carry a source snippet for display.
#![allow(clippy::result_large_err)]

//! # stache
//!
//! Mustache templates for Rust.
//!
//! stache compiles Mustache templates into an instruction tree and renders
//! them against any value implementing [`Data`]: standard library types,
//! `serde_json::Value` (feature `json`, on by default) and your own structs
//! through the [`record!`] macro.
//!
//! ## Features
//!
//! - Interpolation, sections, inverted sections, comments, partials and
//!   set-delimiter tags
//! - Stand-alone tag trimming, including `\r\n` line endings and partial
//!   indentation
//! - Context-stack lookup that only falls back to outer scopes when the
//!   first segment of a dotted name is missing
//! - Lambdas as closures ([`LambdaFn`]) or as methods of your records
//! - Output to a `String` or any [`std::io::Write`]
//!
//! ## Quick Start
//!
//! ```rust
//! use stache::{record, Engine};
//!
//! struct Order {
//!     customer: String,
//!     items: Vec<Item>,
//! }
//!
//! struct Item {
//!     name: String,
//!     qty: u32,
//! }
//!
//! record!(Order { customer, items });
//! record!(Item { name, qty });
//!
//! let engine = Engine::new();
//! let template = engine.compile("Order for {{customer}}:\n{{#items}}\n- {{qty}} x {{name}}\n{{/items}}\n")?;
//!
//! let order = Order {
//!     customer: "Ada".into(),
//!     items: vec![
//!         Item { name: "tea".into(), qty: 2 },
//!         Item { name: "cake".into(), qty: 1 },
//!     ],
//! };
//! assert_eq!(
//!     engine.render(&template, &order)?,
//!     "Order for Ada:\n- 2 x tea\n- 1 x cake\n"
//! );
//! # Ok::<(), stache::StacheError>(())
//! ```

/// Resolver actions: get, interpolate, capacity hint, lambda expansion.
pub mod actions;
/// Instruction tree of compiled templates.
pub mod ast;
/// Rendering options.
pub mod config;
/// Host data introspection.
pub mod data;
/// Template engine.
pub mod engine;
/// Error types and reporting.
pub mod error;
/// HTML escaping.
pub mod escape;
/// Adapters for third-party value types.
pub mod extensions;
/// Lambda invocation.
pub mod lambda;
/// Template parser.
pub mod parser;
/// Partial lookup.
pub mod partials;
/// Dotted paths.
pub mod path;
/// Path resolution.
pub mod resolver;
/// Output sinks.
pub mod sink;
/// Stand-alone whitespace trimming.
pub mod trimmer;

pub use ast::{Delimiters, Node, Template};
pub use config::Options;
pub use data::{Data, Record, Sequence, Shape, Value};
pub use engine::{render, Engine};
pub use error::{Result, SinkError, StacheError};
pub use escape::Escape;
pub use lambda::{Lambda, LambdaContext, LambdaError, LambdaFn, Method};
pub use partials::{MemoryPartials, NoPartials, PartialResolver};
pub use path::{Depth, Path};
pub use resolver::{resolve, resolve_frames, Action, Resolution};
pub use sink::{Sink, WriteSink};
