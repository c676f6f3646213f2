// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Actions applied to resolved values.
//!
//! Every lookup the renderer performs is the same traversal
//! ([`resolve`](crate::resolver::resolve)) parametrized by one of these
//! [`Action`]s:
//!
//! - [`Get`]: hands back the resolved value, e.g. to push it as a section frame
//! - [`Interpolate`]: writes the value's text to a sink
//! - [`CapacityHint`]: estimates how many bytes the value will render to
//! - [`ExpandLambda`]: invokes a resolved lambda
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use stache::actions::Interpolate;
//! use stache::{resolve, Depth, Escape, Path, Resolution, Value};
//!
//! let mut data = HashMap::new();
//! data.insert("title".to_string(), "<b>hi</b>".to_string());
//!
//! let mut out = String::new();
//! let mut action = Interpolate::new(&mut out, Escape::Html);
//! let result = resolve(Depth::Root, Value::Ref(&data), &Path::parse("title"), None, &mut action);
//! assert!(matches!(result, Ok(Resolution::Field(()))));
//! assert_eq!(out, "&lt;b&gt;hi&lt;/b&gt;");
//! ```

mod capacity;
mod expand;
mod get;
mod interpolate;

pub use crate::resolver::Action;
pub use capacity::CapacityHint;
pub use expand::ExpandLambda;
pub use get::Get;
pub use interpolate::{write_value, Interpolate};
