// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Path resolution against host data.
//!
//! [`resolve`] navigates one context frame by a dotted [`Path`] and an
//! optional iteration index, dispatching on each value's [`Shape`]. What
//! happens to the value it lands on is decided by an [`Action`]: the same
//! traversal backs section lookup, interpolation, capacity estimation and
//! lambda expansion (see [`crate::actions`]).
//!
//! # Outcomes
//!
//! A lookup yields exactly one [`Resolution`]. Two of them are easy to
//! confuse and must stay apart:
//!
//! - [`Resolution::NotFoundInContext`]: the *first* segment is missing from
//!   this frame, so an enclosing frame may have it;
//! - [`Resolution::ChainBroken`]: the path went wrong further down (or
//!   tried to navigate through a lambda), so no other frame may be tried.
//!
//! [`resolve_frames`] applies that rule across a whole context stack.

use crate::data::{Data, Shape, Value};
use crate::lambda::{Lambda, Method};
use crate::path::{Depth, Path};

/// The outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// The first segment is absent from this frame; outer frames may be tried.
    NotFoundInContext,
    /// The path is invalid below its first segment; treat as absent.
    ChainBroken,
    /// A value was resolved and handed to the action.
    Field(T),
    /// A lambda was resolved and handed to the action.
    Lambda(T),
    /// The iteration index is past the last element.
    IteratorConsumed,
}

impl<T> Resolution<T> {
    /// `true` for [`Resolution::Field`] and [`Resolution::Lambda`].
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Field(_) | Resolution::Lambda(_))
    }
}

/// What to do with a resolved value.
pub trait Action<'a> {
    /// Produced for a resolved value or lambda.
    type Output;
    /// Failures of the action itself; the resolver never fails on its own.
    type Error;

    /// Handles a resolved value.
    fn field(&mut self, value: Value<'a>) -> Result<Self::Output, Self::Error>;

    /// Handles a resolved lambda.
    fn lambda(&mut self, lambda: &dyn Lambda) -> Result<Self::Output, Self::Error>;
}

type Outcome<'a, A> = Result<Resolution<<A as Action<'a>>::Output>, <A as Action<'a>>::Error>;

/// Resolves `path` (and `index`, when iterating) against one frame.
pub fn resolve<'a, A: Action<'a>>(
    depth: Depth,
    host: Value<'a>,
    path: &Path,
    index: Option<usize>,
    action: &mut A,
) -> Outcome<'a, A> {
    find(depth, host, path.segments(), index, action)
}

/// Resolves `path` against a context stack, innermost frame last.
///
/// Frames are tried from the innermost outwards while the first segment is
/// missing. Running out of frames yields [`Resolution::ChainBroken`].
pub fn resolve_frames<'a, A: Action<'a>>(
    frames: &[Value<'a>],
    path: &Path,
    index: Option<usize>,
    action: &mut A,
) -> Outcome<'a, A> {
    for (depth, frame) in frames.iter().rev().enumerate() {
        match find(Depth::Root, *frame, path.segments(), index, action)? {
            Resolution::NotFoundInContext => {
                tracing::trace!(%path, depth, "not found in frame, trying enclosing frame");
            }
            resolved => return Ok(resolved),
        }
    }
    Ok(Resolution::ChainBroken)
}

fn fail<T>(depth: Depth) -> Resolution<T> {
    match depth {
        Depth::Root => Resolution::NotFoundInContext,
        Depth::Leaf => Resolution::ChainBroken,
    }
}

fn find<'a, A: Action<'a>>(
    depth: Depth,
    host: Value<'a>,
    path: &[String],
    index: Option<usize>,
    action: &mut A,
) -> Outcome<'a, A> {
    if let Value::Ref(data) = host {
        if let Shape::Lambda(lambda) = data.shape() {
            if !path.is_empty() {
                return Ok(Resolution::ChainBroken);
            }
            return action.lambda(lambda).map(Resolution::Lambda);
        }
    }

    if let Some((name, rest)) = path.split_first() {
        return match host {
            Value::Ref(data) => recursive_find(depth, data, name, rest, index, action),
            Value::Count(_) => Ok(fail(depth)),
        };
    }

    match index {
        Some(index) => iterate_at(host, index, action),
        None => action.field(host).map(Resolution::Field),
    }
}

fn recursive_find<'a, A: Action<'a>>(
    depth: Depth,
    data: &'a dyn Data,
    name: &str,
    rest: &[String],
    index: Option<usize>,
    action: &mut A,
) -> Outcome<'a, A> {
    match data.shape() {
        Shape::Record(record) => find_field_path(depth, record, name, rest, index, action),
        Shape::Pointer(inner) | Shape::Optional(Some(inner)) => {
            recursive_find(depth, inner, name, rest, index, action)
        }
        Shape::Optional(None) => Ok(fail(depth)),
        Shape::Sequence(items) if name == "len" && rest.is_empty() => {
            find(Depth::Leaf, Value::Count(items.len()), &[], index, action)
        }
        Shape::Lambda(_) => Ok(Resolution::ChainBroken),
        _ => Ok(fail(depth)),
    }
}

fn find_field_path<'a, A: Action<'a>>(
    depth: Depth,
    record: &'a dyn crate::data::Record,
    name: &str,
    rest: &[String],
    index: Option<usize>,
    action: &mut A,
) -> Outcome<'a, A> {
    if let Some(field) = record.field(name) {
        return find(Depth::Leaf, Value::Ref(field), rest, index, action);
    }

    match record.method(name) {
        None => Ok(fail(depth)),
        // a lambda is always the last hop
        Some(_) if !rest.is_empty() => Ok(Resolution::ChainBroken),
        Some(Method::Unusable) => Ok(Resolution::ChainBroken),
        Some(Method::Bound(lambda)) => action.lambda(&*lambda).map(Resolution::Lambda),
    }
}

fn iterate_at<'a, A: Action<'a>>(host: Value<'a>, index: usize, action: &mut A) -> Outcome<'a, A> {
    let data = match host {
        Value::Ref(data) => data,
        Value::Count(_) => return single(host, index, action),
    };

    match data.shape() {
        Shape::Tuple(items) | Shape::Sequence(items) => match items.get(index) {
            Some(item) => action.field(Value::Ref(item)).map(Resolution::Field),
            None => Ok(Resolution::IteratorConsumed),
        },
        Shape::Bool(true) if index == 0 => action.field(host).map(Resolution::Field),
        Shape::Bool(_) => Ok(Resolution::IteratorConsumed),
        Shape::Pointer(inner) | Shape::Optional(Some(inner)) => {
            iterate_at(Value::Ref(inner), index, action)
        }
        Shape::Optional(None) => Ok(Resolution::IteratorConsumed),
        Shape::Lambda(lambda) => action.lambda(lambda).map(Resolution::Lambda),
        _ => single(host, index, action),
    }
}

fn single<'a, A: Action<'a>>(host: Value<'a>, index: usize, action: &mut A) -> Outcome<'a, A> {
    if index == 0 {
        action.field(host).map(Resolution::Field)
    } else {
        Ok(Resolution::IteratorConsumed)
    }
}
