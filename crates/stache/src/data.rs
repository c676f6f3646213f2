// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Host data introspection.
//!
//! Templates render against any value implementing [`Data`]. A value reports
//! its [`Shape`]: the category the resolver dispatches on. Implementations
//! are provided for the standard library's scalars, strings, references,
//! smart pointers, options, sequences, tuples and string-keyed maps.
//!
//! User records implement [`Record`] (field and lambda lookup by name), most
//! conveniently through the [`record!`](crate::record) macro:
//!
//! ```rust
//! use stache::record;
//!
//! struct Planet {
//!     name: String,
//!     moons: Vec<String>,
//! }
//!
//! impl Planet {
//!     fn shout(&self) -> String {
//!         self.name.to_uppercase()
//!     }
//! }
//!
//! record!(Planet { name, moons } lambdas { shout => Planet::shout });
//!
//! let earth = Planet { name: "earth".into(), moons: vec!["moon".into()] };
//! let out = stache::render("{{shout}} has {{moons.len}} moon", &earth).unwrap();
//! assert_eq!(out, "EARTH has 1 moon");
//! ```
//!
//! `u8` deliberately does not implement [`Data`]: `&[u8]` and `Vec<u8>` are
//! byte strings rendered as text, never sequences of numbers.

use crate::lambda::{Lambda, Method};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

/// A value templates can render.
pub trait Data {
    /// The shape the resolver dispatches on.
    fn shape(&self) -> Shape<'_>;
}

/// The categories of host values.
#[derive(Clone, Copy)]
pub enum Shape<'a> {
    /// Named members.
    Record(&'a dyn Record),
    /// A transparent wrapper around another value.
    ///
    /// References and smart pointers report their target's shape directly;
    /// host wrapper types may report this instead.
    Pointer(&'a dyn Data),
    /// A present or absent value.
    Optional(Option<&'a dyn Data>),
    /// A homogeneous list of non-byte elements.
    Sequence(&'a dyn Sequence),
    /// A fixed heterogeneous tuple.
    Tuple(&'a dyn Sequence),
    /// Opaque bytes rendered as (lossy) UTF-8 text.
    Bytes(&'a [u8]),
    /// Text.
    Str(&'a str),
    /// `true` renders a section once, `false` never.
    Bool(bool),
    /// Any other displayable value.
    Scalar(&'a dyn Display),
    /// A callable capability.
    Lambda(&'a dyn Lambda),
}

/// A value with named members.
pub trait Record {
    /// Looks up a data member by exact, case-sensitive name.
    fn field(&self, name: &str) -> Option<&dyn Data>;

    /// Looks up a callable member by exact name.
    ///
    /// Only consulted when no field of that name exists.
    fn method(&self, _name: &str) -> Option<Method<'_>> {
        None
    }
}

/// Positional access for sequences and tuples.
pub trait Sequence {
    /// Number of elements.
    fn len(&self) -> usize;

    /// The element at `index`, if in range.
    fn get(&self, index: usize) -> Option<&dyn Data>;

    /// `true` when there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A handle to a resolved value.
///
/// Resolution either borrows from the host data or produces a small value
/// of its own, such as the length of a sequence.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// Borrowed host data.
    Ref(&'a dyn Data),
    /// A computed element count.
    Count(usize),
}

impl<'a> Value<'a> {
    /// The borrowed data, if this handle borrows.
    pub fn as_data(&self) -> Option<&'a dyn Data> {
        match *self {
            Value::Ref(data) => Some(data),
            Value::Count(_) => None,
        }
    }
}

impl<'a> From<&'a dyn Data> for Value<'a> {
    fn from(data: &'a dyn Data) -> Self {
        Value::Ref(data)
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Ref(data) => write!(f, "Ref({})", data.shape().kind()),
            Value::Count(count) => write!(f, "Count({count})"),
        }
    }
}

impl Shape<'_> {
    /// A short name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Record(_) => "record",
            Shape::Pointer(_) => "pointer",
            Shape::Optional(_) => "optional",
            Shape::Sequence(_) => "sequence",
            Shape::Tuple(_) => "tuple",
            Shape::Bytes(_) => "bytes",
            Shape::Str(_) => "string",
            Shape::Bool(_) => "bool",
            Shape::Scalar(_) => "scalar",
            Shape::Lambda(_) => "lambda",
        }
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Data for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(self)
                }
            }
        )*
    };
}

impl_scalar!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize, f32, f64, char);

impl Data for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

impl Data for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Data for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Data for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Data for &[u8] {
    fn shape(&self) -> Shape<'_> {
        Shape::Bytes(self)
    }
}

impl Data for Vec<u8> {
    fn shape(&self) -> Shape<'_> {
        Shape::Bytes(self)
    }
}

impl<T: Data + ?Sized> Data for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Data + ?Sized> Data for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Data + ?Sized> Data for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Data + ?Sized> Data for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Data> Data for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Optional(self.as_ref().map(|value| value as &dyn Data))
    }
}

// Borrowed slices: a bare `[T]` cannot be viewed as `&dyn Sequence`.
impl<T: Data> Sequence for &[T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Data> {
        <[T]>::get(self, index).map(|value| value as &dyn Data)
    }
}

impl<T: Data> Data for &[T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T: Data> Sequence for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&dyn Data> {
        self.as_slice().get(index).map(|value| value as &dyn Data)
    }
}

impl<T: Data> Data for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T: Data, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Data> {
        self.as_slice().get(index).map(|value| value as &dyn Data)
    }
}

impl<T: Data, const N: usize> Data for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T: Data> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Data> {
        VecDeque::get(self, index).map(|value| value as &dyn Data)
    }
}

impl<T: Data> Data for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

macro_rules! impl_tuple {
    ($len:expr => $($idx:tt $name:ident),+) => {
        impl<$($name: Data),+> Sequence for ($($name,)+) {
            fn len(&self) -> usize {
                $len
            }

            fn get(&self, index: usize) -> Option<&dyn Data> {
                match index {
                    $($idx => Some(&self.$idx),)+
                    _ => None,
                }
            }
        }

        impl<$($name: Data),+> Data for ($($name,)+) {
            fn shape(&self) -> Shape<'_> {
                Shape::Tuple(self)
            }
        }
    };
}

impl_tuple!(1 => 0 A);
impl_tuple!(2 => 0 A, 1 B);
impl_tuple!(3 => 0 A, 1 B, 2 C);
impl_tuple!(4 => 0 A, 1 B, 2 C, 3 D);
impl_tuple!(5 => 0 A, 1 B, 2 C, 3 D, 4 E);
impl_tuple!(6 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_tuple!(7 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_tuple!(8 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);

impl<V: Data, S: std::hash::BuildHasher> Record for HashMap<String, V, S> {
    fn field(&self, name: &str) -> Option<&dyn Data> {
        self.get(name).map(|value| value as &dyn Data)
    }
}

impl<V: Data, S: std::hash::BuildHasher> Data for HashMap<String, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

impl<V: Data> Record for BTreeMap<String, V> {
    fn field(&self, name: &str) -> Option<&dyn Data> {
        self.get(name).map(|value| value as &dyn Data)
    }
}

impl<V: Data> Data for BTreeMap<String, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

/// Implements [`Data`] and [`Record`] for a struct.
///
/// Lists the fields exposed to templates and, optionally, methods exposed
/// as lambdas. A lambda method either takes only `&self` and returns text
/// that is rendered as a template, or takes `&self` and a
/// [`LambdaContext`](crate::LambdaContext) and writes its own output.
///
/// ```rust
/// use stache::{record, LambdaContext, LambdaError};
///
/// struct Person {
///     first: String,
///     last: String,
/// }
///
/// impl Person {
///     fn full(&self) -> String {
///         format!("{} {}", self.first, self.last)
///     }
///
///     fn bold(&self, ctx: &mut LambdaContext<'_>) -> Result<(), LambdaError> {
///         ctx.write_raw("<b>")?;
///         ctx.render_inner()?;
///         ctx.write_raw("</b>")?;
///         Ok(())
///     }
/// }
///
/// record!(Person { first, last } lambdas { full => Person::full, bold => Person::bold });
///
/// let ada = Person { first: "Ada".into(), last: "Lovelace".into() };
/// let out = stache::render("{{#bold}}{{full}}{{/bold}}", &ada).unwrap();
/// assert_eq!(out, "<b>Ada Lovelace</b>");
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident),* $(,)? } $(lambdas { $($name:ident => $method:expr),* $(,)? })?) => {
        impl $crate::Data for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(self)
            }
        }

        impl $crate::Record for $ty {
            fn field(&self, name: &str) -> ::std::option::Option<&dyn $crate::Data> {
                match name {
                    $(stringify!($field) => ::std::option::Option::Some(&self.$field),)*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn method(&self, name: &str) -> ::std::option::Option<$crate::Method<'_>> {
                match name {
                    $($(stringify!($name) => ::std::option::Option::Some($crate::Method::bind(self, $method)),)*)?
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_shapes() {
        assert_eq!(42u32.shape().kind(), "scalar");
        assert_eq!('x'.shape().kind(), "scalar");
        assert_eq!(true.shape().kind(), "bool");
        assert_eq!("text".shape().kind(), "string");
        assert_eq!(String::from("text").shape().kind(), "string");
    }

    #[test]
    fn test_bytes_are_not_sequences() {
        assert_eq!(b"abc".to_vec().shape().kind(), "bytes");
        assert_eq!(vec![1u32, 2].shape().kind(), "sequence");
        assert_eq!([1u32, 2, 3].shape().kind(), "sequence");
        assert_eq!((&b"abc"[..]).shape().kind(), "bytes");
        assert_eq!((&[1u32, 2][..]).shape().kind(), "sequence");
    }

    #[test]
    fn test_unsized_values_behind_pointers() {
        let boxed: Box<dyn Data> = Box::new(7u32);
        assert_eq!(boxed.shape().kind(), "scalar");
        let shared: Arc<dyn Data> = Arc::new("text");
        assert_eq!(shared.shape().kind(), "string");
        let text: Box<str> = "boxed".into();
        assert!(matches!(text.shape(), Shape::Str("boxed")));
    }

    struct Shared(Rc<String>);

    impl Data for Shared {
        fn shape(&self) -> Shape<'_> {
            Shape::Pointer(&self.0)
        }
    }

    #[test]
    fn test_wrappers() {
        assert_eq!(Box::new(1i32).shape().kind(), "scalar");
        assert_eq!(Rc::new("x".to_string()).shape().kind(), "string");
        assert_eq!(Shared(Rc::new("x".into())).shape().kind(), "pointer");
        assert_eq!(Some(1i32).shape().kind(), "optional");
        assert!(matches!(None::<i32>.shape(), Shape::Optional(None)));
    }

    #[test]
    fn test_tuple_elements() {
        let tuple = (1i32, "two", false);
        let Shape::Tuple(seq) = tuple.shape() else {
            panic!("expected tuple");
        };
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(1).map(|v| v.shape().kind()), Some("string"));
        assert!(seq.get(3).is_none());
    }

    #[test]
    fn test_maps_are_records() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), 1i32);
        let Shape::Record(record) = map.shape() else {
            panic!("expected record");
        };
        assert!(record.field("a").is_some());
        assert!(record.field("A").is_none());
        assert!(record.method("a").is_none());
    }
}
