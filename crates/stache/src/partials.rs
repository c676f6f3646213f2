// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Partial lookup.
//!
//! This module provides the [`PartialResolver`] trait and the in-memory
//! implementations the engine ships with.
//!
//! # Resolver Implementations
//!
//! - [`NoPartials`]: every partial is missing (the engine default)
//! - [`MemoryPartials`]: a shared, mutable name-to-source map
//! - `HashMap<String, String>`: a plain map
//!
//! # Custom Resolvers
//!
//! Implement [`PartialResolver`] to load partials from anywhere else. A
//! missing partial is `Ok(None)` and renders as nothing; an `Err` aborts
//! the render.

use crate::error::Result;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Looks up partial templates by name.
pub trait PartialResolver: Send + Sync {
    /// Returns the source of partial `name`, or `None` when there is none.
    fn resolve(&self, name: &str) -> Result<Option<Cow<'_, str>>>;
}

/// A resolver without partials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPartials;

impl PartialResolver for NoPartials {
    fn resolve(&self, _name: &str) -> Result<Option<Cow<'_, str>>> {
        Ok(None)
    }
}

impl<S: std::hash::BuildHasher + Send + Sync> PartialResolver for HashMap<String, String, S> {
    fn resolve(&self, name: &str) -> Result<Option<Cow<'_, str>>> {
        Ok(self.get(name).map(|source| Cow::Borrowed(source.as_str())))
    }
}

impl<P: PartialResolver + ?Sized> PartialResolver for &P {
    fn resolve(&self, name: &str) -> Result<Option<Cow<'_, str>>> {
        (**self).resolve(name)
    }
}

impl<P: PartialResolver + ?Sized> PartialResolver for Box<P> {
    fn resolve(&self, name: &str) -> Result<Option<Cow<'_, str>>> {
        (**self).resolve(name)
    }
}

impl<P: PartialResolver + ?Sized> PartialResolver for Arc<P> {
    fn resolve(&self, name: &str) -> Result<Option<Cow<'_, str>>> {
        (**self).resolve(name)
    }
}

/// Memory-based partial store.
///
/// Clones share the same storage, so partials can be added after the
/// store has been handed to an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Default)]
pub struct MemoryPartials {
    partials: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPartials {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces partial `name`.
    pub fn add(&self, name: impl Into<String>, source: impl Into<String>) {
        self.partials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), source.into());
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.add(name, source);
        self
    }

    /// Removes partial `name`.
    pub fn remove(&self, name: &str) {
        self.partials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    /// Removes all partials.
    pub fn clear(&self) {
        self.partials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// `true` if partial `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.partials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Number of stored partials.
    pub fn len(&self) -> usize {
        self.partials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// `true` when no partials are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialResolver for MemoryPartials {
    fn resolve(&self, name: &str) -> Result<Option<Cow<'_, str>>> {
        let partials = self.partials.read().unwrap_or_else(PoisonError::into_inner);
        Ok(partials.get(name).cloned().map(Cow::Owned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_partials_share_storage() {
        let partials = MemoryPartials::new().with("header", "<h1>{{title}}</h1>");
        let handle = partials.clone();
        handle.add("footer", "bye");

        assert_eq!(partials.len(), 2);
        assert_eq!(
            partials.resolve("footer").unwrap().as_deref(),
            Some("bye")
        );

        partials.remove("footer");
        assert!(!handle.contains("footer"));
        assert!(partials.resolve("footer").unwrap().is_none());

        handle.clear();
        assert!(partials.is_empty());
    }

    #[test]
    fn test_map_and_empty_resolvers() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), "A".to_string());
        assert_eq!(map.resolve("a").unwrap().as_deref(), Some("A"));
        assert!(map.resolve("b").unwrap().is_none());
        assert!(NoPartials.resolve("a").unwrap().is_none());
    }
}
