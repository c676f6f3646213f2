// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Partials read from a directory.
//!
//! `{{> header}}` loads `<dir>/header.<extension>`. Names may contain `/` to
//! reach into subdirectories. A missing file is a missing partial and
//! renders as nothing.

use stache::{PartialResolver, StacheError};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// A [`PartialResolver`] over a directory of template files.
#[derive(Debug, Clone)]
pub struct DirectoryPartials {
    dir: PathBuf,
    extension: String,
}

impl DirectoryPartials {
    /// Creates a resolver for `dir`, reading files with `extension`.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// The file a partial name maps to, or `None` for names that would
    /// leave the directory.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !contained {
            return None;
        }

        let mut file = self.dir.join(relative).into_os_string();
        if !self.extension.is_empty() {
            file.push(".");
            file.push(&self.extension);
        }
        Some(PathBuf::from(file))
    }
}

impl PartialResolver for DirectoryPartials {
    fn resolve(&self, name: &str) -> stache::Result<Option<Cow<'_, str>>> {
        let Some(path) = self.path_for(name) else {
            tracing::debug!(name, "partial name leaves the partials directory");
            return Ok(None);
        };

        match fs::read_to_string(&path) {
            Ok(source) => {
                tracing::debug!(name, path = %path.display(), "loaded partial");
                Ok(Some(Cow::Owned(source)))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(name, path = %path.display(), "partial not found");
                Ok(None)
            }
            Err(err) => Err(StacheError::Partial {
                name: name.to_string(),
                message: format!("{}: {err}", path.display()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_appends_extension() {
        let partials = DirectoryPartials::new("views", "mustache");
        assert_eq!(
            partials.path_for("layout/header"),
            Some(PathBuf::from("views/layout/header.mustache"))
        );
    }

    #[test]
    fn test_path_for_keeps_dots_in_names() {
        let partials = DirectoryPartials::new("views", "html");
        assert_eq!(
            partials.path_for("item.row"),
            Some(PathBuf::from("views/item.row.html"))
        );
    }

    #[test]
    fn test_path_for_rejects_escaping_names() {
        let partials = DirectoryPartials::new("views", "mustache");
        assert_eq!(partials.path_for("../secret"), None);
        assert_eq!(partials.path_for("/etc/passwd"), None);
    }

    #[test]
    fn test_missing_file_is_missing_partial() {
        let partials = DirectoryPartials::new("does-not-exist", "mustache");
        assert!(partials.resolve("nope").unwrap().is_none());
    }
}
