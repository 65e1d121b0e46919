use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::group::Group;
use super::store::{Store, ROOT_PATH};
use crate::GcfError;

/// Leading run of `../` segments in a relative path.
static PARENT_SEGMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\.\./)+").expect("valid parent segment pattern"));

/// Append the trailing `/` of the canonical form if it is missing.
pub fn canonical_path(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Navigation context: the "current group" that relative paths are
/// resolved against. Starts at the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: String,
}

impl Default for Navigator {
    fn default() -> Self {
        Self { current: ROOT_PATH.to_string() }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the current group; [`ROOT_PATH`] before any navigation.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn reset(&mut self) {
        self.current = ROOT_PATH.to_string();
    }

    /// Translate `target` into a canonical absolute path without moving.
    ///
    /// - `/A/B` is absolute and used as is
    /// - `C` or `C/D/` is appended to the current group's path
    /// - `../`, `../../E/` walk up the parent chain first
    pub fn resolve(&self, store: &Store, target: &str) -> Result<String, GcfError> {
        if target.is_empty() {
            return Err(GcfError::PathError {
                path: target.to_string(),
                message: "trying to access group with empty name".into(),
                hint: None,
                code: Some(300),
            });
        }
        if target == ROOT_PATH {
            return Err(root_not_navigable(target));
        }

        let formatted = canonical_path(target);
        let resolved = if target.starts_with('/') {
            formatted
        } else if let Some(parents) = PARENT_SEGMENTS.find(&formatted) {
            let depth = parents.as_str().len() / "../".len();
            let mut base = self.current.as_str();
            for _ in 0..depth {
                base = store.parent_of(base)?;
            }
            format!("{}{}", base, &formatted[parents.end()..])
        } else {
            format!("{}{}", self.current, formatted)
        };

        if resolved == ROOT_PATH {
            return Err(root_not_navigable(target));
        }
        Ok(resolved)
    }

    /// Resolve `target`, make it the current group and return it.
    pub fn change_group<'s>(&mut self, store: &'s Store, target: &str) -> Result<&'s Group, GcfError> {
        let path = self.resolve(store, target)?;
        let group = store.group(&path)?;
        debug!("navigation: {} -> {}", self.current, path);
        self.current = path;
        Ok(group)
    }

    /// Group-scoped navigation: only relative paths are accepted.
    pub fn change_relative<'s>(&mut self, store: &'s Store, target: &str) -> Result<&'s Group, GcfError> {
        if target.starts_with('/') {
            return Err(GcfError::PathError {
                path: target.to_string(),
                message: "absolute paths are not allowed relative to a group".into(),
                hint: Some("Use Settings::get_group for absolute paths".into()),
                code: Some(306),
            });
        }
        self.change_group(store, target)
    }

    pub(crate) fn set_current(&mut self, path: String) {
        self.current = path;
    }
}

fn root_not_navigable(target: &str) -> GcfError {
    GcfError::PathError {
        path: target.to_string(),
        message: "\"/\" is not a valid group".into(),
        hint: Some("The root group is not accessible; name a group below it".into()),
        code: Some(302),
    }
}
