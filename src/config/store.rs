use indexmap::IndexMap;
use log::debug;

use super::group::Group;
use super::navigation::canonical_path;
use crate::ast::Value;
use crate::GcfError;

/// Path of the implicit root that owns global keys and top-level groups.
/// It is never stored as a group and cannot be navigated to.
pub const ROOT_PATH: &str = "/";

/// Flat, path-keyed storage for a parsed document.
///
/// Groups live in one insertion-ordered map keyed by their canonical
/// absolute path. Children are found by filtering on the parent path, and a
/// subtree is removed by path prefix. Global keys are kept apart from the
/// group map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    globals: IndexMap<String, Value>,
    groups: IndexMap<String, Group>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and leaves the store untouched if `key` is already declared.
    pub fn add_global_key(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if self.globals.contains_key(&key) {
            return false;
        }
        self.globals.insert(key, value);
        true
    }

    pub fn global(&self, key: &str) -> Option<&Value> {
        self.globals.get(key)
    }

    pub fn globals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.globals.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert a group directly below the root. First writer wins.
    pub fn add_top_group(&mut self, group: Group) -> bool {
        debug_assert_eq!(group.parent(), ROOT_PATH);
        self.insert(group)
    }

    /// Insert a group whose parent is already stored. Inserting an existing
    /// path is a no-op and returns `Ok(false)`.
    pub fn add_group(&mut self, group: Group) -> Result<bool, GcfError> {
        if group.parent() != ROOT_PATH && !self.groups.contains_key(group.parent()) {
            return Err(GcfError::path_not_found(group.parent()));
        }
        Ok(self.insert(group))
    }

    fn insert(&mut self, group: Group) -> bool {
        if self.groups.contains_key(group.path()) {
            return false;
        }
        debug!("store: added group {}", group.path());
        self.groups.insert(group.path().to_string(), group);
        true
    }

    pub fn contains_group(&self, path: &str) -> bool {
        self.groups.contains_key(path)
    }

    pub fn group(&self, path: &str) -> Result<&Group, GcfError> {
        self.groups
            .get(path)
            .ok_or_else(|| GcfError::path_not_found(path))
    }

    pub fn group_mut(&mut self, path: &str) -> Result<&mut Group, GcfError> {
        self.groups
            .get_mut(path)
            .ok_or_else(|| GcfError::path_not_found(path))
    }

    /// Parent path of a stored group; the root has no parent.
    pub fn parent_of(&self, path: &str) -> Result<&str, GcfError> {
        if path == ROOT_PATH {
            return Err(GcfError::PathError {
                path: path.to_string(),
                message: "cannot navigate above the root group".into(),
                hint: Some("Remove one '../' from the path".into()),
                code: Some(305),
            });
        }
        Ok(self.group(path)?.parent())
    }

    /// Every group whose parent is `path`, in insertion order.
    pub fn sub_groups_for_path(&self, path: &str) -> Vec<&Group> {
        self.groups
            .values()
            .filter(|g| g.parent() == path)
            .collect()
    }

    /// Remove `path` and every group below it. Returns the number of groups
    /// removed. The root itself cannot be deleted; passing it removes nothing.
    pub fn delete_sub_group(&mut self, path: &str) -> usize {
        let prefix = canonical_path(path);
        if prefix == ROOT_PATH {
            return 0;
        }
        let before = self.groups.len();
        self.groups.retain(|p, _| !p.starts_with(&prefix));
        let removed = before - self.groups.len();
        debug!("store: deleted {} group(s) under {}", removed, prefix);
        removed
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Number of stored groups, not counting the root or global keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` when no group is stored. Global keys are not counted, as in [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
