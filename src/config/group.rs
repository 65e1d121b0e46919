use indexmap::IndexMap;
use log::warn;

use super::navigation::canonical_path;
use super::validation::{validate_key, validate_value};
use crate::ast::Value;
use crate::GcfError;

/// A named group and its keys.
///
/// Child groups are not owned here; they are looked up in the
/// [`Store`](super::Store) by parent path.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    name: String,
    path: String,
    parent: String,
    keys: IndexMap<String, Value>,
}

impl Group {
    /// Create an empty group named `name` below `parent`.
    pub fn new(parent: &str, name: &str) -> Self {
        let parent = canonical_path(parent);
        Self {
            name: name.to_string(),
            path: format!("{}{}/", parent, name),
            parent,
            keys: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical absolute path, always ending in `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Key names in declaration order.
    pub fn child_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn read_value(&self, key: &str) -> Result<&Value, GcfError> {
        self.keys.get(key).ok_or_else(|| GcfError::KeyNotFound {
            key: key.to_string(),
            group: self.path.clone(),
            hint: None,
            code: Some(320),
        })
    }

    /// Read a key as any type that can be re-derived from a value's text form.
    ///
    /// # Examples
    /// ```ignore
    /// let port: i32 = group.read("port")?;
    /// ```
    pub fn read<T>(&self, key: &str) -> Result<T, GcfError>
    where
        T: for<'v> TryFrom<&'v Value, Error = GcfError>,
    {
        T::try_from(self.read_value(key)?)
    }

    pub fn read_short(&self, key: &str) -> Result<i16, GcfError> {
        self.read(key)
    }

    pub fn read_int(&self, key: &str) -> Result<i32, GcfError> {
        self.read(key)
    }

    pub fn read_long(&self, key: &str) -> Result<i64, GcfError> {
        self.read(key)
    }

    pub fn read_float(&self, key: &str) -> Result<f32, GcfError> {
        self.read(key)
    }

    pub fn read_double(&self, key: &str) -> Result<f64, GcfError> {
        self.read(key)
    }

    pub fn read_boolean(&self, key: &str) -> Result<bool, GcfError> {
        self.read(key)
    }

    /// Any value can be read as a string. Reading a non-string value only
    /// logs a warning.
    pub fn read_string(&self, key: &str) -> Result<String, GcfError> {
        let value = self.read_value(key)?;
        if !value.is_text() {
            warn!(
                "value for key \"{}\" in group {} is a {}, not a string. Use the appropriate reader.",
                key,
                self.path,
                value.type_name()
            );
        }
        Ok(value.to_string())
    }

    /// Add `key` unless it already exists, in which case nothing changes.
    pub fn add_key(&mut self, key: &str, value: impl Into<Value>) -> Result<(), GcfError> {
        let value = value.into();
        validate_key(key)?;
        validate_value(&value)?;
        self.insert_parsed(key.to_string(), value);
        Ok(())
    }

    /// Replace the value of an existing key.
    pub fn change_value(&mut self, key: &str, value: impl Into<Value>) -> Result<(), GcfError> {
        let value = value.into();
        validate_value(&value)?;
        let slot = self.keys.get_mut(key).ok_or_else(|| GcfError::KeyNotFound {
            key: key.to_string(),
            group: self.path.clone(),
            hint: Some("Use add_key to create a new key".into()),
            code: Some(321),
        })?;
        *slot = value;
        Ok(())
    }

    /// Remove `key`; returns whether it was present.
    pub fn delete_key(&mut self, key: &str) -> bool {
        self.keys.shift_remove(key).is_some()
    }

    pub(crate) fn insert_parsed(&mut self, key: String, value: Value) -> bool {
        if self.keys.contains_key(&key) {
            return false;
        }
        self.keys.insert(key, value);
        true
    }
}
