use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::ast::Value;
use crate::export;
use crate::parser::Parser;
use crate::writer;
use crate::GcfError;

mod conversion;
mod group;
mod navigation;
mod store;
mod validation;

pub use group::Group;
pub use navigation::{canonical_path, Navigator};
pub use store::{Store, ROOT_PATH};
pub use validation::{validate_group_name, validate_key, validate_value};

/// Extensions accepted by [`Settings::from_file`].
pub const FILE_EXTENSIONS: [&str; 3] = ["gcf", "Gcf", "GCF"];

/// A parsed GCF document: the group store, the navigation context and,
/// when loaded from disk, the backing file.
#[derive(Debug, Clone)]
pub struct Settings {
    store: Store,
    navigator: Navigator,
    file: Option<PathBuf>,
}

impl Settings {
    /// Parse a GCF document from a string (no file I/O).
    ///
    /// # Example
    /// ```ignore
    /// let mut settings = Settings::open("[Net]\n port = 8080\n[/Net]")?;
    /// assert_eq!(settings.get_group("/Net/")?.read_int("port")?, 8080);
    /// ```
    pub fn open(source: &str) -> Result<Self, GcfError> {
        let mut parser = Parser::new(source)?;
        let store = parser.parse_document()?;
        Ok(Self {
            store,
            navigator: Navigator::new(),
            file: None,
        })
    }

    /// Load a `.gcf` file. A leading `~/` is expanded to the home directory.
    /// The whole file is read before parsing starts.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GcfError> {
        let path = expand_home(path.as_ref())?;
        check_file_extension(&path)?;

        let content = fs::read_to_string(&path).map_err(|e| GcfError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(311),
        })?;
        debug!("read {} bytes from {}", content.len(), path.display());

        let mut settings = Self::open(&content)?;
        settings.file = Some(path);
        Ok(settings)
    }

    /// File this document was loaded from, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn global(&self, key: &str) -> Result<&Value, GcfError> {
        self.store.global(key).ok_or_else(|| GcfError::KeyNotFound {
            key: key.to_string(),
            group: ROOT_PATH.to_string(),
            hint: Some("Global keys are declared before the first group".into()),
            code: Some(322),
        })
    }

    pub fn global_keys(&self) -> impl Iterator<Item = &str> {
        self.store.globals().map(|(k, _)| k)
    }

    /// Navigate to `path` (absolute, or relative to the current group) and
    /// return the group found there.
    pub fn get_group(&mut self, path: &str) -> Result<&Group, GcfError> {
        self.navigator.change_group(&self.store, path)
    }

    /// Like [`get_group`](Self::get_group) but allows modifying the group's keys.
    pub fn get_group_mut(&mut self, path: &str) -> Result<&mut Group, GcfError> {
        let resolved = self.navigator.resolve(&self.store, path)?;
        if !self.store.contains_group(&resolved) {
            return Err(GcfError::path_not_found(&resolved));
        }
        self.navigator.set_current(resolved.clone());
        self.store.group_mut(&resolved)
    }

    /// Navigate relative to the current group. Absolute paths are rejected.
    pub fn change_group(&mut self, relative: &str) -> Result<&Group, GcfError> {
        self.navigator.change_relative(&self.store, relative)
    }

    /// The current group, or `None` while positioned at the root.
    pub fn current_group(&self) -> Option<&Group> {
        self.store.group(self.navigator.current()).ok()
    }

    /// Top-level groups in declaration order.
    pub fn child_groups(&self) -> Vec<&Group> {
        self.store.sub_groups_for_path(ROOT_PATH)
    }

    /// Direct children of the group at the absolute `path`.
    pub fn sub_groups(&self, path: &str) -> Result<Vec<&Group>, GcfError> {
        let path = canonical_path(path);
        self.store.group(&path)?;
        Ok(self.store.sub_groups_for_path(&path))
    }

    pub fn add_top_group(&mut self, name: &str) -> Result<(), GcfError> {
        self.add_sub_group(ROOT_PATH, name)
    }

    /// Add an empty group `name` below the group at `parent`. No-op if it exists.
    pub fn add_sub_group(&mut self, parent: &str, name: &str) -> Result<(), GcfError> {
        validate_group_name(name)?;
        let parent = canonical_path(parent);
        let group = Group::new(&parent, name);
        if parent == ROOT_PATH {
            self.store.add_top_group(group);
        } else {
            self.store.group(&parent)?;
            self.store.add_group(group)?;
        }
        Ok(())
    }

    /// Delete the child `name` of the group at `parent`, including its whole
    /// subtree. Fails if there is no such child.
    pub fn delete_sub_group(&mut self, parent: &str, name: &str) -> Result<(), GcfError> {
        validate_group_name(name)?;
        let child = format!("{}{}/", canonical_path(parent), name);
        if !self.store.contains_group(&child) {
            return Err(GcfError::PathError {
                path: child,
                message: "no such group to delete".into(),
                hint: None,
                code: Some(308),
            });
        }

        self.store.delete_sub_group(&child);
        if self.navigator.current().starts_with(&child) {
            self.navigator.reset();
        }
        Ok(())
    }

    pub fn delete_top_group(&mut self, name: &str) -> Result<(), GcfError> {
        self.delete_sub_group(ROOT_PATH, name)
    }

    /// Canonical GCF text for the current state of the document.
    pub fn serialize(&self) -> String {
        writer::write_document(&self.store)
    }

    pub fn to_json(&self) -> Result<String, GcfError> {
        export::export_store_to_json(&self.store)
    }

    /// Write back to the file the document was loaded from.
    pub fn save(&self) -> Result<(), GcfError> {
        match &self.file {
            Some(path) => self.save_to_file(path),
            None => Err(GcfError::FileError {
                message: "document was not loaded from a file".into(),
                path: String::new(),
                hint: Some("Use save_to_file to choose a destination".into()),
                code: Some(313),
            }),
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GcfError> {
        let path = expand_home(path.as_ref())?;
        fs::write(&path, self.serialize()).map_err(|e| GcfError::FileError {
            message: format!("Failed to write file: {}", e),
            path: path.display().to_string(),
            hint: Some("Check that the directory exists and is writable".into()),
            code: Some(312),
        })?;
        debug!("saved settings to {}", path.display());
        Ok(())
    }
}

impl FromStr for Settings {
    type Err = GcfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::open(s)
    }
}

fn check_file_extension(path: &Path) -> Result<(), GcfError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if FILE_EXTENSIONS.contains(&ext) {
        return Ok(());
    }
    Err(GcfError::FileError {
        message: format!("file must have one of the following extensions: {:?}", FILE_EXTENSIONS),
        path: path.display().to_string(),
        hint: None,
        code: Some(310),
    })
}

/// Expand "~/" to the user's home directory.
fn expand_home(path: &Path) -> Result<PathBuf, GcfError> {
    let Some(rest) = path.to_str().and_then(|p| p.strip_prefix("~/")) else {
        return Ok(path.to_path_buf());
    };
    let home = dirs::home_dir().ok_or_else(|| GcfError::FileError {
        message: "Could not determine home directory for ~ expansion".into(),
        path: path.display().to_string(),
        hint: Some("Set HOME or use an absolute path".into()),
        code: Some(314),
    })?;
    Ok(home.join(rest))
}

#[cfg(test)]
mod tests;
