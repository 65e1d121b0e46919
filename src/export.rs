use std::fs;

use serde_json::{json, Map};

use crate::config::{Group, Store, ROOT_PATH};
use crate::parser::Parser;
use crate::GcfError;

/// Export a parsed document to JSON.
///
/// The layout keeps declaration order:
/// ```text
/// {
///   "globals": { "host": "local" },
///   "groups": {
///     "Net": { "keys": { "port": 8080 }, "groups": { "Sub": { ... } } }
///   }
/// }
/// ```
pub fn export_store_to_json(store: &Store) -> Result<String, GcfError> {
    let globals = store
        .globals()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect::<Map<_, _>>();

    let top = json!({
        "globals": globals,
        "groups": groups_to_json(store, ROOT_PATH),
    });

    serde_json::to_string_pretty(&top).map_err(|e| GcfError::ValidationError {
        message: format!("Failed to export JSON: {}", e),
        hint: None,
        code: Some(460),
    })
}

fn groups_to_json(store: &Store, parent: &str) -> serde_json::Value {
    let groups = store
        .sub_groups_for_path(parent)
        .into_iter()
        .map(|g| (g.name().to_string(), group_to_json(store, g)))
        .collect::<Map<_, _>>();
    serde_json::Value::Object(groups)
}

fn group_to_json(store: &Store, group: &Group) -> serde_json::Value {
    let keys = group
        .keys()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect::<Map<_, _>>();
    json!({
        "keys": keys,
        "groups": groups_to_json(store, group.path()),
    })
}

/// Read, parse and export a GCF file in one call.
pub fn export_gcf_file(path: &str) -> Result<String, GcfError> {
    let input = fs::read_to_string(path).map_err(|e| GcfError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.to_string(),
        hint: None,
        code: Some(311),
    })?;

    let store = Parser::new(&input)?.parse_document()?;
    export_store_to_json(&store)
}
