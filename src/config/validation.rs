use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Value;
use crate::GcfError;

static KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Alphabetic}[\p{Alphabetic}0-9_]*$").expect("valid key pattern"));

static GROUP_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{Alphabetic}0-9][\p{Alphabetic}0-9_-]*$").expect("valid group name pattern")
});

/// Keys start with a letter, then letters, digits and `_`.
pub fn validate_key(key: &str) -> Result<(), GcfError> {
    if KEY.is_match(key) {
        return Ok(());
    }
    Err(GcfError::ValidationError {
        message: format!("invalid key name '{}'", key),
        hint: Some("Keys start with a letter and contain only letters, digits and '_'".into()),
        code: Some(450),
    })
}

pub fn validate_group_name(name: &str) -> Result<(), GcfError> {
    if GROUP_NAME.is_match(name) {
        return Ok(());
    }
    Err(GcfError::ValidationError {
        message: format!("invalid group name '{}'", name),
        hint: Some("Group names contain only letters, digits, '_' and '-'".into()),
        code: Some(451),
    })
}

/// Values must survive being written back and re-read unchanged: text goes
/// between double quotes on one line and is trimmed on parse, floats are
/// written as plain decimals.
pub fn validate_value(value: &Value) -> Result<(), GcfError> {
    match value {
        Value::Text(s) if s.contains('"') || s.contains('\n') => Err(GcfError::ValidationError {
            message: format!("string value {:?} cannot be written as GCF", s),
            hint: Some("Strings may not contain '\"' or line breaks".into()),
            code: Some(452),
        }),
        Value::Text(s) if s.trim() != s => Err(GcfError::ValidationError {
            message: format!("string value {:?} has leading or trailing whitespace", s),
            hint: Some("Quoted strings are trimmed when read back".into()),
            code: Some(454),
        }),
        Value::Float(x) if !x.is_finite() => Err(GcfError::ValidationError {
            message: format!("float value {} cannot be written as GCF", x),
            hint: Some("Only finite floats have a decimal literal".into()),
            code: Some(453),
        }),
        _ => Ok(()),
    }
}
