use std::str::FromStr;

use crate::{GcfError, Value};

// Every reader re-derives the scalar from the value's text form rather than
// from the stored variant, so Text("42") reads as 42 and Integer(1) as 1.0.

fn reparse<T: FromStr>(value: &Value, target: &'static str) -> Result<T, GcfError> {
    let text = value.to_string();
    text.parse::<T>().map_err(|_| GcfError::ConversionError {
        value: text,
        target,
        hint: Some(format!("Stored value is a {}", value.type_name())),
        code: Some(402),
    })
}

impl TryFrom<&Value> for i16 {
    type Error = GcfError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        reparse(value, "a short integer")
    }
}

impl TryFrom<&Value> for i32 {
    type Error = GcfError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        reparse(value, "an integer")
    }
}

impl TryFrom<&Value> for i64 {
    type Error = GcfError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        reparse(value, "a long integer")
    }
}

impl TryFrom<&Value> for f32 {
    type Error = GcfError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        reparse(value, "a float")
    }
}

impl TryFrom<&Value> for f64 {
    type Error = GcfError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        reparse(value, "a double")
    }
}

impl TryFrom<&Value> for bool {
    type Error = GcfError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let text = value.to_string();
        match text.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(GcfError::ConversionError {
                value: text,
                target: "a boolean",
                hint: Some("Booleans are written true or false".into()),
                code: Some(403),
            }),
        }
    }
}

impl TryFrom<&Value> for String {
    type Error = GcfError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(value.to_string())
    }
}
