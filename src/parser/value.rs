use once_cell::sync::Lazy;
use regex::Regex;

use super::*;
use crate::ast::Value;

/// Decimal number without exponent: `12`, `-3.`, `+.5`.
static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid decimal pattern"));

/// `keyValue := KEY EQUALS value`
pub(super) fn parse_key_value(parser: &mut Parser) -> Result<(String, Value), GcfError> {
    let key = parser.match_kind(TokenKind::Key)?;
    parser.match_kind(TokenKind::Equals)?;
    let value = parse_value(parser)?;
    Ok((key, value))
}

/// `value := VALUE | '$' '{' VARNAME '}'`
fn parse_value(parser: &mut Parser) -> Result<Value, GcfError> {
    if parser.la_kind(1) == TokenKind::GlobalVarSigil {
        return reference::parse_global_reference(parser);
    }
    let line = parser.line();
    let text = parser.match_kind(TokenKind::Value)?;
    coerce_literal(&text, line)
}

/// Derive a typed value from literal text.
///
/// Tried in order: 32-bit integer, 64-bit integer, float, boolean
/// (case-insensitive `true`/`false`), double-quoted string. Anything else is
/// a [`GcfError::ValueFormatError`]; bare words are never strings.
pub fn coerce_literal(text: &str, line: usize) -> Result<Value, GcfError> {
    if let Ok(n) = text.parse::<i32>() {
        return Ok(Value::Integer(n as i64));
    }
    if let Ok(n) = text.parse::<i64>() {
        return Ok(Value::Integer(n));
    }
    if DECIMAL.is_match(text) {
        if let Ok(x) = text.parse::<f64>() {
            return Ok(Value::Float(x));
        }
    }
    if text.eq_ignore_ascii_case("true") {
        return Ok(Value::Boolean(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Ok(Value::Boolean(false));
    }
    if text.is_empty() {
        return Ok(Value::Text(String::new()));
    }
    match text.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => Ok(Value::Text(inner.trim().to_string())),
        None => Err(GcfError::ValueFormatError {
            text: text.to_string(),
            line,
            hint: Some("Strings must be double-quoted; booleans are true or false".into()),
            code: Some(401),
        }),
    }
}
