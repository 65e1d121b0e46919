use super::*;
use crate::ast::Value;

/// `'$' '{' VARNAME '}'`, resolved by copying the value of an already
/// declared global key.
pub(super) fn parse_global_reference(parser: &mut Parser) -> Result<Value, GcfError> {
    parser.match_kind(TokenKind::GlobalVarSigil)?;
    parser.match_kind(TokenKind::GlobalVarOpen)?;
    let line = parser.line();
    let name = parser.match_kind(TokenKind::GlobalVarName)?;

    let value = parser
        .store
        .global(&name)
        .cloned()
        .ok_or_else(|| GcfError::ReferenceError {
            name: name.clone(),
            line,
            hint: Some("Global keys must be declared before any group and before use".into()),
            code: Some(220),
        })?;

    parser.match_kind(TokenKind::GlobalVarClose)?;
    Ok(value)
}
