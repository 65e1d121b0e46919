use log::{debug, warn};

use super::*;
use crate::config::{Group, ROOT_PATH};

/// `document := (globalKey | group)* EOF`
pub(super) fn parse_document(parser: &mut Parser) -> Result<(), GcfError> {
    loop {
        match parser.la_kind(1) {
            TokenKind::Eof => break,
            TokenKind::Key => parse_global_key(parser)?,
            TokenKind::GroupOpen if parser.la_kind(2) != TokenKind::GroupSlash => {
                parser.globals_open = false;
                parse_group(parser, ROOT_PATH)?;
            }
            _ => return Err(parser.unexpected("global key or group")),
        }
    }
    Ok(())
}

fn parse_global_key(parser: &mut Parser) -> Result<(), GcfError> {
    let line = parser.line();
    if !parser.globals_open {
        return Err(GcfError::StructuralError {
            message: format!(
                "global key '{}' declared after the first group",
                parser.la(1).text
            ),
            line,
            hint: Some("Declare global keys at the top of the file, before any group".into()),
            code: Some(214),
        });
    }

    let (key, value) = value::parse_key_value(parser)?;
    if !parser.store.add_global_key(key.clone(), value) {
        warn!("duplicate global key '{}' at line {} ignored", key, line);
    }
    Ok(())
}

/// `group := '[' NAME ']' (keyValue | group)* '[' '/' NAME ']'`
fn parse_group(parser: &mut Parser, parent: &str) -> Result<(), GcfError> {
    parser.match_kind(TokenKind::GroupOpen)?;
    let name = parser.match_kind(TokenKind::GroupName)?;
    parser.match_kind(TokenKind::GroupClose)?;

    let group = Group::new(parent, &name);
    let path = group.path().to_string();
    debug!("parsed group header {}", path);
    if parent == ROOT_PATH {
        parser.store.add_top_group(group);
    } else {
        parser.store.add_group(group)?;
    }

    loop {
        match parser.la_kind(1) {
            TokenKind::Key => {
                let line = parser.line();
                let (key, value) = value::parse_key_value(parser)?;
                if !parser.store.group_mut(&path)?.insert_parsed(key.clone(), value) {
                    warn!("duplicate key '{}' in group {} at line {} ignored", key, path, line);
                }
            }
            TokenKind::GroupOpen if parser.la_kind(2) == TokenKind::GroupSlash => {
                return parse_group_footer(parser, &name, &path);
            }
            TokenKind::GroupOpen => parse_group(parser, &path)?,
            TokenKind::Eof => {
                return Err(GcfError::StructuralError {
                    message: format!("group \"{}\" not closed", path),
                    line: parser.line(),
                    hint: Some(format!("Add [/{}] to close the group", name)),
                    code: Some(215),
                });
            }
            _ => return Err(parser.unexpected("key, group or close tag")),
        }
    }
}

fn parse_group_footer(parser: &mut Parser, name: &str, path: &str) -> Result<(), GcfError> {
    parser.match_kind(TokenKind::GroupOpen)?;
    parser.match_kind(TokenKind::GroupSlash)?;
    let line = parser.line();
    let closing = parser.match_kind(TokenKind::GroupName)?;
    if closing != name {
        return Err(GcfError::StructuralError {
            message: format!(
                "group \"{}\" not correctly closed at line {}: found [/{}]",
                path, line, closing
            ),
            line,
            hint: Some(format!("Close the group with [/{}]", name)),
            code: Some(216),
        });
    }
    parser.match_kind(TokenKind::GroupClose)?;
    Ok(())
}
