use log::trace;

use super::*;
use super::scanner::{bump, skip_whitespace_and_comments, take_while};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, GcfError> {
    skip_whitespace_and_comments(lexer);

    let line = lexer.line;
    let token = match lexer.peek {
        None => Token::new(TokenKind::Eof, "EOF", line),
        Some('[') => {
            // global keys must come before any group
            let ctx = &mut lexer.context;
            ctx.global_keys = false;
            ctx.group_name = true;
            ctx.key = false;
            ctx.value = false;
            tokenize_symbol(lexer, TokenKind::GroupOpen, '[')
        }
        Some(']') => {
            let ctx = &mut lexer.context;
            ctx.group_name = false;
            ctx.key = true;
            ctx.value = false;
            tokenize_symbol(lexer, TokenKind::GroupClose, ']')
        }
        Some('/') => tokenize_symbol(lexer, TokenKind::GroupSlash, '/'),
        Some('=') => {
            lexer.context.key = false;
            lexer.context.value = true;
            tokenize_symbol(lexer, TokenKind::Equals, '=')
        }
        Some('$') => tokenize_symbol(lexer, TokenKind::GlobalVarSigil, '$'),
        Some('{') => {
            lexer.context.global_var = true;
            tokenize_symbol(lexer, TokenKind::GlobalVarOpen, '{')
        }
        Some('}') => {
            let ctx = &mut lexer.context;
            ctx.key = true;
            ctx.value = false;
            ctx.global_var = false;
            tokenize_symbol(lexer, TokenKind::GlobalVarClose, '}')
        }
        Some(c) if starts_word(c) => tokenize_word(lexer, c)?,
        Some(c) => return Err(unexpected_char(lexer, c)),
    };

    trace!("line {}: {:?} {:?}", token.line, token.kind, token.text);
    Ok(token)
}

fn starts_word(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '"' || c == '-' || c == '+'
}

fn tokenize_symbol(lexer: &mut Lexer, kind: TokenKind, symbol: char) -> Token {
    let line = lexer.line;
    bump(lexer);
    Token::new(kind, symbol.to_string(), line)
}

/// Dispatch a word-like run on the current context.
fn tokenize_word(lexer: &mut Lexer, first: char) -> Result<Token, GcfError> {
    let line = lexer.line;
    let ctx = lexer.context;

    if ctx.group_name {
        Ok(Token::new(TokenKind::GroupName, group_name_text(lexer, first)?, line))
    } else if ctx.key {
        Ok(Token::new(TokenKind::Key, key_text(lexer, first)?, line))
    } else if ctx.global_var {
        Ok(Token::new(TokenKind::GlobalVarName, global_var_text(lexer, first)?, line))
    } else if ctx.value {
        lexer.context.key = true;
        lexer.context.value = false;
        Ok(Token::new(TokenKind::Value, value_text(lexer, first)?, line))
    } else if ctx.global_keys {
        Ok(Token::new(TokenKind::Key, key_text(lexer, first)?, line))
    } else {
        Err(unexpected_char(lexer, first))
    }
}

fn group_name_text(lexer: &mut Lexer, first: char) -> Result<String, GcfError> {
    if !(first.is_alphabetic() || first.is_ascii_digit()) {
        return Err(lexical_error(
            lexer,
            format!("group name must start with a letter or digit, found '{}'", first),
            None,
            105,
        ));
    }

    let mut name = String::new();
    take_while(lexer, &mut name, |c| {
        c.is_alphabetic() || c.is_ascii_digit() || c == '_' || c == '-'
    });
    Ok(name)
}

fn key_text(lexer: &mut Lexer, first: char) -> Result<String, GcfError> {
    if !first.is_alphabetic() {
        return Err(lexical_error(
            lexer,
            format!("key must start with a letter, found '{}'", first),
            None,
            106,
        ));
    }

    let mut key = String::new();
    take_while(lexer, &mut key, |c| c.is_alphabetic() || c.is_ascii_digit() || c == '_');
    Ok(key)
}

fn global_var_text(lexer: &mut Lexer, first: char) -> Result<String, GcfError> {
    if !is_global_var_char(first) {
        return Err(lexical_error(
            lexer,
            format!("global variable can only contain letters, digits and '_', found '{}'", first),
            None,
            107,
        ));
    }

    let mut name = String::new();
    take_while(lexer, &mut name, is_global_var_char);
    Ok(name)
}

fn is_global_var_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '_'
}

/// Raw value text: numeric, quoted string (quotes kept), or a run of letters
/// whose validity is decided later by coercion.
fn value_text(lexer: &mut Lexer, first: char) -> Result<String, GcfError> {
    if first.is_ascii_digit() || first == '-' || first == '+' {
        number_text(lexer)
    } else if first == '"' {
        string_text(lexer)
    } else {
        let mut word = String::new();
        take_while(lexer, &mut word, char::is_alphabetic);
        Ok(word)
    }
}

fn number_text(lexer: &mut Lexer) -> Result<String, GcfError> {
    let mut num = String::new();
    if let Some(sign) = bump(lexer) {
        num.push(sign);
    }

    let mut seen_dot = false;
    while let Some(ch) = lexer.peek {
        if ch == '.' {
            if seen_dot {
                return Err(lexical_error(
                    lexer,
                    format!("malformed number '{}.'", num),
                    Some("A number may contain at most one '.'".into()),
                    102,
                ));
            }
            seen_dot = true;
        } else if !ch.is_ascii_digit() {
            break;
        }
        num.push(ch);
        bump(lexer);
    }
    Ok(num)
}

fn string_text(lexer: &mut Lexer) -> Result<String, GcfError> {
    let start_line = lexer.line;
    let mut content = String::new();
    if let Some(quote) = bump(lexer) {
        content.push(quote);
    }

    loop {
        match lexer.peek {
            Some('"') => {
                content.push('"');
                bump(lexer);
                return Ok(content);
            }
            Some('\n') | None => {
                return Err(GcfError::LexicalError {
                    message: format!("string not correctly closed at line {}", start_line),
                    line: start_line,
                    column: lexer.column,
                    hint: Some("Strings must be closed with '\"' on the same line".into()),
                    code: Some(103),
                });
            }
            Some(ch) => {
                content.push(ch);
                bump(lexer);
            }
        }
    }
}

fn unexpected_char(lexer: &Lexer, ch: char) -> GcfError {
    lexical_error(
        lexer,
        format!("invalid character '{}' at line {}", ch, lexer.line),
        Some("Unexpected character in input".into()),
        104,
    )
}

fn lexical_error(lexer: &Lexer, message: String, hint: Option<String>, code: u32) -> GcfError {
    GcfError::LexicalError {
        message,
        line: lexer.line,
        column: lexer.column,
        hint,
        code: Some(code),
    }
}
