use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip whitespace and `#` comments. Comments run to the end of the line.
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                bump(lexer);
            }
            '#' => {
                while let Some(ch) = lexer.peek {
                    if ch == '\n' {
                        break;
                    }
                    bump(lexer);
                }
            }
            _ => break,
        }
    }
}

/// Consume characters while `accept` holds, appending them to `out`
pub(super) fn take_while(lexer: &mut Lexer, out: &mut String, accept: impl Fn(char) -> bool) {
    while let Some(ch) = lexer.peek {
        if !accept(ch) {
            break;
        }
        out.push(ch);
        bump(lexer);
    }
}
