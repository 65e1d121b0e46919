use std::fmt;
use std::str::Chars;

use crate::GcfError;

mod scanner;
mod tokenizer;

/// Kinds of tokens produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    // --- groups ---
    GroupOpen,
    GroupClose,
    GroupName,
    GroupSlash,

    // --- key/value ---
    Key,
    Equals,
    Value,

    // --- global references ---
    GlobalVarSigil,
    GlobalVarOpen,
    GlobalVarClose,
    GlobalVarName,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Eof => "end of file",
            TokenKind::GroupOpen => "'['",
            TokenKind::GroupClose => "']'",
            TokenKind::GroupName => "group name",
            TokenKind::GroupSlash => "'/'",
            TokenKind::Key => "key",
            TokenKind::Equals => "'='",
            TokenKind::Value => "value",
            TokenKind::GlobalVarSigil => "'$'",
            TokenKind::GlobalVarOpen => "'{'",
            TokenKind::GlobalVarClose => "'}'",
            TokenKind::GlobalVarName => "global variable name",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line the token starts on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self { kind, text: text.into(), line }
    }
}

/// Which production a word-like character run belongs to.
#[derive(Debug, Clone, Copy)]
struct Context {
    global_keys: bool,
    group_name: bool,
    key: bool,
    value: bool,
    global_var: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            global_keys: true,
            group_name: false,
            key: false,
            value: false,
            global_var: false,
        }
    }
}

/// Context-sensitive GCF tokenizer.
///
/// Whether a run of letters is a group name, a key, a value or a global
/// variable name depends on the symbols seen before it, so the lexer keeps a
/// small set of context flags that each symbol updates.
pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
    context: Context,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
            context: Context::default(),
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Produce the next token. Once input is exhausted every call returns
    /// [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Result<Token, GcfError> {
        tokenizer::next_token(self)
    }
}
