use std::collections::VecDeque;

use crate::GcfError;
use crate::config::Store;
use crate::lexer::{Lexer, Token, TokenKind};

mod document;
mod reference;
mod value;

pub use value::coerce_literal;

/// Number of tokens the grammar needs to look ahead. Two are enough to tell
/// `[Name]` from `[/Name]`.
const LOOKAHEAD: usize = 2;

/// Single-pass LL(2) recursive-descent parser for GCF.
///
/// Groups and keys are inserted into the [`Store`] as soon as they are
/// recognized, so a child group always finds its parent already stored.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: VecDeque<Token>,
    store: Store,
    globals_open: bool,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, GcfError> {
        let mut lexer = Lexer::new(input);
        let mut lookahead = VecDeque::with_capacity(LOOKAHEAD);
        for _ in 0..LOOKAHEAD {
            lookahead.push_back(lexer.next_token()?);
        }
        Ok(Self {
            lexer,
            lookahead,
            store: Store::new(),
            globals_open: true,
        })
    }

    /// Parse the whole input and hand over the populated store.
    pub fn parse_document(&mut self) -> Result<Store, GcfError> {
        document::parse_document(self)?;
        Ok(std::mem::take(&mut self.store))
    }

    /// The `i`-th lookahead token, 1-based.
    pub(crate) fn la(&self, i: usize) -> &Token {
        &self.lookahead[i - 1]
    }

    pub(crate) fn la_kind(&self, i: usize) -> TokenKind {
        self.la(i).kind
    }

    pub(crate) fn line(&self) -> usize {
        self.la(1).line
    }

    /// Shift the window by one token and return the token that left it.
    fn consume(&mut self) -> Result<Token, GcfError> {
        let next = self.lexer.next_token()?;
        self.lookahead.rotate_left(1);
        Ok(std::mem::replace(&mut self.lookahead[LOOKAHEAD - 1], next))
    }

    /// Return the current token's text and advance if it is of kind
    /// `expected`; every grammar rule is built on this.
    pub(crate) fn match_kind(&mut self, expected: TokenKind) -> Result<String, GcfError> {
        if self.la_kind(1) != expected {
            return Err(self.unexpected(&expected.to_string()));
        }
        Ok(self.consume()?.text)
    }

    pub(crate) fn unexpected(&self, expected: &str) -> GcfError {
        let tok = self.la(1);
        let found = match tok.kind {
            TokenKind::Eof => tok.kind.to_string(),
            kind => format!("{} '{}'", kind, tok.text),
        };
        GcfError::SyntaxError {
            expected: expected.to_string(),
            found,
            line: tok.line,
            hint: None,
            code: Some(202),
        }
    }
}
