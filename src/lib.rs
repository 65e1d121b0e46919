pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod writer;

pub use ast::Value;
pub use config::{Group, Navigator, Settings, Store};
pub use error::GcfError;
pub use lexer::{Token, TokenKind};
