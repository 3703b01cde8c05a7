//! Lexer and parser for the cilly scripting language.
//!
//! The pipeline is `source text -> lexer::tokenize -> parser::parse -> ast::Program`.
//! Both stages stop at the first error.

pub mod ast;
pub mod display;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::Error;

use ast::Program;
use cilly_source::Source;

/// Tokenizes and parses `source`.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let source = Source::new(source);
    let tokens = lexer::tokenize(&source)?;
    Ok(parser::parse(tokens)?)
}
