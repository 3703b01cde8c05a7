//! Errors of the whole front end.

use crate::lexer::LexError;
use crate::parser::ParseError;
use thiserror::Error;

/// Either stage of the pipeline failed. Displayed as `<stage>: <message>`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("lexer: {0}")]
    Lex(#[from] LexError),
    #[error("parser: {0}")]
    Parse(#[from] ParseError),
}
