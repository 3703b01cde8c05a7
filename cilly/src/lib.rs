//! Helpers shared by the `cilly` binary and its tests.

use cilly_parser::ast::Program;
use cilly_parser::Error;
use console::style;

/// Parses `source` and renders the AST in list form.
pub fn render(source: &str) -> Result<String, Error> {
    let program: Program = cilly_parser::parse_source(source)?;
    Ok(program.to_string())
}

/// Formats `err` for stderr, highlighting the stage that failed.
pub fn styled_error(err: &Error) -> String {
    let (stage, message) = match err {
        Error::Lex(err) => ("lexer", err.to_string()),
        Error::Parse(err) => ("parser", err.to_string()),
    };
    format!("{}: {}", style(stage).for_stderr().red().bold(), message)
}
