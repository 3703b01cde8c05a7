use crate::ast::{Expr, Program, Stmt};
use crate::lexer::{Spanned, Token};
use cilly_source::{Location, Span};
use std::collections::HashSet;
use std::mem;
use thiserror::Error;

mod expr;
mod stmt;

/// Raised at the first token that does not fit the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {}, found {found} at {location}", list_expected(.expected))]
pub struct ParseError {
    /// Descriptions of what would have been accepted (e.g. "`;`", "identifier", "expression").
    pub expected: Vec<String>,
    pub found: Token,
    pub location: Location,
}

fn list_expected(expected: &[String]) -> String {
    match expected {
        [single] => single.clone(),
        _ => format!("one of {}", expected.join(", ")),
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// How deep expressions and statements may nest before parsing gives up.
const MAX_DEPTH: usize = 128;

/// Parses a token stream produced by [`crate::lexer::tokenize`].
pub fn parse(tokens: Vec<Spanned>) -> Result<Program> {
    Parser::new(tokens).parse_program()
}

pub struct Parser {
    tokens: Vec<Spanned>,
    /// Index of the current token. Never moves past the trailing [`Token::Eof`].
    position: usize,
    /// Names that were seen being declared as (or initialized from) functions so far.
    /// Decides whether a statement starting with an identifier is a call or an assignment.
    function_names: HashSet<String>,
    /// Current nesting of expressions and statements, bounded by [`MAX_DEPTH`].
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Spanned>) -> Self {
        if !matches!(tokens.last(), Some(Spanned { token: Token::Eof, .. })) {
            let (span, location) = match tokens.last() {
                Some(last) => (Span::new(last.span.end, last.span.end), last.location),
                None => (Span::default(), Location { line: 1, column: 1 }),
            };
            tokens.push(Spanned {
                token: Token::Eof,
                span,
                location,
            });
        }

        Self {
            tokens,
            position: 0,
            function_names: HashSet::new(),
            depth: 0,
        }
    }

    /// Parses the whole token stream.
    /// Consumes the parser so that every program starts with no known function names.
    pub fn parse_program(mut self) -> Result<Program> {
        let mut body = Vec::new();
        while !self.check(&Token::Eof) {
            body.push(self.parse_stmt()?);
        }
        Ok(Program { body })
    }

    /// Returns `true` if `name` was registered as a function earlier in this parse.
    pub fn is_known_function(&self, name: &str) -> bool {
        self.function_names.contains(name)
    }
}

/// Parse utilities
impl Parser {
    /// Returns the token `k` positions ahead of the current one without consuming anything.
    /// Looking past the end yields [`Token::Eof`].
    pub fn peek(&self, k: usize) -> &Token {
        &self.peek_spanned(k).token
    }

    /// Like [`Self::peek`] but also returns the position of the token.
    pub fn peek_spanned(&self, k: usize) -> &Spanned {
        let index = (self.position + k).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Consumes the current token and returns it.
    fn advance(&mut self) -> Spanned {
        let spanned = self.peek_spanned(0).clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        spanned
    }

    /// Predicate that tests whether the current token has the same discriminant as `tok`.
    fn check(&self, tok: &Token) -> bool {
        mem::discriminant(self.current()) == mem::discriminant(tok)
    }

    /// Predicate that tests whether the current token has the same discriminant and eats the token if yes as a side effect.
    fn eat(&mut self, tok: Token) -> bool {
        if self.check(&tok) {
            self.advance(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Token) -> Result<Spanned> {
        self.expect_one_of(&[tok])
    }

    /// Consumes the current token if it is one of `toks`, fails otherwise.
    fn expect_one_of(&mut self, toks: &[Token]) -> Result<Spanned> {
        if toks.iter().any(|tok| self.check(tok)) {
            Ok(self.advance())
        } else {
            let expected: Vec<String> = toks.iter().map(Token::kind_name).collect();
            Err(self.unexpected(&expected[..]))
        }
    }

    /// Consumes an identifier and returns its name.
    fn expect_ident(&mut self) -> Result<String> {
        if let Token::Identifier(ident) = self.current() {
            let ident = ident.clone();
            self.advance();
            Ok(ident)
        } else {
            Err(self.unexpected(&["identifier"]))
        }
    }

    /// Runs `parse` one nesting level deeper.
    /// Past [`MAX_DEPTH`] this fails on the current token with `expected` instead of recursing.
    fn nested<T>(
        &mut self,
        expected: &str,
        parse: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(self.unexpected(&[expected]));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Creates an unexpected token error for the current token.
    fn unexpected<S: AsRef<str>>(&self, expected: &[S]) -> ParseError {
        let current = self.peek_spanned(0);
        ParseError {
            expected: expected.iter().map(|s| s.as_ref().to_string()).collect(),
            found: current.token.clone(),
            location: current.location,
        }
    }
}
