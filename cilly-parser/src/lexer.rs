use crate::ast::BinaryOp;
use cilly_source::{Location, Source, Span};
use logos::Logos;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Payload of a number literal.
/// Literals containing a `.` are floats, everything else is an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(val) => write!(f, "{}", val),
            // `Debug` keeps the trailing `.0` on whole floats and switches to an exponent at the
            // same magnitudes as Python's `repr`, which writes the exponent as `e+20` / `e-05`.
            Number::Float(val) => {
                let repr = format!("{:?}", val);
                match repr.split_once('e') {
                    Some((mantissa, exponent)) => {
                        let (sign, digits) = match exponent.strip_prefix('-') {
                            Some(digits) => ('-', digits),
                            None => ('+', exponent),
                        };
                        write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
                    }
                    None => f.write_str(&repr),
                }
            }
        }
    }
}

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum Token {
    // literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse().map(Number::Int))]
    #[regex(r"[0-9]+\.[0-9]*", |lex| lex.slice().parse().map(Number::Float))]
    Number(Number),
    #[regex(r#""[^"]*""#, |lex| lex.slice()[1..lex.slice().len() - 1].to_string())]
    Str(String),
    #[token("true")]
    True,
    #[token("false")]
    False,

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // unary operators
    #[token("!")]
    Bang, // NOTE: prefix factorial or postfix literal factorial

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    // - assignment
    #[token("=")]
    Equals,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,
    // - logical
    #[token("and")]
    And,
    #[token("or")]
    Or,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,

    // keywords
    #[token("fun")]
    Fun,
    #[token("var")]
    Var,
    #[token("return")]
    Return,
    #[token("print")]
    Print,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,

    // misc
    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,

    /// Appended by [`tokenize`] after the last real token.
    Eof,
}

impl Token {
    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` is reserved for accepting any expression.
    /// `^` is not listed: it binds tighter than prefix operators and is parsed separately.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Logical */
            Token::Or => Some((1, 2)),
            Token::And => Some((3, 4)),
            /* Equality */
            Token::EqualsEquals | Token::NotEquals => Some((5, 6)),
            /* Ordering */
            Token::GreaterThan
            | Token::GreaterThanEquals
            | Token::LessThan
            | Token::LessThanEquals => Some((7, 8)),
            /* Additive */
            Token::Plus | Token::Minus => Some((9, 10)),
            /* Multiplicative */
            Token::Asterisk | Token::Slash => Some((11, 12)),
            _ => None,
        }
    }

    /// Returns the [`BinaryOp`] this token spells, if any.
    pub fn to_binary_op(&self) -> Option<BinaryOp> {
        let op = match self {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            Token::Asterisk => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            Token::Caret => BinaryOp::Pow,
            Token::EqualsEquals => BinaryOp::Eq,
            Token::NotEquals => BinaryOp::NotEq,
            Token::GreaterThan => BinaryOp::Gt,
            Token::GreaterThanEquals => BinaryOp::GtEq,
            Token::LessThan => BinaryOp::Lt,
            Token::LessThanEquals => BinaryOp::LtEq,
            Token::And => BinaryOp::And,
            Token::Or => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }

    /// The tag of the token, ignoring any payload.
    pub fn tag(&self) -> &'static str {
        match self {
            Token::Number(_) => "num",
            Token::Str(_) => "str",
            Token::True => "true",
            Token::False => "false",
            Token::Identifier(_) => "id",
            Token::Bang => "!",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Caret => "^",
            Token::Equals => "=",
            Token::EqualsEquals => "==",
            Token::NotEquals => "!=",
            Token::GreaterThan => ">",
            Token::GreaterThanEquals => ">=",
            Token::LessThan => "<",
            Token::LessThanEquals => "<=",
            Token::And => "and",
            Token::Or => "or",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Semi => ";",
            Token::Fun => "fun",
            Token::Var => "var",
            Token::Return => "return",
            Token::Print => "print",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::Error => "error",
            Token::Eof => "eof",
        }
    }

    /// Describes what kind of token this is, without its payload.
    /// Used for the expected side of parse errors.
    pub fn kind_name(&self) -> String {
        match self {
            Token::Number(_) => "number".to_string(),
            Token::Str(_) => "string".to_string(),
            Token::Identifier(_) => "identifier".to_string(),
            Token::Eof => "end of input".to_string(),
            _ => format!("`{}`", self.tag()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(val) => write!(f, "number `{}`", val),
            Token::Str(val) => write!(f, "string \"{}\"", val),
            Token::Identifier(ident) => write!(f, "identifier `{}`", ident),
            Token::Eof => write!(f, "end of input"),
            _ => write!(f, "`{}`", self.tag()),
        }
    }
}

/// A token together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("illegal character {character:?} at {location}")]
    IllegalCharacter { character: char, location: Location },
    #[error("unterminated string literal starting at {location}")]
    UnterminatedString { location: Location },
    #[error("invalid number literal `{literal}` at {location}")]
    InvalidNumber { literal: String, location: Location },
}

impl LexError {
    /// Classifies the text that failed to lex at `span`.
    fn at(source: &Source, span: Span) -> Self {
        let location = source.location(span.start);
        // Only the first char is looked at: the error span may end inside a multi-byte char.
        let rest = source.slice(&Span::new(span.start, source.content.len()));
        match rest.chars().next() {
            // a string literal with a closing quote always lexes
            Some('"') => LexError::UnterminatedString { location },
            Some(c) if c.is_ascii_digit() => LexError::InvalidNumber {
                literal: rest
                    .chars()
                    .take_while(|c| c.is_ascii_digit() || *c == '.')
                    .collect(),
                location,
            },
            Some(character) => LexError::IllegalCharacter {
                character,
                location,
            },
            None => LexError::UnterminatedString { location },
        }
    }
}

/// Splits `source` into tokens.
/// The returned [`Vec`] always ends with exactly one [`Token::Eof`], even for empty input.
pub fn tokenize(source: &Source) -> Result<Vec<Spanned>, LexError> {
    let mut lexer = Token::lexer(source.content);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let span = Span::from(lexer.span());
        if matches!(token, Token::Error) {
            return Err(LexError::at(source, span));
        }
        tokens.push(Spanned {
            token,
            span,
            location: source.location(span.start),
        });
    }

    let end = source.content.len();
    tokens.push(Spanned {
        token: Token::Eof,
        span: Span::new(end, end),
        location: source.location(end),
    });

    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let source = source.into();
        tokenize(&source)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    fn lex_error(source: &str) -> LexError {
        let source = source.into();
        tokenize(&source).unwrap_err()
    }

    #[test]
    fn test_empty() {
        assert_eq!(tokens(""), vec![Token::Eof]);
        assert_eq!(tokens(" \t\r\n"), vec![Token::Eof]);
    }

    #[test]
    fn test_number() {
        assert_eq!(tokens("123"), vec![Token::Number(Number::Int(123)), Token::Eof]);
        assert_eq!(
            tokens("1.5"),
            vec![Token::Number(Number::Float(1.5)), Token::Eof]
        );
        assert_eq!(
            tokens("2."),
            vec![Token::Number(Number::Float(2.0)), Token::Eof]
        );
    }

    #[test]
    fn test_string() {
        assert_eq!(tokens(r#""ab""#), vec![Token::Str("ab".to_string()), Token::Eof]);
        // no escape processing
        assert_eq!(
            tokens(r#""a\n b""#),
            vec![Token::Str(r"a\n b".to_string()), Token::Eof]
        );
        assert_eq!(tokens(r#""""#), vec![Token::Str(String::new()), Token::Eof]);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            tokens("fun var return print if else while true false and or"),
            vec![
                Token::Fun,
                Token::Var,
                Token::Return,
                Token::Print,
                Token::If,
                Token::Else,
                Token::While,
                Token::True,
                Token::False,
                Token::And,
                Token::Or,
                Token::Eof
            ]
        );
        assert_eq!(
            tokens("_foo funny var2 returned"),
            vec![
                Token::Identifier("_foo".to_string()),
                Token::Identifier("funny".to_string()),
                Token::Identifier("var2".to_string()),
                Token::Identifier("returned".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_greedy_operators() {
        assert_eq!(
            tokens("= == > >= < <= ! != ^"),
            vec![
                Token::Equals,
                Token::EqualsEquals,
                Token::GreaterThan,
                Token::GreaterThanEquals,
                Token::LessThan,
                Token::LessThanEquals,
                Token::Bang,
                Token::NotEquals,
                Token::Caret,
                Token::Eof
            ]
        );
        assert_eq!(
            tokens("a>=b"),
            vec![
                Token::Identifier("a".to_string()),
                Token::GreaterThanEquals,
                Token::Identifier("b".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens(":,+-*/;(){}[]"),
            vec![
                Token::Colon,
                Token::Comma,
                Token::Plus,
                Token::Minus,
                Token::Asterisk,
                Token::Slash,
                Token::Semi,
                Token::OpenParen,
                Token::CloseParen,
                Token::OpenBrace,
                Token::CloseBrace,
                Token::OpenBracket,
                Token::CloseBracket,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_spans() {
        let source = "var x\n  = 1;".into();
        let tokens = tokenize(&source).unwrap();
        assert_eq!(tokens[1].span, Span::new(4, 5));
        assert_eq!(tokens[2].location, Location { line: 2, column: 3 });
        assert_eq!(tokens.last().unwrap().span, Span::new(12, 12));
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Int(42).to_string(), "42");
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Number::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Number::Float(1e20).to_string(), "1e+20");
        assert_eq!(Number::Float(1.5e16).to_string(), "1.5e+16");
        assert_eq!(Number::Float(0.00001).to_string(), "1e-05");
        assert_eq!(Number::Float(2.5e-123).to_string(), "2.5e-123");
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            lex_error(r#"print("ab"#),
            LexError::UnterminatedString {
                location: Location { line: 1, column: 7 }
            }
        );
    }

    #[test]
    fn test_illegal_character() {
        assert_eq!(
            lex_error("var x = 1;\nx @ 2;"),
            LexError::IllegalCharacter {
                character: '@',
                location: Location { line: 2, column: 3 }
            }
        );
        assert_eq!(
            lex_error("é"),
            LexError::IllegalCharacter {
                character: 'é',
                location: Location { line: 1, column: 1 }
            }
        );
    }

    #[test]
    fn test_integer_overflow() {
        assert_eq!(
            lex_error("99999999999999999999"),
            LexError::InvalidNumber {
                literal: "99999999999999999999".to_string(),
                location: Location { line: 1, column: 1 }
            }
        );
    }
}
