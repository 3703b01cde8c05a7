use super::*;
use crate::ast::{BinaryOp, UnaryOp};

impl Parser {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`, one nesting level deeper.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.nested("expression", |parser| parser.parse_expr_bp(0)) // 0 to accept any expression
    }

    /// Parses an expression with the specified `min_bp`.
    /// Only the left associative binary operators (`or` down to `*` and `/`) go through here.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        let mut lhs = self.parse_unary_expr()?;

        loop {
            let (op, (l_bp, r_bp)) = match (self.current().to_binary_op(), self.current().binop_bp()) {
                (Some(op), Some(bp)) => (op, bp),
                _ => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current() is a valid binop
            self.advance();

            let rhs = self.parse_expr_bp(r_bp)?;

            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            }
        }

        Ok(lhs)
    }

    /// Parses prefix `-` (negation) and prefix `!` (factorial).
    /// Both bind looser than `^`: `-2^2` is `-(2^2)`.
    fn parse_unary_expr(&mut self) -> Result<Expr> {
        let op = match self.current() {
            Token::Minus => UnaryOp::Neg,
            Token::Bang => UnaryOp::Factorial,
            _ => return self.parse_pow_expr(),
        };
        self.advance();

        Ok(Expr::Unary {
            op,
            arg: Box::new(self.nested("expression", Self::parse_unary_expr)?),
        })
    }

    /// Parses a right associative chain of `^`.
    /// Operands are atoms, so a prefix operator on the right of `^` has to be parenthesized.
    fn parse_pow_expr(&mut self) -> Result<Expr> {
        let lhs = self.parse_primary_expr()?;

        if self.eat(Token::Caret) {
            let rhs = self.nested("expression", Self::parse_pow_expr)?;
            Ok(Expr::Binary {
                lhs: Box::new(lhs),
                op: BinaryOp::Pow,
                rhs: Box::new(rhs),
            })
        } else {
            Ok(lhs)
        }
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Expr> {
        match self.current() {
            Token::OpenParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(Token::CloseParen)?;
                Ok(expr)
            }
            Token::Number(_) | Token::True | Token::False | Token::Str(_) => {
                self.parse_literal_expr()
            }
            Token::Identifier(_) => self.parse_identifier_or_call_expr(),
            _ => Err(self.unexpected(&["expression"])),
        }
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A number literal directly followed by `!` becomes an [`Expr::LiteralFactorial`].
    fn parse_literal_expr(&mut self) -> Result<Expr> {
        let val = match self.current() {
            Token::Number(val) => Expr::NumberLit(*val),
            Token::True => Expr::BoolLit(true),
            Token::False => Expr::BoolLit(false),
            Token::Str(val) => Expr::StringLit(val.clone()),
            _ => return Err(self.unexpected(&["expression"])),
        };
        self.advance(); // eat parsed token

        if let Expr::NumberLit(num) = val {
            if self.eat(Token::Bang) {
                return Ok(Expr::LiteralFactorial(num));
            }
        }
        Ok(val)
    }

    /* Expressions.Identifier */
    /// Parses an identifier or a call expression.
    /// It is a call only if the identifier is immediately followed by `(`.
    fn parse_identifier_or_call_expr(&mut self) -> Result<Expr> {
        let is_call = matches!(self.peek(1), Token::OpenParen);
        let ident = self.expect_ident()?;

        if is_call {
            let args = self.parse_call_args()?;
            Ok(Expr::FnCall { ident, args })
        } else {
            Ok(Expr::Identifier(ident))
        }
    }

    /// Parses a parenthesized, comma separated list of expressions.
    /// Shared by call expressions and `print` statements.
    pub(super) fn parse_call_args(&mut self) -> Result<Vec<Expr>> {
        self.expect(Token::OpenParen)?;

        let mut args = Vec::new();
        if !self.eat(Token::CloseParen) {
            loop {
                args.push(self.parse_expr()?);

                if self.eat(Token::CloseParen) {
                    break;
                } else if !self.eat(Token::Comma) {
                    return Err(self.unexpected(&["`,`", "`)`"]));
                }
            }
        }

        Ok(args)
    }
}
