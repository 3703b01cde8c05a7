use super::*;
use crate::ast::VarDeclarator;
use tracing::{debug, trace};

impl Parser {
    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.current() {
            Token::Return => self.parse_return_stmt(),
            Token::Fun => self.parse_fn_declaration(),
            Token::If => self.parse_if_stmt(),
            Token::Print => self.parse_print_stmt(),
            Token::Var => self.parse_var_declaration(),
            Token::While => self.parse_while_stmt(),
            Token::Identifier(ident) => {
                // Both statements start with an identifier. Whether the name was seen as a function
                // so far is the only thing telling them apart.
                let is_function = self.function_names.contains(ident);
                trace!(
                    ident = %ident,
                    is_function,
                    known_functions = self.function_names.len(),
                    "identifier led statement"
                );
                if is_function {
                    self.parse_fn_use_stmt()
                } else {
                    self.parse_assign_stmt()
                }
            }
            _ => Err(self.unexpected(&["statement"])),
        }
    }

    /// Parses a block if the current token is `{`, a single statement otherwise.
    fn parse_stmt_or_block(&mut self) -> Result<Stmt> {
        if self.check(&Token::OpenBrace) {
            self.parse_block_stmt()
        } else {
            self.nested("statement", Self::parse_stmt)
        }
    }

    pub fn parse_block_stmt(&mut self) -> Result<Stmt> {
        Ok(Stmt::Block(self.parse_block_body()?))
    }

    /// Parses `{ statement* }` and returns the statements.
    fn parse_block_body(&mut self) -> Result<Vec<Stmt>> {
        self.expect(Token::OpenBrace)?;

        let mut body = Vec::new();
        while !self.eat(Token::CloseBrace) {
            if self.check(&Token::Eof) {
                return Err(self.unexpected(&["statement", "`}`"]));
            }
            body.push(self.nested("statement", Self::parse_stmt)?);
        }

        Ok(body)
    }

    fn register_function(&mut self, ident: &str) {
        if self.function_names.insert(ident.to_string()) {
            debug!(ident, "registered function name");
        }
    }

    fn parse_fn_declaration(&mut self) -> Result<Stmt> {
        self.expect(Token::Fun)?;
        let ident = self.expect_ident()?;
        // Registered before the body is parsed to allow for recursion.
        self.register_function(&ident);

        self.expect(Token::OpenParen)?;
        let mut params = Vec::new();
        if !self.eat(Token::CloseParen) {
            loop {
                params.push(self.expect_ident()?);

                if self.eat(Token::CloseParen) {
                    break;
                } else if !self.eat(Token::Comma) {
                    return Err(self.unexpected(&["`,`", "`)`"]));
                }
            }
        }

        let body = self.parse_block_body()?;

        Ok(Stmt::FnDeclaration {
            ident,
            params,
            body,
        })
    }

    /// Parses `var a = 1 b c = f();`.
    /// Entries whose initializer is a call expression are registered as functions: the call may
    /// return a closure. This is a guess made from syntax alone and it also catches calls returning
    /// plain values.
    fn parse_var_declaration(&mut self) -> Result<Stmt> {
        self.expect(Token::Var)?;

        let mut declarators = Vec::new();
        loop {
            let ident = self.expect_ident()?;
            let initializer = if self.eat(Token::Equals) {
                Some(self.parse_expr()?)
            } else {
                None
            };

            if let Some(Expr::FnCall { .. }) = initializer {
                self.register_function(&ident);
            }
            declarators.push(VarDeclarator { ident, initializer });

            match self.current() {
                Token::Semi => {
                    self.advance();
                    break;
                }
                Token::Identifier(_) => {}
                _ => return Err(self.unexpected(&["identifier", "`;`"])),
            }
        }

        Ok(Stmt::VarDeclaration(declarators))
    }

    fn parse_assign_stmt(&mut self) -> Result<Stmt> {
        let ident = self.expect_ident()?;
        self.expect(Token::Equals)?;
        let value = self.parse_expr()?;
        self.expect(Token::Semi)?;
        Ok(Stmt::Assign { ident, value })
    }

    fn parse_fn_use_stmt(&mut self) -> Result<Stmt> {
        let expr = self.parse_expr()?;
        self.expect(Token::Semi)?;
        Ok(Stmt::FnUse(expr))
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt> {
        self.expect(Token::If)?;
        let condition = self.parse_expr()?;
        let then_branch = Box::new(self.parse_stmt_or_block()?);
        let else_branch = if self.eat(Token::Else) {
            Some(Box::new(self.parse_stmt_or_block()?))
        } else {
            None
        };

        Ok(Stmt::IfStmt {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt> {
        self.expect(Token::While)?;
        let condition = self.parse_expr()?;
        let body = Box::new(self.parse_stmt_or_block()?);
        Ok(Stmt::WhileStmt { condition, body })
    }

    fn parse_print_stmt(&mut self) -> Result<Stmt> {
        self.expect(Token::Print)?;
        let args = self.parse_call_args()?;
        self.expect(Token::Semi)?;
        Ok(Stmt::PrintStmt(args))
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt> {
        self.expect(Token::Return)?;
        let expr = if self.check(&Token::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::Semi)?;
        Ok(Stmt::ReturnStmt(expr))
    }
}
