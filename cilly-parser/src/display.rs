//! Renders the AST as nested tagged lists, e.g. `['+', 1, ['*', 2, 3]]`.
//!
//! Leaves print the way Python's `repr` prints them: names and string literals are quoted
//! (single quotes unless the text contains a `'` and no `"`), whole floats keep their `.0`, and
//! missing optional children print as `None`.

use crate::ast::{Expr, Program, Stmt, VarDeclarator};
use std::fmt;

/// Writes `items` as `[a, b, c]`.
fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

/// A name or string literal.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.0.contains('\'') && !self.0.contains('"') {
            '"'
        } else {
            '\''
        };
        write!(f, "{}", quote)?;
        for c in self.0.chars() {
            match c {
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                '\t' => write!(f, "\\t")?,
                c if c == quote => write!(f, "\\{}", c)?,
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "{}", quote)
    }
}

/// An optional child, `None` when absent.
struct Optional<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for Optional<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(val) => write!(f, "{}", val),
            None => write!(f, "None"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "['program', ")?;
        write_list(f, &self.body)?;
        write!(f, "]")
    }
}

impl fmt::Display for VarDeclarator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            Quoted(&self.ident),
            Optional(self.initializer.as_ref())
        )
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::FnDeclaration {
                ident,
                params,
                body,
            } => {
                write!(f, "['function_definition', {}, ", Quoted(ident))?;
                write_list(f, params.iter().map(|param| Quoted(param)))?;
                write!(f, ", ['block', ")?;
                write_list(f, body)?;
                write!(f, "]]")
            }
            Stmt::Block(body) => {
                write!(f, "['block', ")?;
                write_list(f, body)?;
                write!(f, "]")
            }
            Stmt::VarDeclaration(declarators) => {
                write!(f, "['var', ")?;
                write_list(f, declarators)?;
                write!(f, "]")
            }
            Stmt::Assign { ident, value } => {
                write!(f, "['assign_statement', {}, {}]", Quoted(ident), value)
            }
            Stmt::FnUse(expr) => write!(f, "['func_use', {}]", expr),
            Stmt::IfStmt {
                condition,
                then_branch,
                else_branch,
            } => write!(
                f,
                "['if', {}, {}, 'else', {}]",
                condition,
                then_branch,
                Optional(else_branch.as_deref())
            ),
            Stmt::WhileStmt { condition, body } => {
                write!(f, "['while', {}, {}]", condition, body)
            }
            Stmt::PrintStmt(args) => {
                write!(f, "['print', ")?;
                write_list(f, args)?;
                write!(f, "]")
            }
            Stmt::ReturnStmt(expr) => write!(f, "['return', {}]", Optional(expr.as_ref())),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::NumberLit(val) => write!(f, "{}", val),
            Expr::BoolLit(val) => write!(f, "['{}']", val),
            Expr::StringLit(val) => write!(f, "{}", Quoted(val)),
            Expr::Identifier(ident) => write!(f, "{}", Quoted(ident)),
            Expr::FnCall { ident, args } => {
                write!(f, "['function_call', {}, ", Quoted(ident))?;
                write_list(f, args)?;
                write!(f, "]")
            }
            Expr::Binary { lhs, op, rhs } => write!(f, "['{}', {}, {}]", op.tag(), lhs, rhs),
            Expr::Unary { op, arg } => write!(f, "['{}', {}]", op.tag(), arg),
            Expr::LiteralFactorial(val) => write!(f, "['!', {}]", val),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_source;

    fn display(source: &str) -> String {
        parse_source(source).unwrap().to_string()
    }

    #[test]
    fn test_expressions() {
        assert_eq!(
            display("x = 1^2^3;"),
            "['program', [['assign_statement', 'x', ['^', 1, ['^', 2, 3]]]]]"
        );
        assert_eq!(
            display("x = 2*10! + !3 - -1.5;"),
            "['program', [['assign_statement', 'x', ['-', ['+', ['*', 2, ['!', 10]], ['factorial', 3]], ['-', 1.5]]]]]"
        );
        assert_eq!(
            display(r#"x = a and true or f("it's");"#),
            r#"['program', [['assign_statement', 'x', ['or', ['and', 'a', ['true']], ['function_call', 'f', ["it's"]]]]]]"#
        );
        assert_eq!(
            display(r#"print("a\b", 100000000000000000000.0, 0.00001);"#),
            r#"['program', [['print', ['a\\b', 1e+20, 1e-05]]]]"#
        );
    }

    #[test]
    fn test_statements() {
        assert_eq!(
            display("fun f(a, b) { return; } f(1, 2);"),
            "['program', [['function_definition', 'f', ['a', 'b'], ['block', [['return', None]]]], ['func_use', ['function_call', 'f', [1, 2]]]]]"
        );
        assert_eq!(
            display("var a = 1 b; print(a, b);"),
            "['program', [['var', [['a', 1], ['b', None]]], ['print', ['a', 'b']]]]"
        );
        assert_eq!(
            display("if a x = 1; else { x = 2.0; }"),
            "['program', [['if', 'a', ['assign_statement', 'x', 1], 'else', ['block', [['assign_statement', 'x', 2.0]]]]]]"
        );
        assert_eq!(
            display("while false {}"),
            "['program', [['while', ['false'], ['block', []]]]]"
        );
        assert_eq!(
            display("if x != 0 return x;"),
            "['program', [['if', ['!=', 'x', 0], ['return', 'x'], 'else', None]]]"
        );
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(display(""), "['program', []]");
    }
}
