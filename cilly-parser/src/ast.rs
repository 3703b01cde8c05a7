use crate::lexer::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Exponentiation (`^`). Right associative.
    Pow,
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn tag(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation (`-x`).
    Neg,
    /// Prefix factorial (`!x`).
    Factorial,
}

impl UnaryOp {
    pub fn tag(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Factorial => "factorial",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(Number),
    BoolLit(bool),
    StringLit(String),
    /// An identifier (e.g. `foo`).
    Identifier(String),
    /// A function call (e.g. `foo(1, bar)`).
    FnCall { ident: String, args: Vec<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// A prefix unary expression (e.g. `-1` or `!n`).
    Unary { op: UnaryOp, arg: Box<Expr> },
    /// A number literal directly followed by `!` (e.g. `10!`).
    /// Kept apart from [`UnaryOp::Factorial`] because only literals accept the postfix form.
    LiteralFactorial(Number),
}

/// A single `name` or `name = initializer` entry of a `var` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub ident: String,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `fun name(params) { body }`
    FnDeclaration {
        ident: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// `{ body }`
    Block(Vec<Stmt>),
    /// `var a = 1 b;`
    VarDeclaration(Vec<VarDeclarator>),
    /// `name = value;`
    Assign { ident: String, value: Expr },
    /// An expression evaluated for its effect (e.g. `foo(1);`).
    FnUse(Expr),
    IfStmt {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    WhileStmt { condition: Expr, body: Box<Stmt> },
    PrintStmt(Vec<Expr>),
    ReturnStmt(Option<Expr>),
}

/// The root of the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}
