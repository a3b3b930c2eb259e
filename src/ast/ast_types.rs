//! This module defines the AST types and simple methods on those types.

use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/* AST Definitions */

/// The root of a program's AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Main {
    pub program: Program,
}

/// The top level statements of a program, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program(pub Vec<StatementFull>);

/// The statements of an `if` branch or a function body, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block(pub Vec<StatementFull>);

impl Program {
    /// Builds a program from statements collected last-first, as the right recursive grammar produces them.
    pub fn from_reversed(mut statements: Vec<StatementFull>) -> Program {
        statements.reverse();
        Program(statements)
    }
}

impl Block {
    /// See [`Program::from_reversed`].
    pub fn from_reversed(mut statements: Vec<StatementFull>) -> Block {
        statements.reverse();
        Block(statements)
    }
}

/// Anything that may appear in a statement sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementFull {
    /// A [`Statement`] followed by `;`.
    Terminated(Statement),
    If {
        condition: Expr,
        body: Block,
        else_body: Option<Block>,
    },
    /// The declaration itself lives in the program state (it registers while parsing). The AST only records where
    /// it appeared.
    FunctionDeclaration {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Expr),
    /// `let target = value`. The grammar only produces variable targets, but the check happens at evaluation.
    Assignment {
        target: Box<Expr>,
        value: Expr,
    },
    Print(Option<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Parenthesized(Box<Expr>),
    Not(Box<Expr>),
    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Absolute(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Power(Box<Expr>, Box<Expr>),
    /// `input()` or `input(prompt)`.
    Input(Option<Box<Expr>>),
    Variable(String),
    /// A zero argument call to a user function.
    Call(String),
    Constant(Constant),
}

impl Expr {
    /// Moves the boxed operands into `into`, leaving empty placeholders behind.
    fn detach_operands(&mut self, into: &mut Vec<Expr>) {
        let mut detach = |operand: &mut Box<Expr>| {
            into.push(std::mem::replace(operand.as_mut(), Expr::Variable(String::new())));
        };

        match self {
            Expr::Parenthesized(operand)
            | Expr::Not(operand)
            | Expr::Absolute(operand)
            | Expr::Sin(operand)
            | Expr::Cos(operand)
            | Expr::Tan(operand)
            | Expr::Input(Some(operand)) => detach(operand),
            Expr::Binary { left, right, .. } | Expr::Power(left, right) => {
                detach(left);
                detach(right);
            }
            Expr::Input(None) | Expr::Variable(_) | Expr::Call(_) | Expr::Constant(_) => (),
        }
    }
}

/// Long operator chains nest one box per operator, so operands are released from a worklist instead of
/// recursively.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = vec![];
        self.detach_operands(&mut pending);

        while let Some(mut expr) = pending.pop() {
            expr.detach_operands(&mut pending);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Sum,
    Sub,
    Mul,
    Div,
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOperator> {
        use BinaryOperator as B;
        use TokenKind as K;

        Some(match kind {
            K::Sum => B::Sum,
            K::Sub => B::Sub,
            K::Mul => B::Mul,
            K::Div => B::Div,
            K::DoubleEquals => B::Equal,
            K::NotEquals => B::NotEqual,
            K::Greater => B::Greater,
            K::Less => B::Less,
            K::GreaterEquals => B::GreaterEqual,
            K::LessEquals => B::LessEqual,
            K::And => B::And,
            K::Or => B::Or,
            _ => None?,
        })
    }

    pub fn token_kind(self) -> TokenKind {
        use BinaryOperator as B;
        use TokenKind as K;

        match self {
            B::Sum => K::Sum,
            B::Sub => K::Sub,
            B::Mul => K::Mul,
            B::Div => K::Div,
            B::Equal => K::DoubleEquals,
            B::NotEqual => K::NotEquals,
            B::Greater => K::Greater,
            B::Less => K::Less,
            B::GreaterEqual => K::GreaterEquals,
            B::LessEqual => K::LessEquals,
            B::And => K::And,
            B::Or => K::Or,
        }
    }

    /// The label of the operator token, e.g. `+` or `AND`.
    pub fn symbol(self) -> &'static str {
        self.token_kind().label()
    }
}

/// A literal, already converted to its native value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Pi(f64),
    E(f64),
}

impl Constant {
    /// Converts a literal token into its value. Called when the `const` production reduces.
    pub fn from_token(token: &Token) -> Result<Constant, ParseError> {
        let lexeme = token.lexeme.as_str();
        let malformed = || ParseError::MalformedLiteral { lexeme: lexeme.to_string(), kind: token.kind };

        match token.kind {
            TokenKind::Integer => Ok(Constant::Integer(lexeme.parse().map_err(|_| malformed())?)),
            TokenKind::Float => Ok(Constant::Float(lexeme.parse().map_err(|_| malformed())?)),
            TokenKind::Boolean => match lexeme {
                "true" | "True" | "TRUE" => Ok(Constant::Boolean(true)),
                "false" | "False" | "FALSE" => Ok(Constant::Boolean(false)),
                _ => Err(ParseError::BooleanLiteral { lexeme: lexeme.to_string() }),
            },
            TokenKind::String => Ok(Constant::String(lexeme.trim_matches(['"', '\'']).to_string())),
            TokenKind::Pi => Ok(Constant::Pi(signed(lexeme, std::f64::consts::PI))),
            TokenKind::E => Ok(Constant::E(signed(lexeme, std::f64::consts::E))),
            other => Err(format!("Token kind {other} is not a literal").into()),
        }
    }

    /// The label of the literal's token kind, used in trace trees.
    pub fn label(&self) -> &'static str {
        match self {
            Constant::Integer(_) => TokenKind::Integer.label(),
            Constant::Float(_) => TokenKind::Float.label(),
            Constant::Boolean(_) => TokenKind::Boolean.label(),
            Constant::String(_) => TokenKind::String.label(),
            Constant::Pi(_) => TokenKind::Pi.label(),
            Constant::E(_) => TokenKind::E.label(),
        }
    }
}

fn signed(lexeme: &str, value: f64) -> f64 {
    if lexeme.starts_with('-') {
        -value
    } else {
        value
    }
}

/// A user function. Stored in the program state rather than the AST, since calls look it up by name.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub body: Block,
}
