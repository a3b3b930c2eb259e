//! Defines the types of errors that may occur at any stage of a run.
//! Also defines simple conversions between strings and errors, and the stage errors and the overall [`RunError`]

use crate::token::{Span, Token, TokenKind};

use std::collections::BTreeSet;

use thiserror::Error;

/* Stage Level Errors */

// One error type per stage. Every error aborts the pass it happens in.

#[derive(Debug, Error)]
pub enum TokenError {
    /// A problem described by a string.
    #[error("{0}")]
    Problem(String),
    /// A problem (described as the string) localized at a particular span.
    #[error("{0} (at {1})")]
    ProblemAtSpan(String, Span),
}

#[derive(Debug, Error)]
pub enum ParseError {
    /// No production accepts this token here.
    #[error("unexpected token {token}")]
    UnexpectedToken { token: Token, expected: BTreeSet<TokenKind> },
    #[error("ran out of input")]
    UnexpectedEndOfInput { expected: BTreeSet<TokenKind> },
    #[error("'{lexeme}' is not a boolean literal")]
    BooleanLiteral { lexeme: String },
    #[error("'{lexeme}' is not a valid {kind} literal")]
    MalformedLiteral { lexeme: String, kind: TokenKind },
    #[error("function '{name}' is already declared")]
    FunctionRedeclared { name: String },
    /// A reduce action received values of the wrong shape. Always a bug in the grammar, never in the program.
    #[error("grammar action mismatch: {0}")]
    Logic(String),
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unresolved identifier '{name}'")]
    UnresolvedIdentifier { name: String },
    #[error("'{name}' is already bound and cannot be rebound")]
    ImmutableRebind { name: String },
    #[error("only a bare identifier can be assigned to")]
    InvalidAssignmentTarget,
    #[error("{function}() expects a number, found '{value}'")]
    NotNumeric { function: &'static str, value: String },
    #[error("{0}")]
    Logical(String),
    #[error("call to undeclared function '{name}'")]
    UndeclaredFunction { name: String },
    #[error("cannot apply '{operator}' to '{left}' and '{right}'")]
    OperandTypes { operator: &'static str, left: String, right: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in '{operator}'")]
    IntegerOverflow { operator: &'static str },
    #[error("function calls nested deeper than {depth}")]
    RecursionLimit { depth: usize },
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/* String Conversions. */

impl From<String> for TokenError {
    fn from(value: String) -> Self {
        TokenError::Problem(value)
    }
}

impl From<&str> for TokenError {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<String> for ParseError {
    fn from(value: String) -> Self {
        ParseError::Logic(value)
    }
}

impl From<&str> for ParseError {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

/* Project Level Error */

#[derive(Debug, Error)]
pub enum RunError {
    /// An error associated with the run itself, not any one stage.
    #[error("{0}")]
    Direct(String),
    #[error(transparent)]
    TokenError(#[from] TokenError),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    RuntimeError(#[from] RuntimeError),
}

impl From<&str> for RunError {
    fn from(value: &str) -> Self {
        RunError::Direct(value.to_string())
    }
}

impl From<String> for RunError {
    fn from(value: String) -> Self {
        RunError::Direct(value)
    }
}
