//! Reduce actions for [`Mode::Semantic`](super::Mode::Semantic): productions build the AST.
//!
//! Statement sequences come out of the right recursive `program` and `block` productions last statement first.
//! They are collected in that order and reversed once, by the construct that consumes the whole sequence.

use super::productions::{Production, Rule};
use super::ReduceActions;

use crate::ast::{
    BinaryOperator, Block, Constant, Expr, FunctionDeclaration, Main, Program, Statement, StatementFull,
};
use crate::error::ParseError;
use crate::state::ProgramState;
use crate::token::Token;

#[derive(Debug)]
pub(crate) enum SemanticValue {
    Token(Token),
    Main(Main),
    /// A statement sequence in reverse source order.
    Statements(Vec<StatementFull>),
    StatementFull(StatementFull),
    Statement(Statement),
    Expr(Expr),
    Const(Constant),
}

impl SemanticValue {
    fn into_token(self) -> Result<Token, ParseError> {
        match self {
            SemanticValue::Token(token) => Ok(token),
            other => Err(mismatch("a token", &other)),
        }
    }

    fn into_statements(self) -> Result<Vec<StatementFull>, ParseError> {
        match self {
            SemanticValue::Statements(statements) => Ok(statements),
            other => Err(mismatch("a statement sequence", &other)),
        }
    }

    fn into_statement_full(self) -> Result<StatementFull, ParseError> {
        match self {
            SemanticValue::StatementFull(statement) => Ok(statement),
            other => Err(mismatch("a full statement", &other)),
        }
    }

    fn into_statement(self) -> Result<Statement, ParseError> {
        match self {
            SemanticValue::Statement(statement) => Ok(statement),
            other => Err(mismatch("a statement", &other)),
        }
    }

    fn into_expr(self) -> Result<Expr, ParseError> {
        match self {
            SemanticValue::Expr(expr) => Ok(expr),
            other => Err(mismatch("an expression", &other)),
        }
    }

    fn into_boxed_expr(self) -> Result<Box<Expr>, ParseError> {
        self.into_expr().map(Box::new)
    }

    fn into_const(self) -> Result<Constant, ParseError> {
        match self {
            SemanticValue::Const(constant) => Ok(constant),
            other => Err(mismatch("a constant", &other)),
        }
    }
}

fn mismatch(expected: &str, found: &SemanticValue) -> ParseError {
    ParseError::Logic(format!("Expected {expected}, found {found:?}"))
}

/// Moves exactly `N` values out of the reduction.
fn take<const N: usize>(values: Vec<SemanticValue>) -> Result<[SemanticValue; N], ParseError> {
    <[SemanticValue; N]>::try_from(values)
        .map_err(|values| ParseError::Logic(format!("Expected {N} values, found {}", values.len())))
}

pub(crate) struct SemanticActions;

impl ReduceActions for SemanticActions {
    type Value = SemanticValue;

    fn shift(&mut self, token: &Token) -> SemanticValue {
        SemanticValue::Token(token.clone())
    }

    fn reduce(
        &mut self,
        production: &Production,
        values: Vec<SemanticValue>,
        state: &mut ProgramState,
    ) -> Result<SemanticValue, ParseError> {
        use SemanticValue as V;

        Ok(match production.rule {
            Rule::Accept => Err("The start production is never reduced")?,
            Rule::MainProgram => {
                let [program] = take(values)?;
                V::Main(Main { program: Program::from_reversed(program.into_statements()?) })
            }
            Rule::ProgramSingle | Rule::BlockSingle => {
                let [statement] = take(values)?;
                V::Statements(vec![statement.into_statement_full()?])
            }
            Rule::ProgramMany | Rule::BlockMany => {
                let [statement, rest] = take(values)?;
                let mut statements = rest.into_statements()?;
                statements.push(statement.into_statement_full()?);
                V::Statements(statements)
            }
            Rule::StatementTerminated => {
                let [statement, _] = take(values)?;
                V::StatementFull(StatementFull::Terminated(statement.into_statement()?))
            }
            Rule::If => {
                let [_, _, condition, _, _, body, _] = take(values)?;
                V::StatementFull(StatementFull::If {
                    condition: condition.into_expr()?,
                    body: Block::from_reversed(body.into_statements()?),
                    else_body: None,
                })
            }
            Rule::IfElse => {
                let [_, _, condition, _, _, body, _, _, _, else_body, _] = take(values)?;
                V::StatementFull(StatementFull::If {
                    condition: condition.into_expr()?,
                    body: Block::from_reversed(body.into_statements()?),
                    else_body: Some(Block::from_reversed(else_body.into_statements()?)),
                })
            }
            Rule::FunctionDeclaration => {
                let [_, name, _, _, _, body, _] = take(values)?;
                let name = name.into_token()?.lexeme;

                state.declare_function(FunctionDeclaration {
                    name: name.clone(),
                    body: Block::from_reversed(body.into_statements()?),
                })?;

                V::StatementFull(StatementFull::FunctionDeclaration { name })
            }
            Rule::StatementExpression => {
                let [expr] = take(values)?;
                V::Statement(Statement::Expression(expr.into_expr()?))
            }
            Rule::StatementLet => {
                let [_, name, _, value] = take(values)?;
                V::Statement(Statement::Assignment {
                    target: Box::new(Expr::Variable(name.into_token()?.lexeme)),
                    value: value.into_expr()?,
                })
            }
            Rule::PrintEmpty => {
                let [_, _, _] = take(values)?;
                V::Statement(Statement::Print(None))
            }
            Rule::PrintValue => {
                let [_, _, expr, _] = take(values)?;
                V::Statement(Statement::Print(Some(expr.into_expr()?)))
            }
            Rule::ExprParenthesized => {
                let [_, expr, _] = take(values)?;
                V::Expr(Expr::Parenthesized(expr.into_boxed_expr()?))
            }
            Rule::ExprNot => {
                let [_, expr] = take(values)?;
                V::Expr(Expr::Not(expr.into_boxed_expr()?))
            }
            Rule::ExprBinary => {
                let [left, operator, right] = take(values)?;
                let operator = operator.into_token()?;
                let op = BinaryOperator::from_token_kind(operator.kind)
                    .ok_or_else(|| ParseError::Logic(format!("{operator} is not a binary operator")))?;

                V::Expr(Expr::Binary { op, left: left.into_boxed_expr()?, right: right.into_boxed_expr()? })
            }
            Rule::ExprInputEmpty => {
                let [_, _, _] = take(values)?;
                V::Expr(Expr::Input(None))
            }
            Rule::ExprInputPrompt => {
                let [_, _, prompt, _] = take(values)?;
                V::Expr(Expr::Input(Some(prompt.into_boxed_expr()?)))
            }
            Rule::ExprAbsolute | Rule::ExprSin | Rule::ExprCos | Rule::ExprTan => {
                let [_, _, expr, _] = take(values)?;
                let expr = expr.into_boxed_expr()?;

                V::Expr(match production.rule {
                    Rule::ExprAbsolute => Expr::Absolute(expr),
                    Rule::ExprSin => Expr::Sin(expr),
                    Rule::ExprCos => Expr::Cos(expr),
                    _ => Expr::Tan(expr),
                })
            }
            Rule::ExprPower => {
                let [_, _, base, _, exponent, _] = take(values)?;
                V::Expr(Expr::Power(base.into_boxed_expr()?, exponent.into_boxed_expr()?))
            }
            Rule::ExprVariable => {
                let [name] = take(values)?;
                V::Expr(Expr::Variable(name.into_token()?.lexeme))
            }
            Rule::ExprCall => {
                let [name, _, _] = take(values)?;
                V::Expr(Expr::Call(name.into_token()?.lexeme))
            }
            Rule::ExprConst => {
                let [constant] = take(values)?;
                V::Expr(Expr::Constant(constant.into_const()?))
            }
            Rule::Const => {
                let [literal] = take(values)?;
                V::Const(Constant::from_token(&literal.into_token()?)?)
            }
        })
    }
}
