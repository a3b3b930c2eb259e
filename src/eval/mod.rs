//! The tree walking evaluator.
//!
//! Evaluation computes a program's effects and, at the same time, records the derivation that actually ran into
//! a trace [`Node`]. Each `evaluate` call receives the node standing for its own grammar symbol and appends that
//! symbol's children: placeholders for keywords and punctuation, and slots that sub-evaluations fill in. Slots
//! are appended before they are filled, so a failed run still leaves the trace of everything up to the failure.
//! Branches that do not run leave nothing behind.

mod builtins;
mod operators;
mod value;


pub use builtins::looks_numeric;
pub use value::Value;

use crate::ast::{Block, Constant, Expr, Main, Program, Statement, StatementFull};
use crate::config::RunConfig;
use crate::error::RuntimeError;
use crate::state::ProgramState;
use crate::token::TokenKind;
use crate::trace::Node;

use std::io::{BufRead, Write};

use tracing::trace;

/// Everything evaluation reads from and writes to besides the AST.
pub struct Context<'a> {
    pub state: &'a mut ProgramState,
    pub config: &'a RunConfig,
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
    /// Number of user function calls currently running.
    depth: usize,
}

impl<'a> Context<'a> {
    pub fn new(
        state: &'a mut ProgramState,
        config: &'a RunConfig,
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
    ) -> Context<'a> {
        Context { state, config, input, output, depth: 0 }
    }
}

/// Implemented by every AST node that can run.
pub trait Evaluate {
    /// Runs the node, appending what ran to `trace`.
    fn evaluate(&self, trace: &mut Node, ctx: &mut Context<'_>) -> Result<Value, RuntimeError>;
}

/// Appends one empty child per label and returns the index of the first one.
fn push_labels(trace: &mut Node, labels: &[&str]) -> usize {
    let first = trace.children.len();

    for label in labels {
        trace.push(Node::new(*label));
    }

    first
}

/// Runs statements in order, shaping the trace like the right recursive grammar: every statement but the last
/// gets a `statement_full` slot followed by a `continuation` slot that holds the rest.
fn evaluate_sequence(
    statements: &[StatementFull],
    continuation: &str,
    trace: &mut Node,
    ctx: &mut Context<'_>,
) -> Result<Value, RuntimeError> {
    let mut node = trace;
    let mut result = Value::Unit;

    for (index, statement) in statements.iter().enumerate() {
        let last = index + 1 == statements.len();

        let slot = if last {
            push_labels(node, &["statement_full"])
        } else {
            push_labels(node, &["statement_full", continuation])
        };

        // Release the previous result first. A `let` snapshot kept alive here would make the next binding copy the
        // whole variable table.
        drop(std::mem::take(&mut result));
        result = statement.evaluate(&mut node.children[slot], ctx)?;

        if !last {
            node = node.children.last_mut().expect("Continuation was pushed");
        }
    }

    Ok(result)
}

impl Evaluate for Main {
    fn evaluate(&self, trace: &mut Node, ctx: &mut Context<'_>) -> Result<Value, RuntimeError> {
        self.program.evaluate(trace.slot("program"), ctx)
    }
}

impl Evaluate for Program {
    fn evaluate(&self, trace: &mut Node, ctx: &mut Context<'_>) -> Result<Value, RuntimeError> {
        evaluate_sequence(&self.0, "program", trace, ctx)
    }
}

impl Evaluate for Block {
    fn evaluate(&self, trace: &mut Node, ctx: &mut Context<'_>) -> Result<Value, RuntimeError> {
        evaluate_sequence(&self.0, "block", trace, ctx)
    }
}

impl Evaluate for StatementFull {
    fn evaluate(&self, trace: &mut Node, ctx: &mut Context<'_>) -> Result<Value, RuntimeError> {
        match self {
            StatementFull::Terminated(statement) => {
                let slot = push_labels(trace, &["statement", ";"]);
                statement.evaluate(&mut trace.children[slot], ctx)
            }
            StatementFull::If { condition, body, else_body } => {
                let slot = push_labels(trace, &["IF", "(", "expression", ")"]);

                let condition = match condition.evaluate(&mut trace.children[slot + 2], ctx)? {
                    Value::Boolean(condition) => condition,
                    other => {
                        return Err(RuntimeError::Logical(format!(
                            "An if condition must be a boolean, found {} '{other}'",
                            other.type_name()
                        )))
                    }
                };

                if condition {
                    let slot = push_labels(trace, &["{", "block", "}"]);
                    body.evaluate(&mut trace.children[slot + 1], ctx)
                } else if let Some(else_body) = else_body {
                    let slot = push_labels(trace, &["ELSE", "{", "block", "}"]);
                    else_body.evaluate(&mut trace.children[slot + 2], ctx)
                } else {
                    Ok(Value::Unit)
                }
            }
            StatementFull::FunctionDeclaration { name } => {
                // Registered while parsing. Only the shape is recorded here.
                trace.push(Node::new("FUNCTION"));
                trace.push(Node::leaf("IDENTIFIER", name.clone()));
                push_labels(trace, &["(", ")", "{", "block", "}"]);

                Ok(Value::Unit)
            }
        }
    }
}

impl Evaluate for Statement {
    fn evaluate(&self, trace: &mut Node, ctx: &mut Context<'_>) -> Result<Value, RuntimeError> {
        match self {
            Statement::Expression(expr) => expr.evaluate(trace.slot("expression"), ctx),
            Statement::Assignment { target, value } => {
                let Expr::Variable(name) = target.as_ref() else {
                    return Err(RuntimeError::InvalidAssignmentTarget);
                };

                if ctx.state.variable(name).is_some() {
                    return Err(RuntimeError::ImmutableRebind { name: name.clone() });
                }

                trace.push(Node::new("LET"));
                trace.push(Node::leaf("IDENTIFIER", name.clone()));
                let slot = push_labels(trace, &["=", "expression"]);

                let value = value.evaluate(&mut trace.children[slot + 1], ctx)?;
                ctx.state.bind(name, value)?;

                Ok(Value::Bindings(ctx.state.snapshot()))
            }
            Statement::Print(None) => {
                push_labels(trace, &["PRINT", "(", ")"]);
                writeln!(ctx.output)?;

                Ok(Value::Unit)
            }
            Statement::Print(Some(expr)) => {
                let slot = push_labels(trace, &["PRINT", "(", "expression", ")"]);

                let value = expr.evaluate(&mut trace.children[slot + 2], ctx)?;
                writeln!(ctx.output, "{value}")?;

                Ok(Value::Unit)
            }
        }
    }
}

impl Evaluate for Expr {
    fn evaluate(&self, trace: &mut Node, ctx: &mut Context<'_>) -> Result<Value, RuntimeError> {
        // Prevent stack overflow by allocating additional stack as required.
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || match self {
            Expr::Parenthesized(inner) => {
                let slot = push_labels(trace, &["(", "expression", ")"]);
                inner.evaluate(&mut trace.children[slot + 1], ctx)
            }
            Expr::Not(inner) => {
                let slot = push_labels(trace, &["NOT", "expression"]);

                match inner.evaluate(&mut trace.children[slot + 1], ctx)? {
                    Value::Boolean(value) => Ok(Value::Boolean(!value)),
                    other => Err(RuntimeError::Logical(format!(
                        "Cannot apply 'not' to {} '{other}'",
                        other.type_name()
                    ))),
                }
            }
            Expr::Binary { op, left, right } => {
                let slot = push_labels(trace, &["expression", op.symbol(), "expression"]);

                let left = left.evaluate(&mut trace.children[slot], ctx)?;
                let right = right.evaluate(&mut trace.children[slot + 2], ctx)?;

                operators::apply_binary(*op, left, right)
            }
            Expr::Absolute(inner) => {
                let value = evaluate_builtin_operand(TokenKind::Absolute, inner, trace, ctx)?;
                builtins::absolute(&value)
            }
            Expr::Sin(inner) => {
                let value = evaluate_builtin_operand(TokenKind::Sin, inner, trace, ctx)?;
                builtins::sin(&value)
            }
            Expr::Cos(inner) => {
                let value = evaluate_builtin_operand(TokenKind::Cos, inner, trace, ctx)?;
                builtins::cos(&value)
            }
            Expr::Tan(inner) => {
                let value = evaluate_builtin_operand(TokenKind::Tan, inner, trace, ctx)?;
                builtins::tan(&value)
            }
            Expr::Power(base, exponent) => {
                let slot = push_labels(trace, &["POWER", "(", "expression", ",", "expression", ")"]);

                let base = base.evaluate(&mut trace.children[slot + 2], ctx)?;
                let exponent = exponent.evaluate(&mut trace.children[slot + 4], ctx)?;

                builtins::power(&base, &exponent)
            }
            Expr::Input(prompt) => {
                let line = match prompt {
                    None => {
                        push_labels(trace, &["CONSOLE_INPUT", "(", ")"]);
                        read_line(ctx)?
                    }
                    Some(prompt) => {
                        let slot = push_labels(trace, &["CONSOLE_INPUT", "(", "expression", ")"]);

                        let prompt = prompt.evaluate(&mut trace.children[slot + 2], ctx)?;
                        write!(ctx.output, "{prompt}")?;
                        ctx.output.flush()?;

                        read_line(ctx)?
                    }
                };

                Ok(builtins::interpret_input(line))
            }
            Expr::Variable(name) => {
                let identifier = trace.slot("IDENTIFIER").slot(name.clone());

                let value = ctx
                    .state
                    .variable(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UnresolvedIdentifier { name: name.clone() })?;
                identifier.push(Node::new(value.to_string()));

                Ok(value)
            }
            Expr::Call(name) => {
                trace.push(Node::leaf("IDENTIFIER", name.clone()));
                let slot = push_labels(trace, &["(", ")", "block"]);

                let function =
                    ctx.state.function(name).ok_or_else(|| RuntimeError::UndeclaredFunction { name: name.clone() })?;

                if ctx.depth >= ctx.config.max_call_depth {
                    return Err(RuntimeError::RecursionLimit { depth: ctx.config.max_call_depth });
                }

                trace!(name = %name, depth = ctx.depth, "Calling function");

                ctx.depth += 1;
                let result = function.body.evaluate(&mut trace.children[slot + 2], ctx);
                ctx.depth -= 1;

                result
            }
            Expr::Constant(constant) => constant.evaluate(trace, ctx),
        })
    }
}

impl Evaluate for Constant {
    fn evaluate(&self, trace: &mut Node, _ctx: &mut Context<'_>) -> Result<Value, RuntimeError> {
        let value = match self {
            Constant::Integer(int) => Value::Integer(*int),
            Constant::Float(float) | Constant::Pi(float) | Constant::E(float) => Value::Float(*float),
            Constant::Boolean(boolean) => Value::Boolean(*boolean),
            Constant::String(string) => Value::String(string.clone()),
        };

        trace.slot("const").push(Node::leaf(self.label(), value.to_string()));

        Ok(value)
    }
}

/// Shared by the single argument builtins: records `NAME ( expression )` and evaluates the operand.
fn evaluate_builtin_operand(
    keyword: TokenKind,
    operand: &Expr,
    trace: &mut Node,
    ctx: &mut Context<'_>,
) -> Result<Value, RuntimeError> {
    let slot = push_labels(trace, &[keyword.label(), "(", "expression", ")"]);

    operand.evaluate(&mut trace.children[slot + 2], ctx)
}

/// Reads one line, without its line ending. End of input reads as an empty line.
fn read_line(ctx: &mut Context<'_>) -> Result<String, RuntimeError> {
    let mut line = String::new();
    ctx.input.read_line(&mut line)?;

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);

    Ok(line)
}
