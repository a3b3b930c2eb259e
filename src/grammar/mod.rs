//! The table driven grammar engine.
//!
//! A [`GrammarEngine`] runs an LR parse over a token stream. What a reduction builds depends on the engine's
//! [`Mode`], fixed at construction: in [`Mode::Syntax`] every production becomes a labelled [`Node`], and in
//! [`Mode::Semantic`] productions build the AST directly. The same token slice can be parsed by an engine of
//! each mode.

mod precedence;
mod productions;
mod semantic_actions;
mod syntax_actions;
mod table;

#[cfg(test)]
mod tests;

pub use precedence::{precedence_of, Associativity, Precedence};
pub use productions::{productions, NonTerminal, Production, Rule, Symbol};
pub use table::{Action, Conflict, ParseTable, Terminal, PARSE_TABLE};

use semantic_actions::{SemanticActions, SemanticValue};
use syntax_actions::{SyntaxActions, SyntaxValue};

use crate::ast::Main;
use crate::error::ParseError;
use crate::state::ProgramState;
use crate::token::Token;
use crate::trace::Node;

use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Syntax,
    Semantic,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutput {
    Syntax(Node),
    Semantic(Main),
}

/// What a grammar engine does when it shifts a token or reduces a production.
pub(crate) trait ReduceActions {
    type Value;

    fn shift(&mut self, token: &Token) -> Self::Value;

    /// `values` holds one value per right hand side symbol, in order.
    fn reduce(
        &mut self,
        production: &Production,
        values: Vec<Self::Value>,
        state: &mut ProgramState,
    ) -> Result<Self::Value, ParseError>;
}

#[derive(Debug, Clone, Copy)]
pub struct GrammarEngine {
    mode: Mode,
}

impl GrammarEngine {
    pub fn new(mode: Mode) -> GrammarEngine {
        GrammarEngine { mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Parses a full token stream. The state receives function declarations in semantic mode, and is left alone
    /// in syntax mode.
    pub fn parse(&self, tokens: &[Token], state: &mut ProgramState) -> Result<ParseOutput, ParseError> {
        debug!(mode = ?self.mode, tokens = tokens.len(), "Starting parse");

        match self.mode {
            Mode::Syntax => match run_lr(&mut SyntaxActions, tokens, state)? {
                SyntaxValue::Children(children) => Ok(ParseOutput::Syntax(Node::with_children("main", children))),
                SyntaxValue::Token(token) => Err(format!("Parse produced a bare token {token}").into()),
            },
            Mode::Semantic => match run_lr(&mut SemanticActions, tokens, state)? {
                SemanticValue::Main(main) => Ok(ParseOutput::Semantic(main)),
                other => Err(format!("Parse produced {other:?} instead of main").into()),
            },
        }
    }
}

/// Parses in syntax mode, returning the `main` node of the full derivation.
pub fn parse_syntax(tokens: &[Token], state: &mut ProgramState) -> Result<Node, ParseError> {
    match GrammarEngine::new(Mode::Syntax).parse(tokens, state)? {
        ParseOutput::Syntax(node) => Ok(node),
        ParseOutput::Semantic(_) => Err("Syntax engine produced an AST".into()),
    }
}

/// Parses in semantic mode, returning the AST.
pub fn parse_semantic(tokens: &[Token], state: &mut ProgramState) -> Result<Main, ParseError> {
    match GrammarEngine::new(Mode::Semantic).parse(tokens, state)? {
        ParseOutput::Semantic(main) => Ok(main),
        ParseOutput::Syntax(_) => Err("Semantic engine produced a syntax tree".into()),
    }
}

/// The LR driver. Keeps explicit state and value stacks, so deep programs do not recurse.
fn run_lr<A: ReduceActions>(
    actions: &mut A,
    tokens: &[Token],
    state: &mut ProgramState,
) -> Result<A::Value, ParseError> {
    let table = &*PARSE_TABLE;

    let mut states: Vec<usize> = vec![0];
    let mut values: Vec<A::Value> = vec![];
    let mut position = 0;

    loop {
        let current = *states.last().expect("Start state is never popped");
        let lookahead = tokens.get(position);
        let terminal = lookahead.map_or(Terminal::End, |token| Terminal::Token(token.kind));

        match table.action(current, terminal) {
            Some(Action::Shift(next)) => {
                let token = lookahead.expect("End of input is never shifted");
                values.push(actions.shift(token));
                states.push(next);
                position += 1;
            }
            Some(Action::Reduce(index)) => {
                let production = &table.productions[index];
                let length = production.rhs.len();

                trace!(%production, "Reducing");

                let children = values.split_off(values.len() - length);
                states.truncate(states.len() - length);

                let value = actions.reduce(production, children, state)?;

                let from = *states.last().expect("Start state is never popped");
                let next = table
                    .goto(from, production.lhs)
                    .ok_or_else(|| ParseError::Logic(format!("No goto from state {from} on {}", production.lhs.name())))?;

                states.push(next);
                values.push(value);
            }
            Some(Action::Accept) => {
                return values.pop().ok_or_else(|| "Accepted with an empty value stack".into());
            }
            Some(Action::Error) | None => {
                let expected = table.expected(current);

                return Err(match lookahead {
                    Some(token) => ParseError::UnexpectedToken { token: token.clone(), expected },
                    None => ParseError::UnexpectedEndOfInput { expected },
                });
            }
        }
    }
}
