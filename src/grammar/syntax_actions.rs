//! Reduce actions for [`Mode::Syntax`](super::Mode::Syntax): every production becomes a labelled node.

use super::productions::{Production, Symbol};
use super::ReduceActions;

use crate::error::ParseError;
use crate::state::ProgramState;
use crate::token::Token;
use crate::trace::Node;

#[derive(Debug)]
pub(crate) enum SyntaxValue {
    Token(Token),
    /// The children of a non-terminal. The parent labels them once it knows which symbol they were reduced to.
    Children(Vec<Node>),
}

pub(crate) struct SyntaxActions;

impl ReduceActions for SyntaxActions {
    type Value = SyntaxValue;

    fn shift(&mut self, token: &Token) -> SyntaxValue {
        SyntaxValue::Token(token.clone())
    }

    fn reduce(
        &mut self,
        production: &Production,
        values: Vec<SyntaxValue>,
        _state: &mut ProgramState,
    ) -> Result<SyntaxValue, ParseError> {
        let children = production
            .rhs
            .iter()
            .zip(values)
            .map(|(symbol, value)| match (symbol, value) {
                (Symbol::Terminal(_), SyntaxValue::Token(token)) => Ok(terminal_node(&token)),
                (Symbol::NonTerminal(nt), SyntaxValue::Children(children)) => {
                    Ok(Node::with_children(nt.name(), children))
                }
                (symbol, value) => Err(ParseError::Logic(format!("Symbol {symbol} received {value:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SyntaxValue::Children(children))
    }
}

/// Names and literals keep their text as a single child. Everything else is fully described by its label.
fn terminal_node(token: &Token) -> Node {
    if token.kind.carries_lexeme() {
        Node::leaf(token.kind.label(), token.lexeme.clone())
    } else {
        Node::new(token.kind.label())
    }
}
