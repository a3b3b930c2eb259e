//! Tokenization turns source text into the ordered, replayable stream of [`Token`]s consumed by the grammar
//! engine.

mod token_types;
mod tokenize;

#[cfg(test)]
mod tests;

pub use token_types::{Span, Token, TokenKind};
pub use tokenize::tokenize;
