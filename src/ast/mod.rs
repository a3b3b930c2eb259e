//! The abstract syntax tree built by the semantic pass of the grammar engine.
//!
//! Every node owns its children. Evaluation lives in [`crate::eval`].

mod ast_types;

#[cfg(test)]
mod tests;

pub use ast_types::*;
