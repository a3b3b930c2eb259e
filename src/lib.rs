//! Runs programs in a small expression language, producing two trees along the way.
//!
//! A run tokenizes the source, parses it once in syntax mode (the full static derivation, as a [`trace::Node`]
//! tree) and once in semantic mode (the AST), then evaluates the AST. Evaluation records a second
//! [`trace::Node`] tree, the semantic trace, holding only the derivation of what actually ran.
//!
//! Both parses share one [`ProgramState`]. Function declarations register themselves during the semantic parse,
//! so a function can be called before its declaration appears in the source.

// I use `cargo clippy -- -D clippy::pedantic`
#![allow(
    clippy::missing_errors_doc,  // Docs? Lol.
    clippy::missing_panics_doc,  // Docs? Lmao.
    clippy::must_use_candidate,  // What?
    clippy::module_name_repetitions,  // Maybe a little weird but I'm bad at naming things.
    clippy::cast_precision_loss,  // Integers meet floats on purpose.
    clippy::if_not_else,  // Actually I like this, its the gaurd pattern
    clippy::match_wildcard_for_single_variants,  // I do this on purpose
    clippy::match_same_arms,  // Sometimes the arms read better apart.
)]

pub mod ast;
pub mod config;
pub mod error;
pub mod eval;
pub mod grammar;
pub mod state;
pub mod token;
pub mod trace;

pub use config::{RedeclarationPolicy, RunConfig};
pub use error::{pretty_error_message, RunError};
pub use eval::Value;
pub use state::ProgramState;

use eval::{Context, Evaluate};
use trace::Node;

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

/// Everything a run produced, including whatever was built before a failure.
#[derive(Debug)]
pub struct RunReport {
    /// The static derivation. `None` if the run failed before the syntax pass finished.
    pub syntax_tree: Option<Node>,
    /// The trace of what ran, rooted at `main`. Partial if evaluation failed.
    pub semantic_tree: Node,
    /// Variables and functions as they were when the run stopped.
    pub state: ProgramState,
    /// The value of the last statement evaluated, or the first error.
    pub result: Result<Value, RunError>,
}

/// Runs a program given as a string. `print` writes to `output` and `input()` reads from `input`.
///
/// Never panics on a bad program: the first error stops the run and is returned in the report.
pub fn run_string(source: &str, config: &RunConfig, input: &mut dyn BufRead, output: &mut dyn Write) -> RunReport {
    let mut state = ProgramState::new(config.redeclaration);
    let mut syntax_tree = None;
    let mut semantic_tree = Node::new("main");

    let result = run_stages(source, config, &mut state, &mut syntax_tree, &mut semantic_tree, input, output);

    match &result {
        Ok(value) => debug!(%value, "Run finished"),
        Err(err) => debug!(%err, "Run failed"),
    }

    RunReport { syntax_tree, semantic_tree, state, result }
}

/// Reads a file, then behaves like [`run_string`].
pub fn run_file(
    path: impl AsRef<Path>,
    config: &RunConfig,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> RunReport {
    let path = path.as_ref();

    match std::fs::read_to_string(path) {
        Ok(source) => run_string(&source, config, input, output),
        Err(err) => RunReport {
            syntax_tree: None,
            semantic_tree: Node::new("main"),
            state: ProgramState::new(config.redeclaration),
            result: Err(format!("Could not open file {}: {err}", path.display()).into()),
        },
    }
}

fn run_stages(
    source: &str,
    config: &RunConfig,
    state: &mut ProgramState,
    syntax_tree: &mut Option<Node>,
    semantic_tree: &mut Node,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<Value, RunError> {
    let tokens = token::tokenize(source)?;
    debug!(tokens = tokens.len(), "Tokenized source");

    *syntax_tree = Some(grammar::parse_syntax(&tokens, state)?);

    let main = grammar::parse_semantic(&tokens, state)?;
    debug!(functions = state.functions().len(), "Built AST");

    let mut ctx = Context::new(state, config, input, output);

    Ok(main.evaluate(semantic_tree, &mut ctx)?)
}
