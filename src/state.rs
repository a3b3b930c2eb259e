//! The symbol table shared by parsing and evaluation.

use crate::ast::FunctionDeclaration;
use crate::config::RedeclarationPolicy;
use crate::error::{ParseError, RuntimeError};
use crate::eval::Value;

use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{trace, warn};

/// Variable bindings and function declarations for one run.
///
/// Function declarations are added while the semantic pass reduces them, so a call may appear before the
/// declaration it resolves to. Variables are added during evaluation and are never rebound.
///
/// The variable table is shared with the snapshots `let` evaluates to. Binding only copies it while an older
/// snapshot is still alive.
#[derive(Debug, Default)]
pub struct ProgramState {
    variables: Rc<BTreeMap<String, Value>>,
    functions: BTreeMap<String, Rc<FunctionDeclaration>>,
    policy: RedeclarationPolicy,
}

impl ProgramState {
    pub fn new(policy: RedeclarationPolicy) -> ProgramState {
        ProgramState { variables: Rc::default(), functions: BTreeMap::new(), policy }
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> &BTreeMap<String, Value> {
        &self.variables
    }

    /// A handle to the current variable table. Cheap, the table itself is shared.
    pub fn snapshot(&self) -> Rc<BTreeMap<String, Value>> {
        Rc::clone(&self.variables)
    }

    /// Binds a name for the rest of the run. A name that is already bound keeps its old value.
    pub fn bind(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if self.variables.contains_key(name) {
            return Err(RuntimeError::ImmutableRebind { name: name.to_string() });
        }

        trace!(name, %value, "Binding variable");
        Rc::make_mut(&mut self.variables).insert(name.to_string(), value);

        Ok(())
    }

    pub fn declare_function(&mut self, declaration: FunctionDeclaration) -> Result<(), ParseError> {
        if self.functions.contains_key(&declaration.name) {
            match self.policy {
                RedeclarationPolicy::Overwrite => {
                    warn!(name = %declaration.name, "Function redeclared, replacing the earlier declaration");
                }
                RedeclarationPolicy::Reject => {
                    return Err(ParseError::FunctionRedeclared { name: declaration.name });
                }
            }
        }

        trace!(name = %declaration.name, "Declaring function");
        self.functions.insert(declaration.name.clone(), Rc::new(declaration));

        Ok(())
    }

    /// The handle is cloned out so the body can be evaluated while the state is borrowed mutably.
    pub fn function(&self, name: &str) -> Option<Rc<FunctionDeclaration>> {
        self.functions.get(name).cloned()
    }

    pub fn functions(&self) -> &BTreeMap<String, Rc<FunctionDeclaration>> {
        &self.functions
    }
}
