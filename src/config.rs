//! Settings that change how a program is run.

/// What happens when a function name is declared a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedeclarationPolicy {
    /// The later declaration replaces the earlier one. Variables are single assignment, functions are not.
    #[default]
    Overwrite,
    /// A second declaration is a parse error, matching the rule for variables.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub redeclaration: RedeclarationPolicy,

    /// How many function calls may be active at once before evaluation gives up.
    pub max_call_depth: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig { redeclaration: RedeclarationPolicy::default(), max_call_depth: 1000 }
    }
}
