//! Builds the SLR(1) parse table for the grammar in [`productions`](super::productions).
//!
//! The table is computed once per process. LR(0) item sets give the states, FOLLOW sets decide where to reduce,
//! and shift/reduce conflicts are settled by the precedence ladder the way yacc does it.

use super::precedence::{precedence_of, Associativity, Precedence};
use super::productions::{productions, NonTerminal, Production, Symbol};

use crate::token::TokenKind;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use tracing::{debug, warn};

/// The table shared by every grammar engine.
pub static PARSE_TABLE: LazyLock<ParseTable> = LazyLock::new(|| ParseTable::build(productions()));

/// A lookahead: either a token kind or the end of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
    Token(TokenKind),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
    /// Left by a non-associative tie. Behaves like a missing entry.
    Error,
}

/// A conflict the precedence ladder could not settle. The table still holds `kept`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub state: usize,
    pub terminal: Terminal,
    pub kept: Action,
    pub dropped: Action,
}

#[derive(Debug)]
pub struct ParseTable {
    pub productions: Vec<Production>,
    actions: HashMap<(usize, Terminal), Action>,
    gotos: HashMap<(usize, NonTerminal), usize>,
    pub conflicts: Vec<Conflict>,
    state_count: usize,
}

/// An LR(0) item: a production with a position inside its right hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Item {
    production: usize,
    dot: usize,
}

type ItemSet = BTreeSet<Item>;

impl ParseTable {
    /// Builds the table. Production 0 must be the augmented start production, and no production may be empty.
    pub fn build(productions: Vec<Production>) -> ParseTable {
        assert!(productions.iter().all(|production| !production.rhs.is_empty()), "Empty productions are unsupported");
        assert_eq!(productions[0].lhs, NonTerminal::Start);

        let follow = follow_sets(&productions);

        let mut table = ParseTable {
            productions,
            actions: HashMap::new(),
            gotos: HashMap::new(),
            conflicts: vec![],
            state_count: 0,
        };

        let (states, transitions) = table.item_sets();
        table.state_count = states.len();

        for (state, items) in states.iter().enumerate() {
            for item in items {
                let production = &table.productions[item.production];
                let (lhs, next_symbol) = (production.lhs, production.rhs.get(item.dot).copied());

                match next_symbol {
                    Some(Symbol::Terminal(kind)) => {
                        let next = transitions[&(state, Symbol::Terminal(kind))];
                        table.insert_action(state, Terminal::Token(kind), Action::Shift(next));
                    }
                    Some(Symbol::NonTerminal(_)) => (),
                    None if item.production == 0 => table.insert_action(state, Terminal::End, Action::Accept),
                    None => {
                        for terminal in &follow[&lhs] {
                            table.insert_action(state, *terminal, Action::Reduce(item.production));
                        }
                    }
                }
            }
        }

        for ((state, symbol), next) in &transitions {
            if let Symbol::NonTerminal(nt) = symbol {
                table.gotos.insert((*state, *nt), *next);
            }
        }

        debug!(
            states = table.state_count,
            actions = table.actions.len(),
            conflicts = table.conflicts.len(),
            "Built parse table"
        );

        table
    }

    /// The action for a lookahead in a state. `None` means the lookahead is a syntax error there.
    pub fn action(&self, state: usize, terminal: Terminal) -> Option<Action> {
        match self.actions.get(&(state, terminal)) {
            Some(Action::Error) | None => None,
            Some(action) => Some(*action),
        }
    }

    pub fn goto(&self, state: usize, nt: NonTerminal) -> Option<usize> {
        self.gotos.get(&(state, nt)).copied()
    }

    /// Token kinds that would have been accepted in a state, for error messages.
    pub fn expected(&self, state: usize) -> BTreeSet<TokenKind> {
        self.actions
            .iter()
            .filter(|((from, _), action)| *from == state && **action != Action::Error)
            .filter_map(|((_, terminal), _)| match terminal {
                Terminal::Token(kind) => Some(*kind),
                Terminal::End => None,
            })
            .collect()
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /* Construction helpers */

    fn closure(&self, mut items: ItemSet) -> ItemSet {
        let mut worklist: Vec<Item> = items.iter().copied().collect();

        while let Some(item) = worklist.pop() {
            let Some(Symbol::NonTerminal(nt)) = self.productions[item.production].rhs.get(item.dot) else {
                continue;
            };

            for (index, production) in self.productions.iter().enumerate() {
                let new_item = Item { production: index, dot: 0 };
                if production.lhs == *nt && items.insert(new_item) {
                    worklist.push(new_item);
                }
            }
        }

        items
    }

    fn advance(&self, items: &ItemSet, symbol: Symbol) -> ItemSet {
        let kernel = items
            .iter()
            .filter(|item| self.productions[item.production].rhs.get(item.dot) == Some(&symbol))
            .map(|item| Item { production: item.production, dot: item.dot + 1 })
            .collect();

        self.closure(kernel)
    }

    /// Computes the canonical collection of LR(0) item sets and the transitions between them.
    fn item_sets(&self) -> (Vec<ItemSet>, HashMap<(usize, Symbol), usize>) {
        let start = self.closure(BTreeSet::from([Item { production: 0, dot: 0 }]));

        let mut states = vec![start.clone()];
        let mut index: HashMap<ItemSet, usize> = HashMap::from([(start, 0)]);
        let mut transitions = HashMap::new();

        let mut current = 0;
        while current < states.len() {
            let next_symbols: BTreeSet<Symbol> = states[current]
                .iter()
                .filter_map(|item| self.productions[item.production].rhs.get(item.dot).copied())
                .collect();

            for symbol in next_symbols {
                let target = self.advance(&states[current], symbol);

                let target_index = match index.get(&target) {
                    Some(existing) => *existing,
                    None => {
                        states.push(target.clone());
                        index.insert(target, states.len() - 1);
                        states.len() - 1
                    }
                };

                transitions.insert((current, symbol), target_index);
            }

            current += 1;
        }

        (states, transitions)
    }

    fn insert_action(&mut self, state: usize, terminal: Terminal, action: Action) {
        let Some(existing) = self.actions.get(&(state, terminal)).copied() else {
            self.actions.insert((state, terminal), action);
            return;
        };

        if existing == action {
            return;
        }

        let (kept, unresolved) = match (existing, action) {
            (Action::Shift(_), Action::Reduce(production)) | (Action::Reduce(production), Action::Shift(_)) => {
                let shift = if let Action::Shift(_) = existing { existing } else { action };
                self.resolve_shift_reduce(shift, production, terminal)
            }
            (Action::Reduce(a), Action::Reduce(b)) => (Action::Reduce(a.min(b)), true),
            (Action::Accept, _) | (_, Action::Accept) => (Action::Accept, true),
            (Action::Error, _) => (Action::Error, false),
            (_, Action::Error) => (Action::Error, false),
            (Action::Shift(_), Action::Shift(_)) => (existing, true),
        };

        if unresolved {
            let dropped = if kept == existing { action } else { existing };
            warn!(state, ?terminal, ?kept, ?dropped, "Unresolved grammar conflict");
            self.conflicts.push(Conflict { state, terminal, kept, dropped });
        }

        self.actions.insert((state, terminal), kept);
    }

    /// Returns the winning action, and whether the ladder failed to decide it.
    fn resolve_shift_reduce(&self, shift: Action, production: usize, terminal: Terminal) -> (Action, bool) {
        let token = match terminal {
            Terminal::Token(kind) => precedence_of(kind),
            Terminal::End => Precedence::NONE,
        };
        let rule = self.production_precedence(production);

        if token.level < rule.level || (token.level == rule.level && rule.associativity == Associativity::Left) {
            (Action::Reduce(production), token.level == 0 && rule.level == 0)
        } else if token.level == rule.level && rule.associativity == Associativity::NonAssoc {
            (Action::Error, false)
        } else {
            (shift, rule.level == 0)
        }
    }

    /// A production takes the precedence of its rightmost terminal.
    fn production_precedence(&self, production: usize) -> Precedence {
        self.productions[production]
            .rhs
            .iter()
            .rev()
            .find_map(|symbol| match symbol {
                Symbol::Terminal(kind) => Some(precedence_of(*kind)),
                Symbol::NonTerminal(_) => None,
            })
            .unwrap_or(Precedence::NONE)
    }
}

/* FIRST and FOLLOW */

fn first_sets(productions: &[Production]) -> BTreeMap<NonTerminal, BTreeSet<TokenKind>> {
    let mut first: BTreeMap<NonTerminal, BTreeSet<TokenKind>> = BTreeMap::new();

    let mut changed = true;
    while changed {
        changed = false;

        for production in productions {
            let additions: BTreeSet<TokenKind> = match production.rhs[0] {
                Symbol::Terminal(kind) => BTreeSet::from([kind]),
                Symbol::NonTerminal(nt) => first.get(&nt).cloned().unwrap_or_default(),
            };

            let entry = first.entry(production.lhs).or_default();
            let before = entry.len();
            entry.extend(additions);
            changed |= entry.len() != before;
        }
    }

    first
}

fn follow_sets(productions: &[Production]) -> BTreeMap<NonTerminal, BTreeSet<Terminal>> {
    let first = first_sets(productions);

    let mut follow: BTreeMap<NonTerminal, BTreeSet<Terminal>> = BTreeMap::new();
    for production in productions {
        follow.entry(production.lhs).or_default();
    }
    follow.entry(NonTerminal::Start).or_default().insert(Terminal::End);

    let mut changed = true;
    while changed {
        changed = false;

        for production in productions {
            for (position, symbol) in production.rhs.iter().enumerate() {
                let Symbol::NonTerminal(nt) = symbol else { continue };

                let additions: BTreeSet<Terminal> = match production.rhs.get(position + 1) {
                    Some(Symbol::Terminal(kind)) => BTreeSet::from([Terminal::Token(*kind)]),
                    Some(Symbol::NonTerminal(next)) => {
                        first.get(next).into_iter().flatten().map(|kind| Terminal::Token(*kind)).collect()
                    }
                    None => follow[&production.lhs].clone(),
                };

                let entry = follow.entry(*nt).or_default();
                let before = entry.len();
                entry.extend(additions);
                changed |= entry.len() != before;
            }
        }
    }

    follow
}
