//! The precedence ladder used to resolve shift/reduce conflicts.

use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    NonAssoc,
}

/// A level on the ladder. Higher levels bind tighter. Level 0 means "not on the ladder".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precedence {
    pub level: usize,
    pub associativity: Associativity,
}

impl Precedence {
    /// What a production or token gets when nothing on the ladder applies.
    pub const NONE: Precedence = Precedence { level: 0, associativity: Associativity::Right };
}

/// Looks a token kind up on the ladder. Lowest to highest:
///
/// `function`, `let`, `=`, `if else ;`, `and or`, `not`, comparisons, `+ -`, `* /`, literals.
/// Every level is left associative.
pub fn precedence_of(kind: TokenKind) -> Precedence {
    use TokenKind as K;

    let level = match kind {
        K::Function => 1,
        K::Let => 2,
        K::Assign => 3,
        K::If | K::Else | K::Semicolon => 4,
        K::And | K::Or => 5,
        K::Not => 6,
        K::DoubleEquals | K::NotEquals | K::GreaterEquals | K::Greater | K::Less | K::LessEquals => 7,
        K::Sum | K::Sub => 8,
        K::Mul | K::Div => 9,
        K::String | K::Integer | K::Float | K::Boolean | K::Pi | K::E => 10,
        _ => return Precedence::NONE,
    };

    Precedence { level, associativity: Associativity::Left }
}
