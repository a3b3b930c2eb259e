//! Handles the display of pretty messages for errors.

use super::{ParseError, RunError, RuntimeError, TokenError};

use crate::token::TokenKind;

use std::collections::BTreeSet;

/* Public */

pub fn pretty_error_message(err: &RunError) -> String {
    match err {
        RunError::Direct(msg) => format!("Error occurred during the run:\n    {msg}"),
        RunError::TokenError(TokenError::Problem(msg)) => {
            format!("Error occurred during tokenization:\n    {msg}")
        }
        RunError::TokenError(TokenError::ProblemAtSpan(msg, span)) => {
            format!("Error occurred during tokenization:\n    At {span}: {msg}")
        }
        RunError::ParseError(p_error) => pretty_parse_error_message(p_error),
        RunError::RuntimeError(RuntimeError::Io(io)) => {
            format!("Error occurred during console I/O:\n    {io}")
        }
        RunError::RuntimeError(r_error) => format!("Error occurred during evaluation:\n    {r_error}"),
    }
}

/* Private Helpers */

fn pretty_parse_error_message(err: &ParseError) -> String {
    match err {
        ParseError::Logic(msg) => format!("Internal error occurred during parsing:\n    {msg}"),
        ParseError::UnexpectedToken { token, expected } => {
            format!(
                "Error occurred during parsing:\
                \n    Failed to parse token at {} ('{}', {})\
                \n    Expected {}.",
                token.span,
                token.lexeme,
                token.kind.pretty_string(),
                terminal_choice_description(expected),
            )
        }
        ParseError::UnexpectedEndOfInput { expected } => {
            format!(
                "Error occurred during parsing:\
                \n    Ran out of input, expected more.\
                \n    Expected {}.",
                terminal_choice_description(expected),
            )
        }
        other => format!("Error occurred during parsing:\n    {other}"),
    }
}

fn is_binary_operator(kind: TokenKind) -> bool {
    use TokenKind as K;

    matches!(
        kind,
        K::And
            | K::Or
            | K::DoubleEquals
            | K::NotEquals
            | K::GreaterEquals
            | K::Greater
            | K::Less
            | K::LessEquals
            | K::Sum
            | K::Sub
            | K::Mul
            | K::Div
    )
}

/// Returns a pretty description of a set of token kinds, for use in the case where the user should pick one of them.
/// e.g. "one of ',', ')', an identifier, or an operator". Cases with many operators are identified, and "an
/// operator" is inserted instead.
fn terminal_choice_description(kinds: &BTreeSet<TokenKind>) -> String {
    let (kinds, operator): (BTreeSet<TokenKind>, _) =
        if kinds.iter().filter(|kind| is_binary_operator(**kind)).count() > 3 {
            (kinds.iter().copied().filter(|kind| !is_binary_operator(*kind)).collect(), Some("an operator"))
        } else {
            (kinds.clone(), None)
        };

    let mut to_show: Vec<String> = vec![];
    for kind in kinds {
        let shown = match kind.pretty_string() {
            pretty if kind.carries_lexeme() => pretty.to_string(),
            label => format!("'{label}'"),
        };

        if !to_show.contains(&shown) {
            to_show.push(shown);
        }
    }
    to_show.extend(operator.map(str::to_string));

    match to_show.len() {
        0 => "the end of input".to_string(),
        1 => to_show.remove(0),
        2 => to_show.join(" or "),
        n => "one of ".to_owned() + &to_show[..n - 1].join(", ") + ", or " + &to_show[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn many_operators_collapse() {
        use TokenKind as K;

        let kinds = BTreeSet::from([K::Sum, K::Sub, K::Mul, K::Div, K::Semicolon]);

        assert_eq!(terminal_choice_description(&kinds), "';' or an operator");
    }

    #[test]
    fn literals_are_described_once() {
        use TokenKind as K;

        let kinds = BTreeSet::from([K::Integer, K::Float, K::Identifier]);

        assert_eq!(terminal_choice_description(&kinds), "a numeric literal or an identifier");
    }
}
