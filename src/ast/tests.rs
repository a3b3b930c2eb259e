use super::*;

use crate::error::ParseError;
use crate::token::{Token, TokenKind};

fn constant(kind: TokenKind, lexeme: &str) -> Result<Constant, ParseError> {
    Constant::from_token(&Token::new(kind, lexeme))
}

fn print(value: i64) -> StatementFull {
    StatementFull::Terminated(Statement::Print(Some(Expr::Constant(Constant::Integer(value)))))
}

#[test]
fn reversed_statements_are_restored() {
    assert_eq!(Program::from_reversed(vec![print(3), print(2), print(1)]), Program(vec![print(1), print(2), print(3)]));
    assert_eq!(Block::from_reversed(vec![print(2), print(1)]), Block(vec![print(1), print(2)]));
    assert_eq!(Block::from_reversed(vec![]), Block(vec![]));
}

#[test]
fn numeric_literals() {
    assert_eq!(constant(TokenKind::Integer, "42").unwrap(), Constant::Integer(42));
    assert_eq!(constant(TokenKind::Integer, "-7").unwrap(), Constant::Integer(-7));
    assert_eq!(constant(TokenKind::Float, "-0.25").unwrap(), Constant::Float(-0.25));

    let err = constant(TokenKind::Integer, "99999999999999999999").unwrap_err();
    assert!(matches!(err, ParseError::MalformedLiteral { kind: TokenKind::Integer, .. }));
}

#[test]
fn boolean_literals() {
    for spelling in ["true", "True", "TRUE"] {
        assert_eq!(constant(TokenKind::Boolean, spelling).unwrap(), Constant::Boolean(true));
    }
    for spelling in ["false", "False", "FALSE"] {
        assert_eq!(constant(TokenKind::Boolean, spelling).unwrap(), Constant::Boolean(false));
    }

    assert!(matches!(constant(TokenKind::Boolean, "tRuE"), Err(ParseError::BooleanLiteral { .. })));
}

#[test]
fn string_literals_lose_their_quotes() {
    assert_eq!(constant(TokenKind::String, "'hi'").unwrap(), Constant::String("hi".to_string()));
    assert_eq!(constant(TokenKind::String, "\"hi there\"").unwrap(), Constant::String("hi there".to_string()));
    assert_eq!(constant(TokenKind::String, "\"\"\"a\"\"\"").unwrap(), Constant::String("a".to_string()));
    assert_eq!(constant(TokenKind::String, "\"\"").unwrap(), Constant::String(String::new()));
}

#[test]
fn named_constants_take_their_sign() {
    assert_eq!(constant(TokenKind::Pi, "__PI__").unwrap(), Constant::Pi(std::f64::consts::PI));
    assert_eq!(constant(TokenKind::Pi, "-__PI__").unwrap(), Constant::Pi(-std::f64::consts::PI));
    assert_eq!(constant(TokenKind::E, "-__E__").unwrap(), Constant::E(-std::f64::consts::E));
}

#[test]
fn non_literals_are_not_constants() {
    assert!(matches!(constant(TokenKind::Identifier, "x"), Err(ParseError::Logic(_))));
}

#[test]
fn constant_labels_match_token_labels() {
    assert_eq!(Constant::Integer(1).label(), "INTEGER");
    assert_eq!(Constant::String(String::new()).label(), "STRING");
    assert_eq!(Constant::Pi(0.0).label(), "PI");
}

#[test]
fn binary_operators_map_to_tokens() {
    let kinds = [
        TokenKind::Sum,
        TokenKind::Sub,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::DoubleEquals,
        TokenKind::NotEquals,
        TokenKind::Greater,
        TokenKind::Less,
        TokenKind::GreaterEquals,
        TokenKind::LessEquals,
        TokenKind::And,
        TokenKind::Or,
    ];

    for kind in kinds {
        let op = BinaryOperator::from_token_kind(kind).unwrap();
        assert_eq!(op.token_kind(), kind);
        assert_eq!(op.symbol(), kind.label());
    }

    assert_eq!(BinaryOperator::from_token_kind(TokenKind::Not), None);
    assert_eq!(BinaryOperator::from_token_kind(TokenKind::Assign), None);
    assert_eq!(BinaryOperator::And.symbol(), "AND");
}
