//! Tests for the token module.

use super::*;

use std::io::Read;

use test_generator::test_resources;

fn read_file(resource: &str) -> String {
    let mut file = std::fs::File::open(resource).expect("File opens");
    let mut input = String::new();
    file.read_to_string(&mut input).expect("Read successful");
    input
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).unwrap().into_iter().map(|token| token.kind).collect()
}

fn lexemes(input: &str) -> Vec<String> {
    tokenize(input).unwrap().into_iter().map(|token| token.lexeme).collect()
}

#[test_resources("samples/**/*.tl")]
fn tokens_have_spans(resource: &str) {
    let input = read_file(resource);

    let tokens = tokenize(&input).unwrap();

    for token in tokens {
        println!("{token}");

        assert!(token.span.start_line <= token.span.end_line);
        assert!(token.span.start_col < token.span.end_col);
    }
}

#[test]
fn keywords_only_match_whole_words() {
    use TokenKind as K;

    assert_eq!(kinds("print printer"), vec![K::Print, K::Identifier]);
    assert_eq!(kinds("iffy if"), vec![K::Identifier, K::If]);
    assert_eq!(kinds("input abs sin cos tan pow"), vec![K::ConsoleInput, K::Absolute, K::Sin, K::Cos, K::Tan, K::Power]);
    assert_eq!(kinds("and or not let function else"), vec![K::And, K::Or, K::Not, K::Let, K::Function, K::Else]);
}

#[test]
fn boolean_spellings() {
    for word in ["true", "false", "True", "False", "TRUE", "FALSE"] {
        assert_eq!(kinds(word), vec![TokenKind::Boolean]);
    }

    assert_eq!(kinds("tRUE"), vec![TokenKind::Identifier]);
}

#[test]
fn numeric_literals() {
    use TokenKind as K;

    assert_eq!(kinds("12 3.25 0"), vec![K::Integer, K::Float, K::Integer]);
    assert_eq!(lexemes("3.25"), vec!["3.25"]);

    assert!(tokenize("3.").is_err());
}

#[test]
fn minus_is_a_sign_only_where_an_operand_starts() {
    use TokenKind as K;

    assert_eq!(kinds("-3"), vec![K::Integer]);
    assert_eq!(lexemes("abs(-3.5)"), vec!["abs", "(", "-3.5", ")"]);
    assert_eq!(kinds("5-2"), vec![K::Integer, K::Sub, K::Integer]);
    assert_eq!(kinds("x - -2"), vec![K::Identifier, K::Sub, K::Integer]);
    assert_eq!(kinds("(1)-2"), vec![K::LeftParenthesis, K::Integer, K::RightParenthesis, K::Sub, K::Integer]);
    assert_eq!(kinds("- x"), vec![K::Sub, K::Identifier]);
}

#[test]
fn signed_constants() {
    let tokens = tokenize("-__PI__ __E__ -__E__").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Pi);
    assert_eq!(tokens[0].lexeme, "-__PI__");
    assert_eq!(tokens[1].kind, TokenKind::E);
    assert_eq!(tokens[2].lexeme, "-__E__");

    assert_eq!(kinds("-__other"), vec![TokenKind::Sub, TokenKind::Identifier]);
}

#[test]
fn string_literals_keep_their_quotes() {
    assert_eq!(lexemes(r#""hi" 'there'"#), vec![r#""hi""#, "'there'"]);
    assert_eq!(lexemes(r#""""a "quoted" word""""#), vec![r#""""a "quoted" word""""#]);
    assert_eq!(lexemes(r#""" ''"#), vec![r#""""#, "''"]);

    assert!(tokenize("\"never closed").is_err());
}

#[test]
fn operators_and_punctuation() {
    use TokenKind as K;

    assert_eq!(
        kinds("== != >= <= > < = + * / ( ) { } ; ,"),
        vec![
            K::DoubleEquals,
            K::NotEquals,
            K::GreaterEquals,
            K::LessEquals,
            K::Greater,
            K::Less,
            K::Assign,
            K::Sum,
            K::Mul,
            K::Div,
            K::LeftParenthesis,
            K::RightParenthesis,
            K::LeftCurlyBrace,
            K::RightCurlyBrace,
            K::Semicolon,
            K::Comma,
        ]
    );

    assert!(tokenize("!").is_err());
}

#[test]
fn comments_act_as_whitespace() {
    use TokenKind as K;

    assert_eq!(kinds("let x = 1; // let y = 2;\nprint(x);").len(), 10);
    assert_eq!(kinds("4 // 2"), vec![K::Integer]);
    assert_eq!(kinds("4 / 2"), vec![K::Integer, K::Div, K::Integer]);
}

#[test]
fn spans_track_lines_and_columns() {
    let tokens = tokenize("let x\n  = 10;").unwrap();

    assert_eq!(tokens[1].span, Span { start_line: 1, end_line: 1, start_col: 5, end_col: 6 });
    assert_eq!(tokens[3].span, Span { start_line: 2, end_line: 2, start_col: 5, end_col: 7 });
}

#[test]
fn unknown_characters_are_rejected() {
    let err = tokenize("let x = 1 # 2;").unwrap_err();

    assert!(matches!(err, crate::error::TokenError::ProblemAtSpan(_, Span { start_col: 11, .. })));
}
