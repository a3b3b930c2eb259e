//! Tests for the grammar engine.

use super::*;

use crate::ast::{BinaryOperator as B, Block, Constant, Expr, Statement, StatementFull};
use crate::config::RedeclarationPolicy;
use crate::token::{tokenize, TokenKind};

fn semantic(input: &str) -> Main {
    let tokens = tokenize(input).unwrap();
    parse_semantic(&tokens, &mut ProgramState::default()).unwrap()
}

fn syntax(input: &str) -> Node {
    let tokens = tokenize(input).unwrap();
    parse_syntax(&tokens, &mut ProgramState::default()).unwrap()
}

/// The expression of a program made of a single expression statement.
fn single_expression(input: &str) -> Expr {
    let main = semantic(input);

    match main.program.0.as_slice() {
        [StatementFull::Terminated(Statement::Expression(expr))] => expr.clone(),
        other => panic!("Expected a single expression statement, found {other:?}"),
    }
}

fn int(value: i64) -> Box<Expr> {
    Box::new(Expr::Constant(Constant::Integer(value)))
}

fn var(name: &str) -> Box<Expr> {
    Box::new(Expr::Variable(name.to_string()))
}

fn binary(op: B, left: Box<Expr>, right: Box<Expr>) -> Box<Expr> {
    Box::new(Expr::Binary { op, left, right })
}

#[test]
fn table_has_no_unresolved_conflicts() {
    assert!(PARSE_TABLE.conflicts.is_empty(), "{:?}", PARSE_TABLE.conflicts);
    assert!(PARSE_TABLE.state_count() > 0);
}

#[test]
fn same_level_operators_lean_left() {
    assert_eq!(single_expression("10 - 4 - 3;"), *binary(B::Sub, binary(B::Sub, int(10), int(4)), int(3)));
    assert_eq!(single_expression("8 / 4 * 2;"), *binary(B::Mul, binary(B::Div, int(8), int(4)), int(2)));
    assert_eq!(single_expression("a and b or c;"), *binary(B::Or, binary(B::And, var("a"), var("b")), var("c")));
}

#[test]
fn higher_levels_bind_tighter() {
    assert_eq!(single_expression("1 + 2 * 3;"), *binary(B::Sum, int(1), binary(B::Mul, int(2), int(3))));
    assert_eq!(single_expression("1 * 2 + 3;"), *binary(B::Sum, binary(B::Mul, int(1), int(2)), int(3)));
    assert_eq!(
        single_expression("a == b and c < d;"),
        *binary(B::And, binary(B::Equal, var("a"), var("b")), binary(B::Less, var("c"), var("d")))
    );
    assert_eq!(single_expression("1 + 2 >= 3;"), *binary(B::GreaterEqual, binary(B::Sum, int(1), int(2)), int(3)));
}

#[test]
fn not_binds_looser_than_comparison() {
    assert_eq!(single_expression("not a == b;"), Expr::Not(binary(B::Equal, var("a"), var("b"))));
    assert_eq!(
        single_expression("not a and b;"),
        *binary(B::And, Box::new(Expr::Not(var("a"))), var("b"))
    );
}

#[test]
fn parentheses_override_the_ladder() {
    assert_eq!(
        single_expression("(1 + 2) * 3;"),
        *binary(B::Mul, Box::new(Expr::Parenthesized(binary(B::Sum, int(1), int(2)))), int(3))
    );
}

#[test]
fn statements_keep_source_order() {
    let main = semantic("print(1); print(2); if (true) { print(3); print(4); } print(5);");

    let printed: Vec<_> = main
        .program
        .0
        .iter()
        .map(|statement| match statement {
            StatementFull::Terminated(Statement::Print(Some(Expr::Constant(Constant::Integer(n))))) => *n,
            StatementFull::If { body: Block(body), .. } => {
                assert_eq!(body.len(), 2);
                assert_eq!(body[0], StatementFull::Terminated(Statement::Print(Some(*int(3)))));
                assert_eq!(body[1], StatementFull::Terminated(Statement::Print(Some(*int(4)))));
                0
            }
            other => panic!("Unexpected statement {other:?}"),
        })
        .collect();

    assert_eq!(printed, vec![1, 2, 0, 5]);
}

#[test]
fn builtins_have_dedicated_nodes() {
    assert_eq!(single_expression("abs(-3);"), Expr::Absolute(int(-3)));
    assert_eq!(single_expression("pow(2, 3);"), Expr::Power(int(2), int(3)));
    assert_eq!(single_expression("input();"), Expr::Input(None));
    assert_eq!(
        single_expression("input('name? ');"),
        Expr::Input(Some(Box::new(Expr::Constant(Constant::String("name? ".to_string())))))
    );
    assert_eq!(single_expression("f();"), Expr::Call("f".to_string()));
}

#[test]
fn let_targets_a_variable() {
    let main = semantic("let x = 1 + 2;");

    assert_eq!(
        main.program.0,
        vec![StatementFull::Terminated(Statement::Assignment {
            target: var("x"),
            value: *binary(B::Sum, int(1), int(2)),
        })]
    );
}

#[test]
fn constants_convert_their_lexemes() {
    assert_eq!(single_expression("2.5;"), Expr::Constant(Constant::Float(2.5)));
    assert_eq!(single_expression("FALSE;"), Expr::Constant(Constant::Boolean(false)));
    assert_eq!(single_expression("\"\"\"hi\"\"\";"), Expr::Constant(Constant::String("hi".to_string())));
    assert_eq!(single_expression("-__PI__;"), Expr::Constant(Constant::Pi(-std::f64::consts::PI)));
    assert_eq!(single_expression("__E__;"), Expr::Constant(Constant::E(std::f64::consts::E)));
}

#[test]
fn semantic_pass_registers_functions() {
    let tokens = tokenize("f(); function f() { print(1); }").unwrap();
    let mut state = ProgramState::default();

    let main = parse_semantic(&tokens, &mut state).unwrap();

    assert_eq!(main.program.0.len(), 2);
    assert_eq!(main.program.0[1], StatementFull::FunctionDeclaration { name: "f".to_string() });

    let function = state.function("f").expect("Declared while parsing");
    assert_eq!(function.body.0, vec![StatementFull::Terminated(Statement::Print(Some(*int(1))))]);
}

#[test]
fn syntax_pass_leaves_state_alone() {
    let tokens = tokenize("function f() { print(1); }").unwrap();
    let mut state = ProgramState::default();

    parse_syntax(&tokens, &mut state).unwrap();

    assert!(state.function("f").is_none());
}

#[test]
fn redeclaration_follows_policy() {
    let tokens = tokenize("function f() { print(1); } function f() { print(2); }").unwrap();

    let mut state = ProgramState::new(RedeclarationPolicy::Overwrite);
    parse_semantic(&tokens, &mut state).unwrap();
    assert_eq!(state.function("f").unwrap().body.0, vec![StatementFull::Terminated(Statement::Print(Some(*int(2))))]);

    let mut state = ProgramState::new(RedeclarationPolicy::Reject);
    let err = parse_semantic(&tokens, &mut state).unwrap_err();
    assert!(matches!(err, ParseError::FunctionRedeclared { name } if name == "f"));
}

#[test]
fn syntax_tree_mirrors_the_derivation() {
    let tree = syntax("print(x);");

    let expected = Node::with_children(
        "main",
        vec![Node::with_children(
            "program",
            vec![Node::with_children(
                "statement_full",
                vec![
                    Node::with_children(
                        "statement",
                        vec![
                            Node::new("PRINT"),
                            Node::new("("),
                            Node::with_children("expression", vec![Node::leaf("IDENTIFIER", "x")]),
                            Node::new(")"),
                        ],
                    ),
                    Node::new(";"),
                ],
            )],
        )],
    );

    assert_eq!(tree, expected);
}

#[test]
fn syntax_tree_chains_statements_to_the_right() {
    let tree = syntax("1; 2; 3;");

    let program = tree.child("program").unwrap();
    assert_eq!(program.children.len(), 2);
    assert_eq!(program.children[0].label, "statement_full");

    let rest = program.child("program").unwrap();
    assert_eq!(rest.children.len(), 2);

    let last = rest.child("program").unwrap();
    assert_eq!(last.children.len(), 1);
    assert_eq!(last.children[0].label, "statement_full");
}

#[test]
fn syntax_tree_labels_constants() {
    let tree = syntax("2.5;");

    let expression = tree.child("program").unwrap().children[0].child("statement").unwrap().child("expression").unwrap();

    assert_eq!(*expression, Node::with_children("expression", vec![Node::with_children("const", vec![Node::leaf("FLOAT", "2.5")])]));
}

#[test]
fn engine_mode_is_fixed_at_construction() {
    let tokens = tokenize("1;").unwrap();
    let mut state = ProgramState::default();

    let engine = GrammarEngine::new(Mode::Syntax);
    assert_eq!(engine.mode(), Mode::Syntax);
    assert!(matches!(engine.parse(&tokens, &mut state), Ok(ParseOutput::Syntax(_))));

    let engine = GrammarEngine::new(Mode::Semantic);
    assert!(matches!(engine.parse(&tokens, &mut state), Ok(ParseOutput::Semantic(_))));
}

#[test]
fn syntax_errors_carry_the_offending_token() {
    let tokens = tokenize("let = 5;").unwrap();

    let err = parse_semantic(&tokens, &mut ProgramState::default()).unwrap_err();

    let ParseError::UnexpectedToken { token, expected } = err else { panic!("Expected UnexpectedToken, found {err:?}") };
    assert_eq!(token.kind, TokenKind::Assign);
    assert!(expected.contains(&TokenKind::Identifier));
}

#[test]
fn missing_tokens_at_the_end() {
    let tokens = tokenize("print(1)").unwrap();

    let err = parse_syntax(&tokens, &mut ProgramState::default()).unwrap_err();

    let ParseError::UnexpectedEndOfInput { expected } = err else { panic!("Expected end of input, found {err:?}") };
    assert_eq!(expected.into_iter().collect::<Vec<_>>(), vec![TokenKind::Semicolon]);

    assert!(matches!(parse_syntax(&[], &mut ProgramState::default()), Err(ParseError::UnexpectedEndOfInput { .. })));
}

#[test]
fn if_needs_braces_and_else_is_optional() {
    assert!(tokenize("if (true) print(1);").map(|tokens| parse_syntax(&tokens, &mut ProgramState::default()).is_err()).unwrap());

    let main = semantic("if (true) { 1; }");
    assert!(matches!(&main.program.0[0], StatementFull::If { else_body: None, .. }));

    let main = semantic("if (true) { 1; } else { 2; }");
    assert!(matches!(&main.program.0[0], StatementFull::If { else_body: Some(_), .. }));
}

#[test]
fn bad_boolean_lexemes_are_rejected() {
    let tokens = vec![Token::new(TokenKind::Boolean, "yes"), Token::new(TokenKind::Semicolon, ";")];

    let err = parse_semantic(&tokens, &mut ProgramState::default()).unwrap_err();

    assert!(matches!(err, ParseError::BooleanLiteral { lexeme } if lexeme == "yes"));
}

#[test]
fn precedence_ladder_levels() {
    assert!(precedence_of(TokenKind::Mul).level > precedence_of(TokenKind::Sum).level);
    assert!(precedence_of(TokenKind::Sum).level > precedence_of(TokenKind::Less).level);
    assert!(precedence_of(TokenKind::Less).level > precedence_of(TokenKind::Not).level);
    assert!(precedence_of(TokenKind::Not).level > precedence_of(TokenKind::And).level);
    assert_eq!(precedence_of(TokenKind::And), precedence_of(TokenKind::Or));
    assert_eq!(precedence_of(TokenKind::Identifier), Precedence::NONE);
    assert_eq!(precedence_of(TokenKind::Div).associativity, Associativity::Left);
}
