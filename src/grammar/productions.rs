//! The grammar, declared as data.
//!
//! Each [`Production`] names the [`Rule`] whose reduce action builds its output. Several productions may share a
//! rule when the action can tell them apart by their tokens (every binary operator reduces through
//! [`Rule::ExprBinary`]).

use crate::token::TokenKind;

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
    /// The augmented start symbol. Never appears in output trees.
    Start,
    Main,
    Program,
    Block,
    StatementFull,
    Statement,
    Expression,
    Const,
}

impl NonTerminal {
    /// The label used for this symbol in syntax and trace trees.
    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::Start => "start",
            NonTerminal::Main => "main",
            NonTerminal::Program => "program",
            NonTerminal::Block => "block",
            NonTerminal::StatementFull => "statement_full",
            NonTerminal::Statement => "statement",
            NonTerminal::Expression => "expression",
            NonTerminal::Const => "const",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminal),
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(kind) => write!(f, "{kind}"),
            Symbol::NonTerminal(nt) => f.write_str(nt.name()),
        }
    }
}

/// Identifies the construction action of a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Accept,
    MainProgram,
    ProgramSingle,
    ProgramMany,
    BlockSingle,
    BlockMany,
    StatementTerminated,
    If,
    IfElse,
    FunctionDeclaration,
    StatementExpression,
    StatementLet,
    PrintEmpty,
    PrintValue,
    ExprParenthesized,
    ExprNot,
    ExprBinary,
    ExprInputEmpty,
    ExprInputPrompt,
    ExprAbsolute,
    ExprSin,
    ExprCos,
    ExprTan,
    ExprPower,
    ExprVariable,
    ExprCall,
    ExprConst,
    Const,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub rule: Rule,
    pub lhs: NonTerminal,
    pub rhs: Vec<Symbol>,
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :", self.lhs.name())?;

        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }

        Ok(())
    }
}

/// Every production of the language. Index 0 is always the augmented `start : main`.
pub fn productions() -> Vec<Production> {
    use NonTerminal as N;
    use Rule as R;
    use TokenKind as K;

    let t = Symbol::Terminal;
    let n = Symbol::NonTerminal;
    let production = |rule, lhs, rhs: &[Symbol]| Production { rule, lhs, rhs: rhs.to_vec() };

    let mut list = vec![
        production(R::Accept, N::Start, &[n(N::Main)]),
        production(R::MainProgram, N::Main, &[n(N::Program)]),
        production(R::ProgramSingle, N::Program, &[n(N::StatementFull)]),
        production(R::ProgramMany, N::Program, &[n(N::StatementFull), n(N::Program)]),
        production(R::BlockSingle, N::Block, &[n(N::StatementFull)]),
        production(R::BlockMany, N::Block, &[n(N::StatementFull), n(N::Block)]),
        production(R::StatementTerminated, N::StatementFull, &[n(N::Statement), t(K::Semicolon)]),
        production(
            R::If,
            N::StatementFull,
            &[
                t(K::If),
                t(K::LeftParenthesis),
                n(N::Expression),
                t(K::RightParenthesis),
                t(K::LeftCurlyBrace),
                n(N::Block),
                t(K::RightCurlyBrace),
            ],
        ),
        production(
            R::IfElse,
            N::StatementFull,
            &[
                t(K::If),
                t(K::LeftParenthesis),
                n(N::Expression),
                t(K::RightParenthesis),
                t(K::LeftCurlyBrace),
                n(N::Block),
                t(K::RightCurlyBrace),
                t(K::Else),
                t(K::LeftCurlyBrace),
                n(N::Block),
                t(K::RightCurlyBrace),
            ],
        ),
        production(
            R::FunctionDeclaration,
            N::StatementFull,
            &[
                t(K::Function),
                t(K::Identifier),
                t(K::LeftParenthesis),
                t(K::RightParenthesis),
                t(K::LeftCurlyBrace),
                n(N::Block),
                t(K::RightCurlyBrace),
            ],
        ),
        production(R::StatementExpression, N::Statement, &[n(N::Expression)]),
        production(R::StatementLet, N::Statement, &[t(K::Let), t(K::Identifier), t(K::Assign), n(N::Expression)]),
        production(R::PrintEmpty, N::Statement, &[t(K::Print), t(K::LeftParenthesis), t(K::RightParenthesis)]),
        production(
            R::PrintValue,
            N::Statement,
            &[t(K::Print), t(K::LeftParenthesis), n(N::Expression), t(K::RightParenthesis)],
        ),
        production(
            R::ExprParenthesized,
            N::Expression,
            &[t(K::LeftParenthesis), n(N::Expression), t(K::RightParenthesis)],
        ),
        production(R::ExprNot, N::Expression, &[t(K::Not), n(N::Expression)]),
    ];

    let binary_operators = [
        K::Sum,
        K::Sub,
        K::Mul,
        K::Div,
        K::DoubleEquals,
        K::NotEquals,
        K::GreaterEquals,
        K::LessEquals,
        K::Greater,
        K::Less,
        K::And,
        K::Or,
    ];
    for operator in binary_operators {
        list.push(production(R::ExprBinary, N::Expression, &[n(N::Expression), t(operator), n(N::Expression)]));
    }

    let builtins = [(R::ExprAbsolute, K::Absolute), (R::ExprSin, K::Sin), (R::ExprCos, K::Cos), (R::ExprTan, K::Tan)];

    list.extend([
        production(R::ExprInputEmpty, N::Expression, &[t(K::ConsoleInput), t(K::LeftParenthesis), t(K::RightParenthesis)]),
        production(
            R::ExprInputPrompt,
            N::Expression,
            &[t(K::ConsoleInput), t(K::LeftParenthesis), n(N::Expression), t(K::RightParenthesis)],
        ),
    ]);
    for (rule, keyword) in builtins {
        list.push(production(
            rule,
            N::Expression,
            &[t(keyword), t(K::LeftParenthesis), n(N::Expression), t(K::RightParenthesis)],
        ));
    }

    list.extend([
        production(
            R::ExprPower,
            N::Expression,
            &[
                t(K::Power),
                t(K::LeftParenthesis),
                n(N::Expression),
                t(K::Comma),
                n(N::Expression),
                t(K::RightParenthesis),
            ],
        ),
        production(R::ExprVariable, N::Expression, &[t(K::Identifier)]),
        production(R::ExprCall, N::Expression, &[t(K::Identifier), t(K::LeftParenthesis), t(K::RightParenthesis)]),
        production(R::ExprConst, N::Expression, &[n(N::Const)]),
    ]);

    for literal in [K::Float, K::Boolean, K::Integer, K::String, K::Pi, K::E] {
        list.push(production(R::Const, N::Const, &[t(literal)]));
    }

    list
}
