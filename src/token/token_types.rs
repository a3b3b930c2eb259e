//! Defines data structures related to [`Tokens`](Token)

use std::cmp::{max, min};
use std::fmt::Display;

/// Represents a single token in a program.
///
/// The grammar engine only looks at `kind`; `lexeme` is carried through to the syntax tree and to the
/// literal constructors, and `span` is used for error messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The lexical category of the token.
    pub kind: TokenKind,

    /// The exact source text of the token. For string literals this still includes the quotes, and for
    /// signed literals it includes the leading `-`.
    pub lexeme: String,

    /// Represents the span of the token, i.e. where in the source file it came from.
    pub span: Span,
}

impl Token {
    /// Builds a token with an empty span. Useful for token streams that did not come from source text.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Token {
        Token { kind, lexeme: lexeme.into(), span: Span::default() }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' ({}) at {}", self.lexeme, self.kind, self.span)
    }
}

/// Every kind of token the grammar knows about.
///
/// The order controls the order in which the elements are displayed in some error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Constants
    String,
    Integer,
    Float,
    Boolean,
    Pi,
    E,

    // Builtins and console I/O
    Print,
    Absolute,
    Sin,
    Cos,
    Tan,
    Power,
    ConsoleInput,

    // Punctuation
    LeftParenthesis,
    RightParenthesis,
    Semicolon,
    Comma,
    LeftCurlyBrace,
    RightCurlyBrace,

    // Keywords
    Let,
    And,
    Or,
    Not,
    If,
    Else,
    Function,

    // Operators
    Assign,
    DoubleEquals,
    NotEquals,
    GreaterEquals,
    Greater,
    Less,
    LessEquals,
    Sum,
    Sub,
    Mul,
    Div,

    Identifier,
}

impl TokenKind {
    /// The label used for this kind of token in syntax and trace trees.
    pub fn label(self) -> &'static str {
        #[allow(clippy::enum_glob_use)]
        use TokenKind::*;

        match self {
            String => "STRING",
            Integer => "INTEGER",
            Float => "FLOAT",
            Boolean => "BOOLEAN",
            Pi => "PI",
            E => "E",
            Print => "PRINT",
            Absolute => "ABSOLUTE",
            Sin => "SIN",
            Cos => "COS",
            Tan => "TAN",
            Power => "POWER",
            ConsoleInput => "CONSOLE_INPUT",
            LeftParenthesis => "(",
            RightParenthesis => ")",
            Semicolon => ";",
            Comma => ",",
            LeftCurlyBrace => "{",
            RightCurlyBrace => "}",
            Let => "LET",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            If => "IF",
            Else => "ELSE",
            Function => "FUNCTION",
            Assign => "=",
            DoubleEquals => "==",
            NotEquals => "!=",
            GreaterEquals => ">=",
            Greater => ">",
            Less => "<",
            LessEquals => "<=",
            Sum => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Identifier => "IDENTIFIER",
        }
    }

    /// Whether the token's lexeme is meaningful on its own (names and literals), as opposed to tokens
    /// that are fully described by their kind.
    pub fn carries_lexeme(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::String
                | TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Boolean
                | TokenKind::Pi
                | TokenKind::E
        )
    }

    /// Whether a token of this kind can be the last token of an operand. Used by the tokenizer to decide
    /// whether a `-` is a sign or a subtraction.
    pub fn ends_operand(self) -> bool {
        self.carries_lexeme() || self == TokenKind::RightParenthesis
    }

    /// Looks up the keyword (or keyword-like constant) a whole word stands for.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        Some(match word {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "let" => TokenKind::Let,
            "function" => TokenKind::Function,
            "print" => TokenKind::Print,
            "input" => TokenKind::ConsoleInput,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "abs" => TokenKind::Absolute,
            "sin" => TokenKind::Sin,
            "cos" => TokenKind::Cos,
            "tan" => TokenKind::Tan,
            "pow" => TokenKind::Power,
            "__PI__" => TokenKind::Pi,
            "__E__" => TokenKind::E,
            "true" | "false" | "True" | "False" | "TRUE" | "FALSE" => TokenKind::Boolean,
            _ => None?,
        })
    }

    /// Displays the kind in a user friendly way, for error messages.
    pub fn pretty_string(self) -> &'static str {
        match self {
            TokenKind::Identifier => "an identifier",
            TokenKind::String => "a string literal",
            TokenKind::Integer | TokenKind::Float => "a numeric literal",
            TokenKind::Boolean => "a boolean literal",
            _ => self.label(),
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/* Spans */

/// A `Span` descibes a contigous group of characters in the source text.
///
/// The span is given as a half open interval, though it may be represented differently
/// in error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    /// The line the span starts on (1 based).
    pub start_line: usize,
    /// The line the span ends on (1 based).
    pub end_line: usize,
    /// The column the span starts on (1 based).
    pub start_col: usize,
    /// The column the span ends on (1 based).
    pub end_col: usize,
}

impl Span {
    /// Given two spans, returns a new span that includes both.
    pub fn combine(a: &Span, b: &Span) -> Span {
        let (start_line, start_col) = min((a.start_line, a.start_col), (b.start_line, b.start_col));
        let (end_line, end_col) = max((a.end_line, a.end_col), (b.end_line, b.end_col));

        Span { start_line, end_line, start_col, end_col }
    }

    /// Given a nonempty slice of Spans, returns a new Span that includes them all.
    pub fn combine_all(spans: &[Span]) -> Span {
        assert!(!spans.is_empty());

        let mut final_span = spans[0].clone();

        for span in &spans[1..] {
            final_span = Span::combine(&final_span, span);
        }

        final_span
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}
