//! Provides the tokenization algorithm.

use super::token_types::{Span, Token, TokenKind};

use crate::error::TokenError;

use std::iter::Peekable;

/* The Algorithm. */

/// Tokenizes input, converting a string to a list of tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenError> {
    let mut tokens: Vec<Token> = vec![];

    let mut iter = add_span_info(input).peekable();
    while let Some((ch, span)) = iter.peek() {
        let (ch, span) = (*ch, span.clone());

        if ch == '"' || ch == '\'' {
            tokens.push(take_string_literal(&mut iter)?);
        } else if ch == '/' {
            let (_, slash_span) = iter.next().expect("Known to exist");

            if matches!(iter.peek(), Some(('/', _))) {
                discard_comment(&mut iter);
            } else {
                tokens.push(Token { kind: TokenKind::Div, lexeme: "/".to_string(), span: slash_span });
            }
        } else if ch == '-' {
            let signed = !tokens.last().is_some_and(|token| token.kind.ends_operand());
            tokens.extend(take_minus(&mut iter, signed)?);
        } else if is_operator_char(ch) {
            tokens.push(take_operator(&mut iter)?);
        } else if ch.is_ascii_digit() {
            tokens.push(take_numeric_literal(&mut iter, None)?);
        } else if let Some(kind) = punctuation(ch) {
            let (ch, span) = iter.next().expect("Known to exist");
            tokens.push(Token { kind, lexeme: ch.to_string(), span });
        } else if is_identifier_char(ch) {
            let (word, span) = take_word(&mut iter)?;
            tokens.push(classify_word(word, span));
        } else if ch.is_whitespace() {
            iter.next().expect("Known");
        } else {
            return Err(TokenError::ProblemAtSpan(format!("Cannot start token with '{ch}'."), span));
        }
    }

    Ok(tokens)
}

/* Consruction and Manipulation of the (char, Span) iterator. */

/// Attaches span information to an input string.
///
/// Given a input string, produces an iterator which yields the characters of the string, along with
/// the span representing those characters. During the tokenization process, these spans are combined
/// to produce the spans for the tokens.
fn add_span_info(input: &str) -> impl Iterator<Item = (char, Span)> + '_ {
    let mut line_num = 1;
    let mut col_num = 1;

    input.chars().map(move |ch| {
        let ret_val =
            (ch, Span { start_line: line_num, end_line: line_num, start_col: col_num, end_col: col_num + 1 });

        col_num += 1;

        if ch == '\n' {
            line_num += 1;
            col_num = 1;
        }

        ret_val
    })
}

/// Given an iterator from `tokenize()`, extracts a string literal token.
///
/// Single, double, and triple-double quoted literals are accepted. The lexeme keeps its quotes; they
/// are stripped when the literal becomes a constant.
fn take_string_literal(iter: &mut Peekable<impl Iterator<Item = (char, Span)>>) -> Result<Token, TokenError> {
    let (quote, first_span) = iter.next().ok_or("Expected character, found nothing")?;
    if quote != '"' && quote != '\'' {
        return Err("Expected a quote character.".into());
    }

    let mut lexeme = String::from(quote);
    let mut spans = vec![first_span];

    let mut delimiter = quote.to_string();
    if quote == '"' && matches!(iter.peek(), Some(('"', _))) {
        let (ch, span) = iter.next().expect("Known to exist");
        lexeme.push(ch);
        spans.push(span);

        if !matches!(iter.peek(), Some(('"', _))) {
            // Just `""`, the empty string.
            return Ok(Token { kind: TokenKind::String, lexeme, span: Span::combine_all(&spans) });
        }

        let (ch, span) = iter.next().expect("Known to exist");
        lexeme.push(ch);
        spans.push(span);
        delimiter = "\"\"\"".to_string();
    }

    for (ch, ch_span) in iter.by_ref() {
        lexeme.push(ch);
        spans.push(ch_span);

        if lexeme.len() >= 2 * delimiter.len() && lexeme.ends_with(&delimiter) {
            return Ok(Token { kind: TokenKind::String, lexeme, span: Span::combine_all(&spans) });
        }
    }

    Err(TokenError::ProblemAtSpan(
        format!("Expected {delimiter}. String literal does not terminate."),
        Span::combine_all(&spans),
    ))
}

/// Given an iterator from `tokenize()`, extracts a numeric literal token.
///
/// `sign` carries the span of an already consumed `-` for signed literals.
fn take_numeric_literal(
    iter: &mut Peekable<impl Iterator<Item = (char, Span)>>,
    sign: Option<Span>,
) -> Result<Token, TokenError> {
    if !matches!(iter.peek(), Some((ch, _)) if ch.is_ascii_digit()) {
        return Err("Expected Digit.".into());
    }

    let mut lexeme = String::new();
    let mut spans = vec![];
    if let Some(span) = sign {
        lexeme.push('-');
        spans.push(span);
    }

    take_digits(iter, &mut lexeme, &mut spans);

    let mut kind = TokenKind::Integer;
    if let Some(('.', _)) = iter.peek() {
        let (ch, span) = iter.next().expect("Known to exist");
        lexeme.push(ch);
        spans.push(span.clone());

        if !matches!(iter.peek(), Some((ch, _)) if ch.is_ascii_digit()) {
            return Err(TokenError::ProblemAtSpan("Expected digit after '.'.".to_string(), span));
        }

        take_digits(iter, &mut lexeme, &mut spans);
        kind = TokenKind::Float;
    }

    Ok(Token { kind, lexeme, span: Span::combine_all(&spans) })
}

fn take_digits(iter: &mut Peekable<impl Iterator<Item = (char, Span)>>, lexeme: &mut String, spans: &mut Vec<Span>) {
    while let Some((ch, _)) = iter.peek() {
        if ch.is_ascii_digit() {
            let (ch, ch_span) = iter.next().expect("Known to exist");
            lexeme.push(ch);
            spans.push(ch_span);
        } else {
            break;
        }
    }
}

/// Given an iterator from `tokenize()`, extracts a whole word (identifier characters).
///
/// Caller should be sure that a word appears at the front of the iterator, for example by peeking
/// the iterator.
fn take_word(iter: &mut Peekable<impl Iterator<Item = (char, Span)>>) -> Result<(String, Span), TokenError> {
    if !matches!(iter.peek(), Some((ch, _)) if is_identifier_char(*ch)) {
        return Err("Expected Identifier character.".into());
    }

    let mut word = String::new();
    let mut span: Option<Span> = None;
    while let Some((ch, _)) = iter.peek() {
        if is_identifier_char(*ch) {
            let (ch, ch_span) = iter.next().expect("Known to exist");

            word.push(ch);
            span = match span {
                Some(old) => Some(Span::combine(&old, &ch_span)),
                None => Some(ch_span),
            }
        } else {
            break;
        }
    }

    Ok((word, span.expect("Known to exist")))
}

/// Keywords may not be used as identifiers, and since whole words are compared, a keyword never matches
/// inside a longer identifier (`printer` is an identifier, not `print` followed by `er`).
fn classify_word(word: String, span: Span) -> Token {
    let kind = TokenKind::keyword(&word).unwrap_or(TokenKind::Identifier);

    Token { kind, lexeme: word, span }
}

/// Handles a `-`. When `signed` is set and a numeric literal or `__PI__`/`__E__` follows immediately,
/// the sign is folded into that literal. Otherwise it is the subtraction operator.
fn take_minus(
    iter: &mut Peekable<impl Iterator<Item = (char, Span)>>,
    signed: bool,
) -> Result<Vec<Token>, TokenError> {
    let (_, minus_span) = iter.next().ok_or("Expected character, found nothing")?;
    let subtraction = Token { kind: TokenKind::Sub, lexeme: "-".to_string(), span: minus_span.clone() };

    if !signed {
        return Ok(vec![subtraction]);
    }

    match iter.peek() {
        Some((ch, _)) if ch.is_ascii_digit() => Ok(vec![take_numeric_literal(iter, Some(minus_span))?]),
        Some(('_', _)) => {
            let (word, span) = take_word(iter)?;
            match TokenKind::keyword(&word) {
                Some(kind @ (TokenKind::Pi | TokenKind::E)) => {
                    Ok(vec![Token { kind, lexeme: format!("-{word}"), span: Span::combine(&minus_span, &span) }])
                }
                _ => Ok(vec![subtraction, classify_word(word, span)]),
            }
        }
        _ => Ok(vec![subtraction]),
    }
}

/// Extracts a single operator, preferring the two character form (`==`, `!=`, `>=`, `<=`) when present.
fn take_operator(iter: &mut Peekable<impl Iterator<Item = (char, Span)>>) -> Result<Token, TokenError> {
    let (first, first_span) = iter.next().ok_or("Expected character, found nothing")?;

    if matches!(first, '=' | '!' | '<' | '>') && matches!(iter.peek(), Some(('=', _))) {
        let (_, second_span) = iter.next().expect("Known to exist");
        let kind = match first {
            '=' => TokenKind::DoubleEquals,
            '!' => TokenKind::NotEquals,
            '<' => TokenKind::LessEquals,
            _ => TokenKind::GreaterEquals,
        };

        return Ok(Token { kind, lexeme: format!("{first}="), span: Span::combine(&first_span, &second_span) });
    }

    let kind = match first {
        '=' => TokenKind::Assign,
        '<' => TokenKind::Less,
        '>' => TokenKind::Greater,
        '+' => TokenKind::Sum,
        '*' => TokenKind::Mul,
        _ => return Err(TokenError::ProblemAtSpan(format!("Could not read operator '{first}'."), first_span)),
    };

    Ok(Token { kind, lexeme: first.to_string(), span: first_span })
}

/// Consumes a `//` comment up to (and including) the end of the line.
fn discard_comment(iter: &mut impl Iterator<Item = (char, Span)>) {
    for (ch, _) in iter.by_ref() {
        if ch == '\n' {
            break;
        }
    }
}

/* Helpers that classify certain kinds of characters. */

/// Helper function that determines if a character may start an operator. `-` and `/` are handled
/// separately, since they may also start a signed literal or a comment.
fn is_operator_char(ch: char) -> bool {
    let operators = ['+', '*', '=', '>', '<', '!'];

    operators.contains(&ch)
}

/// All punctuation is a single character that cannot be part of another token.
fn punctuation(ch: char) -> Option<TokenKind> {
    Some(match ch {
        '(' => TokenKind::LeftParenthesis,
        ')' => TokenKind::RightParenthesis,
        '{' => TokenKind::LeftCurlyBrace,
        '}' => TokenKind::RightCurlyBrace,
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        _ => None?,
    })
}

/// Helper function that determines if a character might be part of an identifier.
///
/// Note: While digits are permitted in identifiers, they cannot begin them, because
/// this triggers the numeric literal parsing instead.
fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch.is_ascii_digit() || ch == '_'
}
