//! Character-level lexer for Kaleido source text.
//!
//! The lexer is a single pass with one character of lookahead. It is
//! total: every input character is consumed by some rule, so lexing
//! never fails and always yields a complete token sequence. Anything
//! that is not whitespace, an identifier, a number, or a comment comes
//! out as a one-character [`Token::Notation`].

use crate::stream::Lookahead;

/// Atomic lexical unit. Equality is structural.
///
/// `Eof` is never materialized in the sequence returned by [`lex`];
/// the parser synthesizes it when its token stream runs dry.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Eof,
    Def,
    Extern,
    Identifier(String),
    Number(f64),
    Notation(char),
}

/// Lex a source string into tokens.
///
/// Pure function of its input: re-invoking on the same text yields an
/// identical sequence.
pub fn lex(source: &str) -> Vec<Token> {
    let mut stream = Lookahead::new(source.chars());
    let mut tokens = Vec::new();

    while let Some(&next) = stream.peek() {
        if next.is_whitespace() {
            stream.next();
        } else if next.is_alphabetic() {
            tokens.push(lex_identifier(&mut stream));
        } else if next.is_ascii_digit() || next == '.' {
            tokens.push(lex_number(&mut stream));
        } else if next == '#' {
            skip_comment(&mut stream);
        } else {
            stream.next();
            tokens.push(Token::Notation(next));
        }
    }

    tokens
}

/// Identifier: a letter followed by letters or digits. The completed
/// buffer is checked against the keywords exactly, so `"define"` stays
/// a plain identifier.
fn lex_identifier(stream: &mut Lookahead<std::str::Chars<'_>>) -> Token {
    let mut buffer = String::new();
    while let Some(&c) = stream.peek() {
        if c.is_alphanumeric() {
            buffer.push(c);
            stream.next();
        } else {
            break;
        }
    }

    match buffer.as_str() {
        "def" => Token::Def,
        "extern" => Token::Extern,
        _ => Token::Identifier(buffer),
    }
}

/// Number: digits with at most one `.`. A second `.` terminates the
/// number and is left for the catch-all rule, so `"1.2.3"` lexes as
/// `1.2`, `.`, `3`.
fn lex_number(stream: &mut Lookahead<std::str::Chars<'_>>) -> Token {
    let mut buffer = String::new();
    let mut has_dot = false;
    while let Some(&c) = stream.peek() {
        if c.is_ascii_digit() || (!has_dot && c == '.') {
            if c == '.' {
                has_dot = true;
            }
            buffer.push(c);
            stream.next();
        } else {
            break;
        }
    }

    match buffer.parse() {
        Ok(value) => Token::Number(value),
        // A lone '.' accumulates no digits and is not a number.
        Err(_) => Token::Notation('.'),
    }
}

/// Comment: `#` through end of line, exclusive of the terminator.
fn skip_comment(stream: &mut Lookahead<std::str::Chars<'_>>) {
    while let Some(&c) = stream.peek() {
        if c == '\r' || c == '\n' {
            break;
        }
        stream.next();
    }
}
