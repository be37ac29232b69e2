// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WKT Tokenizer
//!
//! Scans raw WKT text into a flat token sequence using nom for the
//! number and identifier recognizers. The tokenizer has no grammar
//! knowledge; splitting fused identifiers like `POINTZ` into keyword
//! plus dimension suffix is the parser's job.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

use crate::error::{Error, Result};

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Letter run: geometry keywords and dimension suffixes.
    Identifier,
    /// Signed decimal or scientific-notation literal.
    Number,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// The literal `EMPTY` (case-insensitive), classified at lex time.
    Empty,
}

/// A classified lexical unit. Immutable once produced; `text` borrows
/// the input so diagnostics can quote the source verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token's first character in the input.
    pub offset: usize,
}

/// Recognize a maximal run of ASCII letters.
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic())(input)
}

/// Recognize a signed decimal/scientific number literal.
/// Admits `1`, `-1.5`, `+.25`, `1.`, `6.02e23`, `1E-10`.
fn number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '+' || c == '.'
}

/// Tokenize a full WKT input buffer.
///
/// Pure function of the input text: returns the complete token sequence
/// or the first unrecognized character as [`Error::Lex`].
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start_matches(is_whitespace);

    while let Some(c) = rest.chars().next() {
        let offset = input.len() - rest.len();
        let lex_error = Error::Lex {
            character: c,
            offset,
        };

        let (next, token) = match c {
            '(' => (&rest[1..], Token { kind: TokenKind::LeftParen, text: &rest[..1], offset }),
            ')' => (&rest[1..], Token { kind: TokenKind::RightParen, text: &rest[..1], offset }),
            ',' => (&rest[1..], Token { kind: TokenKind::Comma, text: &rest[..1], offset }),
            c if c.is_ascii_alphabetic() => {
                let (next, text) = identifier(rest).map_err(|_| lex_error)?;
                let kind = if text.eq_ignore_ascii_case("EMPTY") {
                    TokenKind::Empty
                } else {
                    TokenKind::Identifier
                };
                (next, Token { kind, text, offset })
            }
            c if is_number_start(c) => {
                // A sign or dot with no digits behind it is not a number.
                let (next, text) = number(rest).map_err(|_| lex_error)?;
                (next, Token { kind: TokenKind::Number, text, offset })
            }
            _ => return Err(lex_error),
        };

        tokens.push(token);
        rest = next.trim_start_matches(is_whitespace);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_and_identifier() {
        assert_eq!(
            kinds("POINT (19 23)"),
            vec![
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::RightParen,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        for text in ["42", "-42", "+7", "3.14", "-3.14", ".5", "1.", "6.02e23", "1.5E-10"] {
            let tokens = tokenize(text).unwrap();
            assert_eq!(tokens.len(), 1, "input {:?}", text);
            assert_eq!(tokens[0].kind, TokenKind::Number);
            assert_eq!(tokens[0].text, text);
        }
    }

    #[test]
    fn test_empty_keyword_case_insensitive() {
        for text in ["EMPTY", "empty", "Empty"] {
            let tokens = tokenize(text).unwrap();
            assert_eq!(tokens[0].kind, TokenKind::Empty);
            assert_eq!(tokens[0].text, text);
        }
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("  POINT\t(1,\n2)").unwrap();
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![2, 8, 9, 10, 12, 13]);
    }

    #[test]
    fn test_lex_error() {
        let err = tokenize("POINT [1 2]").unwrap_err();
        assert_eq!(
            err,
            Error::Lex {
                character: '[',
                offset: 6
            }
        );
    }

    #[test]
    fn test_bare_sign_is_lex_error() {
        let err = tokenize("POINT (- 2)").unwrap_err();
        assert_eq!(
            err,
            Error::Lex {
                character: '-',
                offset: 7
            }
        );
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize(" \t\r\n").unwrap().is_empty());
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_fused_suffix_is_single_identifier() {
        let tokens = tokenize("POINTZM(1 2 3 4)").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "POINTZM");
    }
}
