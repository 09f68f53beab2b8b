//! Lexer implementation
//!
//! Patterns are tried in a fixed priority order at each position and the
//! first one that matches wins, even when a later pattern would match a
//! longer prefix. This is what makes `abs`/`min` reserved: `Func` is tried
//! before `Name`, so `absolute` lexes as `abs` followed by `olute`.

mod token;

pub use token::{Token, TokenKind};

use crate::error::{ConfigError, Result};
use crate::span::Span;

/// Number of characters shown in a lexical error snippet
const SNIPPET_LEN: usize = 20;

/// How a pattern recognizes a prefix of the remaining input
enum Pattern {
    /// Any of these exact strings, tried in order
    Literals(&'static [&'static str]),
    /// Hand-written scanner returning the matched byte length
    Scanner(fn(&str) -> Option<usize>),
}

impl Pattern {
    fn match_len(&self, rest: &str) -> Option<usize> {
        match self {
            Pattern::Literals(literals) => literals
                .iter()
                .find(|lit| rest.starts_with(**lit))
                .map(|lit| lit.len()),
            Pattern::Scanner(scan) => scan(rest),
        }
    }
}

/// Token patterns in priority order
const PATTERNS: &[(TokenKind, Pattern)] = &[
    (TokenKind::Number, Pattern::Scanner(scan_number)),
    (TokenKind::Assign, Pattern::Literals(&[":="])),
    (TokenKind::Func, Pattern::Literals(&["abs", "min"])),
    (TokenKind::Name, Pattern::Scanner(scan_name)),
    (TokenKind::LParen, Pattern::Literals(&["("])),
    (TokenKind::RParen, Pattern::Literals(&[")"])),
    (TokenKind::LBracket, Pattern::Literals(&["["])),
    (TokenKind::RBracket, Pattern::Literals(&["]"])),
    (TokenKind::Colon, Pattern::Literals(&[":"])),
    (TokenKind::Comma, Pattern::Literals(&[","])),
    (TokenKind::Semicolon, Pattern::Literals(&[";"])),
    (TokenKind::Op, Pattern::Literals(&["+", "-"])),
];

/// Tokenize source text
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(ch) = source[pos..].chars().next() {
        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }

        let rest = &source[pos..];
        let matched = PATTERNS
            .iter()
            .find_map(|(kind, pattern)| pattern.match_len(rest).map(|len| (*kind, len)));

        match matched {
            Some((kind, len)) => {
                let span = Span::new(pos, pos + len);
                tokens.push(Token::new(kind, &rest[..len], span));
                pos += len;
            }
            None => {
                let snippet: String = rest.chars().take(SNIPPET_LEN).collect();
                return Err(ConfigError::lexical(
                    pos,
                    snippet,
                    Span::new(pos, pos + ch.len_utf8()),
                ));
            }
        }
    }

    Ok(tokens)
}

/// Render tokens back to text, separated by single spaces.
/// Re-lexing the result yields the same kind sequence.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|tok| tok.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// `-?(digits.digits* | .digits+ | digits+)([eE][+-]?digits+)?`
fn scan_number(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut len = usize::from(bytes.first() == Some(&b'-'));

    let int_digits = count_digits(&bytes[len..]);
    len += int_digits;
    if int_digits > 0 {
        if bytes.get(len) == Some(&b'.') {
            len += 1;
            len += count_digits(&bytes[len..]);
        }
    } else {
        if bytes.get(len) != Some(&b'.') {
            return None;
        }
        let frac_digits = count_digits(&bytes[len + 1..]);
        if frac_digits == 0 {
            return None;
        }
        len += 1 + frac_digits;
    }

    // The exponent is only taken when it has digits; `1e` is `1` then `e`
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let mut exp = len + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            len = exp + exp_digits;
        }
    }

    Some(len)
}

/// `[a-z]+`
fn scan_name(rest: &str) -> Option<usize> {
    let len = rest.bytes().take_while(|b| b.is_ascii_lowercase()).count();
    (len > 0).then_some(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|tok| tok.kind)
            .collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|tok| tok.text)
            .collect()
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert!(tokenize("  \t\n\r\n  ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_assignment() {
        assert_eq!(
            kinds("port := 8080;"),
            vec![TokenKind::Name, TokenKind::Assign, TokenKind::Number, TokenKind::Semicolon]
        );
    }

    #[test]
    fn test_tokenize_punctuation() {
        assert_eq!(
            kinds("( ) [ ] : , ;"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_tokenize_number_forms() {
        assert_eq!(
            texts("42 -7 3.14 1. .5 -.25 6.022E23 1e-3 2e+8"),
            vec!["42", "-7", "3.14", "1.", ".5", "-.25", "6.022E23", "1e-3", "2e+8"]
        );
        assert!(kinds("42 -7 3.14 1. .5").iter().all(|k| *k == TokenKind::Number));
    }

    #[test]
    fn test_tokenize_exponent_without_digits_is_not_consumed() {
        assert_eq!(texts("1e"), vec!["1", "e"]);
        assert_eq!(kinds("1e"), vec![TokenKind::Number, TokenKind::Name]);
    }

    #[test]
    fn test_tokenize_negative_number_beats_operator() {
        assert_eq!(kinds("-5"), vec![TokenKind::Number]);
        assert_eq!(kinds("- 5"), vec![TokenKind::Op, TokenKind::Number]);
        assert_eq!(kinds("-("), vec![TokenKind::Op, TokenKind::LParen]);
    }

    #[test]
    fn test_tokenize_assign_beats_colon() {
        assert_eq!(kinds(":=:"), vec![TokenKind::Assign, TokenKind::Colon]);
    }

    #[test]
    fn test_tokenize_func_keywords_are_reserved() {
        assert_eq!(kinds("abs min"), vec![TokenKind::Func, TokenKind::Func]);
    }

    #[test]
    fn test_tokenize_func_prefix_splits_name() {
        assert_eq!(texts("absolute"), vec!["abs", "olute"]);
        assert_eq!(kinds("minimum"), vec![TokenKind::Func, TokenKind::Name]);
        // Only a leading keyword is split off
        assert_eq!(kinds("xabs"), vec![TokenKind::Name]);
    }

    #[test]
    fn test_tokenize_names_are_lowercase_only() {
        assert_eq!(texts("width"), vec!["width"]);
        assert!(tokenize("Width").is_err());
        assert!(tokenize("snake_case").is_err());
    }

    #[test]
    fn test_tokenize_adjacent_tokens() {
        assert_eq!(
            kinds("a:=(+1 2);"),
            vec![
                TokenKind::Name,
                TokenKind::Assign,
                TokenKind::LParen,
                TokenKind::Op,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize("ab := 1;").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 5));
        assert_eq!(tokens[2].span, Span::new(6, 7));
        assert_eq!(tokens[3].span, Span::new(7, 8));
    }

    #[test]
    fn test_tokenize_unexpected_character_error() {
        let err = tokenize("a := 1;\nb := #nope;").unwrap_err();
        match err {
            ConfigError::Lexical {
                position,
                snippet,
                span,
            } => {
                assert_eq!(position, 13);
                assert_eq!(snippet, "#nope;");
                assert_eq!(span, Span::new(13, 14));
            }
            other => panic!("expected lexical error, got {other:?}"),
        }
    }

    #[test]
    fn test_tokenize_error_snippet_is_truncated() {
        let source = format!("x := {};", "*".repeat(50));
        match tokenize(&source).unwrap_err() {
            ConfigError::Lexical { snippet, .. } => assert_eq!(snippet.chars().count(), 20),
            other => panic!("expected lexical error, got {other:?}"),
        }
    }

    #[test]
    fn test_tokenize_non_ascii_error() {
        let err = tokenize("é").unwrap_err();
        assert_eq!(err.span(), Some(Span::new(0, 2)));
    }

    #[test]
    fn test_render_tokens_relexes_to_same_kinds() {
        let source = "a:=([x:-1.5,y:(min 4 2e1 .5)]);b:=(-(+a 1)absx);";
        let tokens = tokenize(source).unwrap();
        let rendered = render_tokens(&tokens);
        let relexed = tokenize(&rendered).unwrap();
        let before: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        let after: Vec<_> = relexed.iter().map(|t| t.kind).collect();
        assert_eq!(before, after);
    }
}
