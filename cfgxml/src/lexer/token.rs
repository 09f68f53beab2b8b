//! Token definitions

use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// Token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// `42`, `-1.5`, `.5`, `3e8`
    Number,
    /// `:=`
    Assign,
    /// `abs`, `min` (reserved, never a name)
    Func,
    /// Lowercase ASCII identifier
    Name,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Semicolon,
    /// `+` or `-`
    Op,
}

impl TokenKind {
    /// Human-readable description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Assign => "`:=`",
            TokenKind::Func => "function",
            TokenKind::Name => "name",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Op => "operator",
        }
    }

    /// Whether tokens of this kind always have the same text
    pub fn is_punctuation(&self) -> bool {
        !matches!(
            self,
            TokenKind::Number | TokenKind::Func | TokenKind::Name | TokenKind::Op
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexed token: kind, literal text and source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Description including the literal, e.g. "function `abs`"
    pub fn describe(&self) -> String {
        if self.kind.is_punctuation() {
            self.kind.describe().to_string()
        } else {
            format!("{} `{}`", self.kind.describe(), self.text)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
