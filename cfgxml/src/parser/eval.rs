//! Eager evaluation of prefix expressions
//!
//! Expressions are reduced to numbers as soon as their closing `)` is
//! parsed, so no expression tree outlives the parser.

use crate::error::{ConfigError, Result};
use crate::lexer::{Token, TokenKind};
use crate::span::Span;
use std::fmt;

/// Operator or function heading an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`: sum of all arguments
    Add,
    /// `-`: first argument minus the sum of the rest
    Sub,
    /// `abs`: absolute value of exactly one argument
    Abs,
    /// `min`: smallest argument
    Min,
}

/// Accepted argument count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n} argument{}", plural(*n)),
            Arity::AtLeast(n) => write!(f, "at least {n} argument{}", plural(*n)),
        }
    }
}

impl Operator {
    /// Resolve an `Op` or `Func` token
    pub fn from_token(token: &Token) -> Option<Self> {
        match (token.kind, token.text.as_str()) {
            (TokenKind::Op, "+") => Some(Operator::Add),
            (TokenKind::Op, "-") => Some(Operator::Sub),
            (TokenKind::Func, "abs") => Some(Operator::Abs),
            (TokenKind::Func, "min") => Some(Operator::Min),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Abs => "abs",
            Operator::Min => "min",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::Abs => Arity::Exactly(1),
            Operator::Add | Operator::Sub | Operator::Min => Arity::AtLeast(1),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Apply `op` to already evaluated arguments.
///
/// `span` covers the whole parenthesized expression and is used for
/// arity errors.
pub fn evaluate(op: Operator, args: &[f64], span: Span) -> Result<f64> {
    let arity = op.arity();
    if !arity.accepts(args.len()) {
        return Err(ConfigError::syntax(
            format!("`{op}` expects {arity}, got {}", args.len()),
            span,
        ));
    }

    let result: f64 = match op {
        Operator::Add => args.iter().sum(),
        // A single argument is returned unchanged, not negated
        Operator::Sub => args[0] - args[1..].iter().sum::<f64>(),
        Operator::Abs => args[0].abs(),
        // Keep the running minimum unless a later argument compares smaller,
        // so a leading NaN is returned while a later one is skipped
        Operator::Min => args[1..]
            .iter()
            .fold(args[0], |min, &n| if n < min { n } else { min }),
    };
    Ok(result)
}
