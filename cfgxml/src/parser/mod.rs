//! Recursive descent parser with eager evaluation
//!
//! ```text
//! Program     := { Assignment } EOF
//! Assignment  := Name Assign Value Semicolon
//! Value       := Number
//!              | Name
//!              | LParen LBracket DictBody RBracket RParen
//!              | LParen ExprBody RParen
//! DictBody    := { Name Colon Value [Comma] }
//! ExprBody    := (Op | Func) { Value }
//! ```
//!
//! Values are evaluated while they are parsed: a name reference copies the
//! current binding and an expression is reduced to a number at its `)`.

mod eval;


pub use eval::{Arity, Operator, evaluate};

use crate::error::{ConfigError, Result};
use crate::lexer::{Token, TokenKind};
use crate::span::Span;
use crate::util::with_stack;
use crate::value::{Environment, Mapping, Value};

/// Parse tokens into the final environment
pub fn parse(tokens: Vec<Token>) -> Result<Environment> {
    Parser::new(tokens).parse_program()
}

/// Parser state: token cursor plus the bindings defined so far
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    env: Environment,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            env: Environment::new(),
        }
    }

    /// Parse every assignment until the tokens run out
    pub fn parse_program(mut self) -> Result<Environment> {
        while self.peek().is_some() {
            self.parse_assignment()?;
        }
        Ok(self.env)
    }

    fn parse_assignment(&mut self) -> Result<()> {
        let name = self.expect(TokenKind::Name)?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_value()?;
        self.expect(TokenKind::Semicolon)?;
        // The name only becomes visible now, so `a := a;` is rejected
        self.env.define(name.text, value);
        Ok(())
    }

    /// Parse a value with automatic stack growth for deep nesting
    fn parse_value(&mut self) -> Result<Value> {
        with_stack(|| self.parse_value_inner())
    }

    fn parse_value_inner(&mut self) -> Result<Value> {
        let kind = match self.peek() {
            Some(token) => token.kind,
            None => return Err(self.unexpected("a value")),
        };

        match kind {
            TokenKind::Number => {
                let token = self.advance();
                let n = token.text.parse::<f64>().map_err(|_| {
                    ConfigError::syntax(format!("invalid number `{}`", token.text), token.span)
                })?;
                Ok(Value::Number(n))
            }
            TokenKind::Name => {
                let token = self.advance();
                self.resolve(&token)
            }
            TokenKind::LParen => {
                if self.peek_nth(1).is_some_and(|next| next.is(TokenKind::LBracket)) {
                    self.parse_dict()
                } else {
                    self.parse_expr()
                }
            }
            _ => Err(self.unexpected("a value")),
        }
    }

    fn resolve(&self, token: &Token) -> Result<Value> {
        match self.env.get(&token.text) {
            Some(value) => Ok(value.clone()),
            None => Err(ConfigError::undefined_name(
                token.text.clone(),
                self.env.suggest(&token.text),
                token.span,
            )),
        }
    }

    /// `( [ key: value, ... ] )`
    fn parse_dict(&mut self) -> Result<Value> {
        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::LBracket)?;

        let mut map = Mapping::new();
        while !self.check(TokenKind::RBracket) {
            if self.peek().is_none() {
                return Err(self.unexpected("`]`"));
            }
            let key = self.expect(TokenKind::Name)?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_value()?;
            // Duplicate keys: the later value wins, the first position is kept
            map.insert(key.text, value);
            if self.check(TokenKind::Comma) {
                self.advance();
            }
        }

        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::RParen)?;
        Ok(Value::Mapping(map))
    }

    /// `( op value... )`, evaluated immediately
    fn parse_expr(&mut self) -> Result<Value> {
        let open = self.expect(TokenKind::LParen)?;

        if !self.check(TokenKind::Op) && !self.check(TokenKind::Func) {
            return Err(self.unexpected("an operator or function"));
        }
        let token = self.advance();
        let op = Operator::from_token(&token).ok_or_else(|| {
            ConfigError::syntax(format!("unknown operation `{}`", token.text), token.span)
        })?;

        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) {
            if self.peek().is_none() {
                return Err(self.unexpected("`)`"));
            }
            let start = self.current_span();
            match self.parse_value()? {
                Value::Number(n) => args.push(n),
                Value::Mapping(_) => {
                    let span = start.merge(self.previous_span());
                    return Err(ConfigError::syntax(
                        format!("`{op}` expects numbers, found a dictionary"),
                        span,
                    ));
                }
            }
        }

        let close = self.expect(TokenKind::RParen)?;
        let n = evaluate(op, &args, open.span.merge(close.span))?;
        Ok(Value::Number(n))
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|tok| tok.is(kind))
    }

    /// Take the current token. Callers check `peek` first.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ConfigError {
        match self.peek() {
            Some(token) => ConfigError::syntax(
                format!("expected {expected}, found {}", token.describe()),
                token.span,
            ),
            None => ConfigError::syntax(
                format!("expected {expected}, found end of input"),
                self.end_span(),
            ),
        }
    }

    fn current_span(&self) -> Span {
        self.peek().map_or_else(|| self.end_span(), |tok| tok.span)
    }

    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::new(0, 0), |tok| tok.span)
    }

    /// Zero-width span just past the last token
    fn end_span(&self) -> Span {
        let end = self.tokens.last().map_or(0, |tok| tok.span.end);
        Span::new(end, end)
    }
}
