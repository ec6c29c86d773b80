//! Recursive-descent parser for infix expressions.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('-' | '+') unary | power
//! power  := atom (('^' | '**') unary)?
//! atom   := number | ident | ident '(' args ')' | '(' expr ')'
//! ```
//!
//! `pi` is the constant π. `integrate(f, t, a, b)` builds an unevaluated
//! definite integral so that printed expressions parse back.

use std::str::FromStr;

use crate::{Error, Float};

use super::{Expr, Func, Symbol};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Num(Float),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

fn tokenize(src: &str) -> Result<Vec<(usize, Token)>, Error> {
    let bytes = src.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        let start = i;
        let token = match c {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                Token::Caret
            }
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '0'..='9' | '.' => {
                i = scan_number(bytes, i);
                let text = &src[start..i];
                let value = text
                    .parse::<Float>()
                    .map_err(|_| Error::parse(start, format!("invalid number '{}'", text)))?;
                out.push((start, Token::Num(value)));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                out.push((start, Token::Ident(src[start..i].to_string())));
                continue;
            }
            _ => {
                let ch = src[start..].chars().next().unwrap_or(c);
                return Err(Error::parse(start, format!("unexpected character '{}'", ch)));
            }
        };
        out.push((start, token));
        i += 1;
    }
    Ok(out)
}

/// End of the number literal starting at `i`. An exponent is only consumed
/// when digits follow it, so `2e` lexes as `2` then `e`.
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            i = j;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    i
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |(o, _)| *o)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).map(|(_, t)| t.clone());
        self.pos += 1;
        t
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<(), Error> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(Error::parse(self.offset(), format!("expected {}", what)))
        }
    }

    fn expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.term()?;
        loop {
            if self.eat(&Token::Plus) {
                lhs = lhs + self.term()?;
            } else if self.eat(&Token::Minus) {
                lhs = lhs - self.term()?;
            } else {
                return Ok(lhs);
            }
        }
    }

    fn term(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.unary()?;
        loop {
            if self.eat(&Token::Star) {
                lhs = lhs * self.unary()?;
            } else if self.eat(&Token::Slash) {
                lhs = lhs / self.unary()?;
            } else {
                return Ok(lhs);
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, Error> {
        if self.eat(&Token::Minus) {
            return Ok(-self.unary()?);
        }
        if self.eat(&Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, Error> {
        let base = self.atom()?;
        if self.eat(&Token::Caret) {
            return Ok(base.pow(self.unary()?));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, Error> {
        let at = self.offset();
        match self.next() {
            Some(Token::Num(v)) => Ok(Expr::Const(v)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if self.eat(&Token::LParen) {
                    self.call(&name, at)
                } else if name == "pi" {
                    Ok(Expr::Const(std::f64::consts::PI as Float))
                } else {
                    Ok(Expr::Sym(Symbol::new(name)))
                }
            }
            Some(t) => Err(Error::parse(at, format!("unexpected token {:?}", t))),
            None => Err(Error::parse(at, "unexpected end of input")),
        }
    }

    fn call(&mut self, name: &str, at: usize) -> Result<Expr, Error> {
        if name == "integrate" {
            let integrand = self.expr()?;
            self.expect(Token::Comma, "','")?;
            let var = match self.next() {
                Some(Token::Ident(v)) => Symbol::new(v),
                _ => return Err(Error::parse(at, "integrate expects a variable name")),
            };
            self.expect(Token::Comma, "','")?;
            let lower = self.expr()?;
            self.expect(Token::Comma, "','")?;
            let upper = self.expr()?;
            self.expect(Token::RParen, "')'")?;
            return Ok(Expr::integral(integrand, var, lower, upper));
        }
        let func = Func::from_name(name).ok_or_else(|| Error::UnknownFunction(name.to_string()))?;
        let arg = self.expr()?;
        self.expect(Token::RParen, "')'")?;
        Ok(Expr::apply(func, arg))
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            tokens: tokenize(s)?,
            pos: 0,
            end: s.len(),
        };
        let expr = parser.expr()?;
        if parser.pos < parser.tokens.len() {
            return Err(Error::parse(parser.offset(), "unexpected trailing input"));
        }
        Ok(expr)
    }
}
