//! Arithmetic evaluator for expressions typed into the chat.
//!
//! Supports `+`, `-`, `*`, `/`, `%`, parentheses, decimals, and unary
//! signs. Uses a dedicated tokenizer and recursive-descent parser over
//! this closed grammar; nothing in the input is ever executed as code.
//!
//! Values stay integers while every operand and result is an exact
//! integer and switch to floating point otherwise.

use chatwise_core::error::EvalError;
use std::fmt;

/// Parenthesis nesting limit. Deeper input is rejected instead of
/// recursing further.
const MAX_DEPTH: usize = 256;

/// Characters the evaluator accepts.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '%' | '(' | ')' | '.' | ' ')
}

/// A computed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(x) => x == 0.0,
        }
    }

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map_or(Number::Float(a as f64 + b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_sub(b)
                .map_or(Number::Float(a as f64 - b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() - b.as_f64()),
        }
    }

    fn mul(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(b)
                .map_or(Number::Float(a as f64 * b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() * b.as_f64()),
        }
    }

    fn div(self, rhs: Number) -> Result<Number, EvalError> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        Ok(match (self, rhs) {
            // Exact quotients stay integers: `6/3` is `2`, not `2.0`.
            (Number::Int(a), Number::Int(b)) if a.checked_rem(b) == Some(0) => a
                .checked_div(b)
                .map_or(Number::Float(a as f64 / b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() / b.as_f64()),
        })
    }

    // Floored modulo: the result takes the sign of the divisor.
    fn rem(self, rhs: Number) -> Result<Number, EvalError> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        Ok(match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                let r = a.wrapping_rem(b);
                if r != 0 && (r < 0) != (b < 0) {
                    Number::Int(r + b)
                } else {
                    Number::Int(r)
                }
            }
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    Number::Float(r + b)
                } else {
                    Number::Float(r)
                }
            }
        })
    }

    fn neg(self) -> Number {
        match self {
            Number::Int(n) => n
                .checked_neg()
                .map_or(Number::Float(-(n as f64)), Number::Int),
            Number::Float(x) => Number::Float(-x),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}

/// Format a float the way a calculator display shows it: integral
/// values keep one decimal (`5.0`), others use the shortest form that
/// round-trips. Magnitudes from `1e16` up and below `1e-4` switch to
/// exponent form with a signed, two-digit exponent (`1e+20`, `2.5e-05`).
pub fn format_float(x: f64) -> String {
    if !x.is_finite() {
        return format!("{x}");
    }
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(x);
    }
    if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

fn exponent_form(x: f64) -> String {
    let formatted = format!("{x:e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

// ── Recursive-descent expression evaluator ────────────────────────────────

/// Evaluate an arithmetic expression string.
pub fn evaluate(expr: &str) -> Result<Number, EvalError> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser::new(&tokens);
    let result = parser.parse_expr()?;
    if let Some(tok) = parser.peek() {
        return Err(EvalError::ParseError(format!(
            "Unexpected token at position {}: {:?}",
            parser.pos, tok
        )));
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(Number),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    if let Some(bad) = input.chars().find(|c| !is_allowed_char(*c)) {
        return Err(EvalError::InvalidCharacters(bad));
    }

    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ' ' => i += 1,
            '+' => { tokens.push(Token::Plus); i += 1; }
            '-' => { tokens.push(Token::Minus); i += 1; }
            '*' => { tokens.push(Token::Star); i += 1; }
            '/' => { tokens.push(Token::Slash); i += 1; }
            '%' => { tokens.push(Token::Percent); i += 1; }
            '(' => { tokens.push(Token::LParen); i += 1; }
            ')' => { tokens.push(Token::RParen); i += 1; }
            _ => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let num_str: String = chars[start..i].iter().collect();
                tokens.push(Token::Number(parse_number(&num_str)?));
            }
        }
    }

    Ok(tokens)
}

fn parse_number(s: &str) -> Result<Number, EvalError> {
    let invalid = || EvalError::ParseError(format!("Invalid number: {s}"));
    if s.contains('.') {
        return s.parse::<f64>().map(Number::Float).map_err(|_| invalid());
    }
    match s.parse::<i64>() {
        Ok(n) => Ok(Number::Int(n)),
        // Too many digits for i64; keep going in floating point.
        Err(_) => s.parse::<f64>().map(Number::Float).map_err(|_| invalid()),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0, depth: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::ParseError("Expression is nested too deeply".into()));
        }
        Ok(())
    }

    // expr = term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<Number, EvalError> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.consume();
                    left = left.add(self.parse_term()?);
                }
                Token::Minus => {
                    self.consume();
                    left = left.sub(self.parse_term()?);
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // term = unary (('*' | '/' | '%') unary)*
    fn parse_term(&mut self) -> Result<Number, EvalError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.consume();
                    left = left.mul(self.parse_unary()?);
                }
                Token::Slash => {
                    self.consume();
                    left = left.div(self.parse_unary()?)?;
                }
                Token::Percent => {
                    self.consume();
                    left = left.rem(self.parse_unary()?)?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // unary = ('-' | '+') unary | primary
    fn parse_unary(&mut self) -> Result<Number, EvalError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.consume();
                self.descend()?;
                let val = self.parse_unary()?;
                self.depth -= 1;
                Ok(val.neg())
            }
            Some(Token::Plus) => {
                self.consume();
                self.descend()?;
                let val = self.parse_unary()?;
                self.depth -= 1;
                Ok(val)
            }
            _ => self.parse_primary(),
        }
    }

    // primary = NUMBER | '(' expr ')'
    fn parse_primary(&mut self) -> Result<Number, EvalError> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::LParen) => {
                self.descend()?;
                let val = self.parse_expr()?;
                self.depth -= 1;
                match self.consume() {
                    Some(Token::RParen) => Ok(val),
                    _ => Err(EvalError::ParseError("Expected closing parenthesis".into())),
                }
            }
            Some(tok) => Err(EvalError::ParseError(format!("Unexpected token: {:?}", tok))),
            None => Err(EvalError::ParseError("Unexpected end of expression".into())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
