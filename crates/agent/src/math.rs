//! Math query routing.
//!
//! A math message goes to exactly one sub-strategy, tried in priority
//! order: factorial, square root, power, then the generic expression
//! evaluator. Square root and power fall through to the next strategy
//! when their operand pattern does not match; factorial never does.
//!
//! Every failure is turned into a reply sentence here. Nothing in this
//! module returns an error to the dispatcher.

use bigdecimal::num_bigint::BigUint;
use chatwise_core::error::EvalError;
use chatwise_core::intent::MathOperands;
use chatwise_core::text::group_thousands;
use chatwise_tools::calculator::{self, format_float};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Largest factorial operand answered. 171! no longer fits an f64,
/// which is where the chat stops offering it.
pub const MAX_FACTORIAL: i64 = 170;

pub const FACTORIAL_PROMPT: &str =
    "Please specify a number for factorial (e.g., 'factorial of 9').";
pub const MATH_HELP: &str =
    "I can help with math! Try: '5 + 3', 'factorial of 9', 'sqrt of 16', etc.";

const NEGATIVE_FACTORIAL: &str = "Factorial is only defined for non-negative integers.";
const NEGATIVE_SQRT: &str = "Square root of negative numbers is not supported.";
const POWER_FAILED: &str = "Couldn't calculate that power.";
const DIVIDE_BY_ZERO: &str = "Cannot divide by zero!";
const UNSUPPORTED_OPERATION: &str =
    "I can only handle basic arithmetic operations (+, -, *, /, %, parentheses).";
const PARSE_FAILED: &str = "Couldn't calculate that. Try something like: 43 + 23 or 323/23*323";

static FACTORIAL_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"factorial\s+(?:of\s+)?(-?[0-9]+)").expect("valid regex"));

/// A leading `-` only counts as a sign when no digit precedes it, so
/// `3-5 factorial` asks for `5!`.
static N_FACTORIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])(-?[0-9]+)\s+factorial").expect("valid regex"));

static SQRT_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:sqrt|square root)\s+(?:of\s+)?(-?[0-9]+(?:\.[0-9]+)?)").expect("valid regex")
});

static POWER_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*(?:\^|\*\*|to the power of|power)\s*([0-9]+(?:\.[0-9]+)?)")
        .expect("valid regex")
});

static FILLER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:can|you|do|calculate|compute|solve|what|is|the|result|of|equals?)\b")
        .expect("valid regex")
});

/// What a math message asks for, before anything is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum MathQuery {
    Operands(MathOperands),
    /// `factorial` with no number next to it.
    FactorialWithoutOperand,
    /// A factorial operand too long to even parse.
    FactorialOverflow(String),
    /// Nothing arithmetic left after cleaning.
    Empty,
}

/// Work out which sub-strategy a math message selects and pull out its
/// operands.
pub fn parse_query(text: &str) -> MathQuery {
    let lower = text.to_lowercase();

    if lower.contains("factorial") {
        let digits = FACTORIAL_OF
            .captures(&lower)
            .or_else(|| N_FACTORIAL.captures(&lower))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());

        return match digits {
            None => MathQuery::FactorialWithoutOperand,
            Some(digits) => match digits.parse::<i64>() {
                Ok(n) => MathQuery::Operands(MathOperands::Factorial(n)),
                Err(_) if digits.starts_with('-') => {
                    MathQuery::Operands(MathOperands::Factorial(i64::MIN))
                }
                Err(_) => MathQuery::FactorialOverflow(digits.to_string()),
            },
        };
    }

    if lower.contains("sqrt") || lower.contains("square root") {
        if let Some(x) = SQRT_OF.captures(&lower).and_then(|c| c[1].parse::<f64>().ok()) {
            return MathQuery::Operands(MathOperands::Sqrt(x));
        }
    }

    if lower.contains("power") || text.contains('^') || text.contains("**") {
        if let Some(caps) = POWER_OF.captures(&lower) {
            if let (Ok(base), Ok(exponent)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
                return MathQuery::Operands(MathOperands::Power { base, exponent });
            }
        }
    }

    let expression = clean_expression(&lower);
    if expression.is_empty() {
        MathQuery::Empty
    } else {
        MathQuery::Operands(MathOperands::RawExpression(expression))
    }
}

/// Drop filler words and every character the evaluator does not accept.
fn clean_expression(lower: &str) -> String {
    FILLER_WORDS
        .replace_all(lower, "")
        .chars()
        .filter(|&c| calculator::is_allowed_char(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Exact `n!`.
pub fn factorial(n: i64) -> Result<BigUint, EvalError> {
    if n < 0 {
        return Err(EvalError::DomainError(NEGATIVE_FACTORIAL.into()));
    }
    if n > MAX_FACTORIAL {
        return Err(EvalError::DomainError(too_large(&n.to_string())));
    }
    Ok((2..=n as u64).fold(BigUint::from(1u32), |acc, k| acc * k))
}

pub fn square_root(x: f64) -> Result<f64, EvalError> {
    if x < 0.0 {
        return Err(EvalError::DomainError(NEGATIVE_SQRT.into()));
    }
    Ok(x.sqrt())
}

pub fn power(base: f64, exponent: f64) -> Result<f64, EvalError> {
    let result = base.powf(exponent);
    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::DomainError(POWER_FAILED.into()))
    }
}

fn too_large(n: &str) -> String {
    format!("Factorial of {n} is too large to calculate!")
}

/// Answer a message already classified as math.
pub fn handle_math(text: &str) -> String {
    let query = parse_query(text);
    debug!(?query, "Routing math query");

    match query {
        MathQuery::Operands(operands) => answer(operands).unwrap_or_else(|e| error_reply(&e)),
        MathQuery::FactorialWithoutOperand => FACTORIAL_PROMPT.to_string(),
        MathQuery::FactorialOverflow(digits) => too_large(&digits),
        MathQuery::Empty => MATH_HELP.to_string(),
    }
}

fn answer(operands: MathOperands) -> Result<String, EvalError> {
    match operands {
        MathOperands::Factorial(n) => {
            let value = factorial(n)?;
            Ok(format!("**{n}! = {}**", group_thousands(&value.to_string())))
        }
        MathOperands::Sqrt(x) => {
            let root = square_root(x)?;
            Ok(format!("**√{} = {root:.4}**", format_float(x)))
        }
        MathOperands::Power { base, exponent } => {
            let value = power(base, exponent)?;
            Ok(format!(
                "**{}^{} = {}**",
                format_float(base),
                format_float(exponent),
                group_thousands(&format_float(value))
            ))
        }
        MathOperands::RawExpression(expr) => {
            let value = calculator::evaluate(&expr)?;
            Ok(format!("**{expr} = {value}**"))
        }
    }
}

/// The sentence shown for an evaluation failure.
pub fn error_reply(err: &EvalError) -> String {
    match err {
        EvalError::DivisionByZero => DIVIDE_BY_ZERO.to_string(),
        EvalError::InvalidCharacters(_) => UNSUPPORTED_OPERATION.to_string(),
        EvalError::ParseError(_) => PARSE_FAILED.to_string(),
        EvalError::DomainError(message) => message.clone(),
    }
}
