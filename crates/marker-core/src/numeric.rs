//! Numeric fast path.
//!
//! Answers that are plain numeric literals are compared directly instead of
//! being sent to the judge. Only literal syntax is accepted: `2+2`, `1/2`
//! and friends are expressions and fall through to the judge. A literal may
//! carry one sign and sit inside parentheses, so `-4`, `- 4`, `(4)` and
//! `-(4)` all read as numbers.

use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use regex::Regex;

use crate::types::Evaluation;

/// Two numbers closer than this are equal.
pub const EPSILON: f64 = 1e-10;

lazy_static! {
    /// Decimal integer, no leading zeros except for zero itself.
    static ref DECIMAL_INT: Regex = Regex::new(r"^(?:0(?:_?0)*|[1-9](?:_?[0-9])*)$").unwrap();

    static ref HEX_INT: Regex = Regex::new(r"^0[xX](?:_?[0-9a-fA-F])+$").unwrap();
    static ref OCTAL_INT: Regex = Regex::new(r"^0[oO](?:_?[0-7])+$").unwrap();
    static ref BINARY_INT: Regex = Regex::new(r"^0[bB](?:_?[01])+$").unwrap();

    /// Float literal: needs a decimal point, an exponent, or both.
    static ref FLOAT: Regex = {
        let digits = r"[0-9](?:_?[0-9])*";
        let point = format!(r"(?:(?:{d})?\.{d}|{d}\.)", d = digits);
        let exponent = format!(r"[eE][+-]?{d}", d = digits);
        Regex::new(&format!(
            r"^(?:{point}(?:{exp})?|{d}{exp})$",
            point = point,
            exp = exponent,
            d = digits
        ))
        .unwrap()
    };
}

/// A parsed numeric literal. Integers keep every digit.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(BigInt),
    Float(f64),
}

impl Number {
    /// Value as a float. Integers beyond the `f64` range become infinite.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => i.to_f64().unwrap_or(f64::NAN),
            Number::Float(f) => *f,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(x) => f.write_str(&float_repr(*x)),
        }
    }
}

/// Shortest round-trip rendering of a float.
///
/// Whole values keep a trailing `.0`. Exponent notation is used below
/// `1e-4` and from `1e16` up, with a signed exponent of at least two
/// digits (`1e+16`, `2.5e-07`).
fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", x);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{:?}", x);
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{:?}", x);
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..16).contains(&exponent) {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() { String::new() } else { format!(".{}", rest) };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}{}e{}{:02}", sign, lead, fraction, exp_sign, exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let point = exponent as usize + 1;
    if digits.len() <= point {
        let zeros = "0".repeat(point - digits.len());
        format!("{}{}{}.0", sign, digits, zeros)
    } else {
        format!("{}{}.{}", sign, &digits[..point], &digits[point..])
    }
}

/// Outcome of trying to read text as a number.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberParse {
    Number(Number),
    NotNumeric,
}

/// Try to read `text` as an integer or float literal.
pub fn parse_number(text: &str) -> NumberParse {
    let text = strip_parens(text);
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, strip_parens(&text[1..])),
        Some(b'+') => (false, strip_parens(&text[1..])),
        _ => (false, text),
    };

    let number = if DECIMAL_INT.is_match(body) {
        parse_integer(body, 10)
    } else if HEX_INT.is_match(body) || OCTAL_INT.is_match(body) || BINARY_INT.is_match(body) {
        let radix = match body.as_bytes()[1] {
            b'x' | b'X' => 16,
            b'o' | b'O' => 8,
            _ => 2,
        };
        parse_integer(&body[2..], radix)
    } else if FLOAT.is_match(body) {
        body.replace('_', "").parse::<f64>().ok().map(Number::Float)
    } else {
        None
    };

    match number {
        Some(Number::Integer(i)) if negative => NumberParse::Number(Number::Integer(-i)),
        Some(Number::Float(f)) if negative => NumberParse::Number(Number::Float(-f)),
        Some(number) => NumberParse::Number(number),
        None => NumberParse::NotNumeric,
    }
}

/// Trim whitespace and any number of enclosing parentheses.
fn strip_parens(text: &str) -> &str {
    let mut text = text.trim();
    while text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        text = text[1..text.len() - 1].trim();
    }
    text
}

/// Digits of an unsigned integer literal already checked by a regex.
fn parse_integer(digits: &str, radix: u32) -> Option<Number> {
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    BigInt::parse_bytes(digits.as_bytes(), radix).map(Number::Integer)
}

/// Whether two numbers are equal within [`EPSILON`].
///
/// Two integers are compared exactly, whatever their size.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => x == y,
        _ => (a.as_f64() - b.as_f64()).abs() < EPSILON,
    }
}

/// Compare two answers numerically.
///
/// Returns `None` when either side is not a numeric literal, meaning the
/// comparison does not apply and the answer needs judging.
pub fn compare_numeric(generated: &str, correct: &str) -> Option<Evaluation> {
    let (generated, correct) = match (parse_number(generated), parse_number(correct)) {
        (NumberParse::Number(g), NumberParse::Number(c)) => (g, c),
        _ => return None,
    };

    let comparison = format!("{} == {}", generated, correct);
    let result = numbers_equal(&generated, &correct);
    tracing::debug!(comparison = %comparison, result, "Numeric comparison");

    Some(Evaluation::numeric(comparison, result))
}
