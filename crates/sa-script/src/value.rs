//! Variables are text. These helpers give that text a numeric reading when
//! an action needs one.

use std::fmt;

pub use sa_core::format_number;

/// Comparison operators accepted by `COMPARE_DO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `<`
    Lt,
}

impl CompareOp {
    /// Document tokens, in catalog order.
    pub const TOKENS: &'static [&'static str] = &["=", "!=", ">", ">=", "<=", "<"];

    /// Parse a document token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Ne),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            "<=" => Some(CompareOp::Le),
            "<" => Some(CompareOp::Lt),
            _ => None,
        }
    }

    /// The document token.
    pub fn token(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::Lt => "<",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Compare two variable values.
///
/// `=` and `!=` compare text. The ordering operators compare numbers, so any
/// side that does not read as a number makes them false.
pub fn compare(left: &str, op: CompareOp, right: &str) -> bool {
    let result = match op {
        CompareOp::Eq => left == right,
        CompareOp::Ne => left != right,
        CompareOp::Gt => to_number(left) > to_number(right),
        CompareOp::Ge => to_number(left) >= to_number(right),
        CompareOp::Le => to_number(left) <= to_number(right),
        CompareOp::Lt => to_number(left) < to_number(right),
    };
    tracing::debug!(left, %op, right, result, "comparison");
    result
}

/// Read text as a number the way story documents expect.
///
/// Surrounding whitespace is ignored and empty text is 0. Accepts decimal
/// and exponent notation, `0x`/`0o`/`0b` integers and `Infinity`. Anything
/// else is NaN.
pub fn to_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0, |acc, c| {
                c.to_digit(radix)
                    .map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    let decimal = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// `current + amount` as text. An unset current value counts as 0.
pub fn add(current: Option<&str>, amount: &str) -> String {
    let base = current.map_or(0.0, to_number);
    format_number(base + to_number(amount))
}
