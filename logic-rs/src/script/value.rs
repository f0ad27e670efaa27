//! Runtime value type for logic scripts.
//!
//! Every variable is persisted as a string, but values are coerced on read
//! to numbers and booleans where the text looks like one.  Comparison
//! operators work on these tagged values so the coercion rules stay explicit.

use std::cmp::Ordering;
use std::fmt;

/// A logic script runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `-0` prints as `0`; integral values print without a fraction.
            Value::Num(x) if *x == 0.0 => write!(f, "0"),
            Value::Num(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    /// Coerce a raw stored string.
    ///
    /// Numeric-looking text becomes [`Value::Num`], `true`/`false` in any
    /// case becomes [`Value::Bool`], everything else stays a string.
    pub fn from_stored(raw: &str) -> Value {
        if let Some(n) = parse_finite(raw) {
            return Value::Num(n);
        }
        match parse_bool(raw.trim()) {
            Some(b) => Value::Bool(b),
            None => Value::Str(raw.to_owned()),
        }
    }

    /// Infer a typed value from a literal token (`SETVAR` and operands).
    ///
    /// A double-quoted token is always a string, with one layer of quotes
    /// removed.  Anything that is not a literal stays a raw string.
    pub fn from_literal(token: &str) -> Value {
        Value::parse_literal(token).unwrap_or_else(|| Value::Str(token.to_owned()))
    }

    /// Quoted string, finite number, or boolean; `None` for anything else.
    pub fn parse_literal(token: &str) -> Option<Value> {
        if let Some(inner) = quoted(token) {
            return Some(Value::Str(inner.to_owned()));
        }
        if let Some(n) = parse_finite(token) {
            return Some(Value::Num(n));
        }
        parse_bool(token).map(Value::Bool)
    }

    /// Numeric view used by ordering and loose equality.
    ///
    /// Empty or blank strings are `0`; other non-numeric strings are NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Num(x) => *x,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Str(s) => {
                let t = s.trim();
                if t.is_empty() {
                    0.0
                } else {
                    t.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Loose equality: differing types are coerced to numbers first.
    pub fn loose_eq(&self, rhs: &Value) -> bool {
        match (self, rhs) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            _ => self.to_number() == rhs.to_number(),
        }
    }

    /// Ordering comparison.
    ///
    /// Two strings compare lexicographically; any other pairing compares
    /// numerically.  Returns `None` when either side is NaN, which makes
    /// every relational operator false.
    pub fn compare(&self, rhs: &Value) -> Option<Ordering> {
        match (self, rhs) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => self.to_number().partial_cmp(&rhs.to_number()),
        }
    }

    /// Name of the type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
        }
    }
}

/// Returns the contents of `s` if it is wrapped in double quotes.
pub(crate) fn quoted(s: &str) -> Option<&str> {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|x| x.is_finite())
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
