//! Condition evaluator.
//!
//! A condition is exactly one binary comparison, `LEFT OP RIGHT`.  There is
//! no precedence, no grouping, and no `AND`/`OR`.  Parsing is permissive:
//! anything malformed evaluates to `false` instead of failing.
//!
//! | Operator | Meaning |
//! |----------|---------|
//! | `>` `<` `>=` `<=` | ordering ([`Value::compare`]) |
//! | `==` `=` | loose equality ([`Value::loose_eq`]) |
//! | `!=` | negated loose equality |
//! | `CONTAINS` `HAS` | case-insensitive substring, right inside left |

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use super::error::Result;
use super::value::Value;
use crate::pattern::contains_ci;

// ── EvalContext ───────────────────────────────────────────────────────────────

/// Dependency-injection interface used by the evaluator.
pub trait EvalContext {
    /// Look up a variable, already coerced.  `Ok(None)` means unset.
    fn get_var(&self, name: &str) -> Result<Option<Value>>;

    /// Draw a uniform value in `[0, 1)` for `RANDOM`.
    fn random(&mut self) -> f64 {
        rand::random()
    }
}

// ── Operator ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    Contains,
}

impl Operator {
    /// Parse an operator token.  Returns `None` for anything unrecognised.
    pub fn parse(tok: &str) -> Option<Self> {
        Some(match tok {
            ">" => Operator::Gt,
            "<" => Operator::Lt,
            ">=" => Operator::Ge,
            "<=" => Operator::Le,
            "==" | "=" => Operator::Eq,
            "!=" => Operator::Ne,
            _ if tok.eq_ignore_ascii_case("CONTAINS") || tok.eq_ignore_ascii_case("HAS") => {
                Operator::Contains
            }
            _ => return None,
        })
    }

    pub fn apply(self, l: &Value, r: &Value) -> bool {
        match self {
            Operator::Gt => l.compare(r) == Some(Ordering::Greater),
            Operator::Lt => l.compare(r) == Some(Ordering::Less),
            Operator::Ge => matches!(l.compare(r), Some(Ordering::Greater | Ordering::Equal)),
            Operator::Le => matches!(l.compare(r), Some(Ordering::Less | Ordering::Equal)),
            Operator::Eq => l.loose_eq(r),
            Operator::Ne => !l.loose_eq(r),
            Operator::Contains => contains_ci(&l.to_string(), &r.to_string()),
        }
    }
}

// ── Tokenizer ─────────────────────────────────────────────────────────────────

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Bare words exclude operator characters so `1==1` splits in three.
    RE.get_or_init(|| Regex::new(r#""[^"]*"|[=<>!]+|[^\s=<>!"]+"#).expect("token pattern"))
}

/// Split a condition into quoted strings, operator runs, and bare words.
pub fn tokenize(src: &str) -> Vec<&str> {
    token_re().find_iter(src).map(|m| m.as_str()).collect()
}

fn is_operator_run(tok: &str) -> bool {
    !tok.is_empty() && tok.bytes().all(|b| matches!(b, b'=' | b'<' | b'>' | b'!'))
}

// ── Operand resolution ────────────────────────────────────────────────────────

/// Strip a `{{name}}` or `{{getvar::name}}` wrapper from a variable reference.
pub fn var_name(tok: &str) -> &str {
    match tok.strip_prefix("{{").and_then(|s| s.strip_suffix("}}")) {
        Some(inner) => inner.strip_prefix("getvar::").unwrap_or(inner).trim(),
        None => tok,
    }
}

/// Resolve one raw operand token to a value.
///
/// Order: quoted string, number, boolean, `RANDOM`, then variable lookup.
/// An unset variable resolves to `0`.
pub fn resolve_operand(tok: &str, ctx: &mut dyn EvalContext) -> Result<Value> {
    if let Some(v) = Value::parse_literal(tok) {
        return Ok(v);
    }
    if tok.eq_ignore_ascii_case("RANDOM") {
        return Ok(Value::Num(ctx.random()));
    }
    Ok(ctx.get_var(var_name(tok))?.unwrap_or(Value::Num(0.0)))
}

// ── Evaluation ────────────────────────────────────────────────────────────────

/// Evaluate a condition.
///
/// Only a failing [`EvalContext::get_var`] produces an error; malformed
/// conditions and unknown operators are simply `false`.
pub fn evaluate(src: &str, ctx: &mut dyn EvalContext) -> Result<bool> {
    let mut tokens = tokenize(src);
    // An empty substitution can leave `< 12`; the missing left side is 0.
    if tokens.first().is_some_and(|t| is_operator_run(t)) {
        tokens.insert(0, "0");
    }
    let (left, op, right) = match tokens.as_slice() {
        [l, o, r, ..] => (*l, *o, *r),
        _ => {
            trace!(cond = src, "condition has fewer than three tokens");
            return Ok(false);
        }
    };
    let Some(op) = Operator::parse(op) else {
        trace!(cond = src, op, "unknown operator");
        return Ok(false);
    };
    let l = resolve_operand(left, ctx)?;
    let r = resolve_operand(right, ctx)?;
    let result = op.apply(&l, &r);
    trace!(
        cond = src,
        ?l,
        l_type = l.type_name(),
        ?op,
        ?r,
        r_type = r.type_name(),
        result,
        "condition evaluated"
    );
    Ok(result)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
