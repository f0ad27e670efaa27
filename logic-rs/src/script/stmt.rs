//! Directive classification.
//!
//! A script is a sequence of lines; each trimmed, non-empty line is one
//! directive.  Keywords match case-insensitively, in this priority order:
//!
//! | Directive | Form |
//! |-----------|------|
//! | `IF` | `IF <cond>` |
//! | `ELSE IF` | `ELSE IF <cond>` |
//! | `ELSE` | any line starting with `ELSE` |
//! | `END` | any line starting with `END` (so `ENDIF` closes a block) |
//! | `SAY` | `SAY <text>` |
//! | `SET` | `SET <name> = <value>` |
//! | `SETVAR` | `SETVAR <name> <value>` |
//!
//! Anything else is [`Directive::Unknown`] and ignored by the interpreter.

use super::value::{quoted, Value};

/// One classified script line.  Arguments borrow from the line.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive<'a> {
    If(&'a str),
    ElseIf(&'a str),
    Else,
    End,
    Say(&'a str),
    Set(&'a str),
    SetVar(&'a str),
    Unknown,
}

impl<'a> Directive<'a> {
    /// Classify a trimmed line.
    pub fn parse(line: &'a str) -> Self {
        let structural = Self::parse_structural(line);
        if structural != Directive::Unknown {
            return structural;
        }
        if let Some(rest) = strip_keyword(line, "SAY ") {
            Directive::Say(rest)
        } else if let Some(rest) = strip_keyword(line, "SET ") {
            Directive::Set(rest)
        } else if let Some(rest) = strip_keyword(line, "SETVAR ") {
            Directive::SetVar(rest)
        } else {
            Directive::Unknown
        }
    }

    /// Classify only the four block keywords; everything else is
    /// [`Directive::Unknown`].
    pub fn parse_structural(line: &'a str) -> Self {
        if let Some(rest) = strip_keyword(line, "IF ") {
            Directive::If(rest.trim())
        } else if let Some(rest) = strip_keyword(line, "ELSE IF ") {
            Directive::ElseIf(rest.trim())
        } else if strip_keyword(line, "ELSE").is_some() {
            Directive::Else
        } else if strip_keyword(line, "END").is_some() {
            Directive::End
        } else {
            Directive::Unknown
        }
    }

}

/// Case-insensitively strip the prefix `kw` from `line`.  Keywords that
/// take an argument include their trailing space.
fn strip_keyword<'a>(line: &'a str, kw: &str) -> Option<&'a str> {
    let head = line.get(..kw.len())?;
    if head.eq_ignore_ascii_case(kw) {
        Some(&line[kw.len()..])
    } else {
        None
    }
}

// ── Argument parsers ──────────────────────────────────────────────────────────

/// Remove exactly one layer of surrounding double quotes, if present.
pub fn strip_quotes(s: &str) -> &str {
    quoted(s).unwrap_or(s)
}

/// Parse `SET` arguments, `name = value`.
///
/// Splits on the first `=`.  A missing `=` or an empty name is `None`.
pub fn parse_set(args: &str) -> Option<(&str, &str)> {
    let (name, value) = args.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, strip_quotes(value.trim())))
}

/// Parse `SETVAR` arguments, `name value`, inferring the value's type.
pub fn parse_setvar(args: &str) -> Option<(&str, Value)> {
    let (name, value) = args.trim().split_once(char::is_whitespace)?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((name, Value::from_literal(value)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
