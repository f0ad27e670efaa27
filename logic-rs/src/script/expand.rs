//! Placeholder substitution.
//!
//! Runs on each live line before directive matching:
//!
//! | Sequence | Meaning |
//! |----------|---------|
//! | `{{getvar::name}}` | Raw stored value of `name`, empty if unset |
//! | `{{setvar::name::value}}` | Store `value` under `name`; expands to nothing |
//! | `{{lastMessage}}` | Text of the most recent chat message |
//!
//! Unrecognised `{{...}}` sequences are left untouched, so a line without
//! placeholders comes back unchanged.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::history::MessageHistory;
use crate::var::VarStore;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern"))
}

/// Expand all placeholders in `src`.
pub fn expand(src: &str, vars: &mut VarStore, history: &MessageHistory) -> String {
    if !src.contains("{{") {
        return src.to_owned();
    }
    placeholder_re()
        .replace_all(src, |caps: &Captures<'_>| {
            let body = &caps[1];
            if let Some(name) = body.strip_prefix("getvar::") {
                vars.get(name.trim()).unwrap_or("").to_owned()
            } else if let Some(rest) = body.strip_prefix("setvar::") {
                let (name, value) = rest.split_once("::").unwrap_or((rest, ""));
                trace!(name, value, "setvar placeholder");
                vars.set(name.trim(), value);
                String::new()
            } else if body.trim().eq_ignore_ascii_case("lastMessage") {
                history.last().to_owned()
            } else {
                caps[0].to_owned()
            }
        })
        .into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(src: &str, vars: &mut VarStore) -> String {
        expand(src, vars, &MessageHistory::default())
    }

    #[test]
    fn plain_text_unchanged() {
        let mut vars = VarStore::new();
        assert_eq!(exp("SAY hello", &mut vars), "SAY hello");
        assert_eq!(exp("IF x == 1", &mut vars), "IF x == 1");
    }

    #[test]
    fn getvar() {
        let mut vars = VarStore::new();
        vars.set("mood", "happy");
        assert_eq!(exp("SAY I am {{getvar::mood}}", &mut vars), "SAY I am happy");
        assert_eq!(exp("IF {{getvar::hp}} < 12", &mut vars), "IF  < 12");
    }

    #[test]
    fn setvar_writes_and_vanishes() {
        let mut vars = VarStore::new();
        assert_eq!(exp("SAY {{setvar::n::3}}done", &mut vars), "SAY done");
        assert_eq!(vars.get("n"), Some("3"));
    }

    #[test]
    fn setvar_without_value_stores_empty() {
        let mut vars = VarStore::new();
        exp("{{setvar::blank}}", &mut vars);
        assert_eq!(vars.get("blank"), Some(""));
    }

    #[test]
    fn last_message() {
        let mut vars = VarStore::new();
        let mut hist = MessageHistory::default();
        hist.record("good morning");
        assert_eq!(expand("SAY {{lastMessage}}", &mut vars, &hist), "SAY good morning");
    }

    #[test]
    fn unknown_placeholder_kept() {
        let mut vars = VarStore::new();
        assert_eq!(exp("SAY {{user}} {{char}}", &mut vars), "SAY {{user}} {{char}}");
    }

    #[test]
    fn idempotent_without_placeholders() {
        let mut vars = VarStore::new();
        let once = exp("SAY {{unknown}}", &mut vars);
        assert_eq!(exp(&once, &mut vars), once);
    }
}
