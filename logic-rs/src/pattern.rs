//! Case-insensitive substring matching for `CONTAINS` / `HAS`.
//!
//! ## Strategy
//!
//! | Needle | Search |
//! |--------|--------|
//! | empty | always matches |
//! | ASCII only | `aho_corasick` automaton with ASCII case folding |
//! | non-ASCII | Unicode lowercase of both sides, then `str::contains` |
//!
//! ASCII folding is exact for ASCII needles: a non-ASCII haystack byte can
//! never fold onto an ASCII needle byte, so the two paths agree.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};

/// A compiled case-insensitive substring needle.
#[derive(Debug, Clone)]
pub struct Substr {
    compiled: Compiled,
}

#[derive(Debug, Clone)]
enum Compiled {
    Empty,
    Ascii(AhoCorasick),
    /// Stores the needle already lowercased.
    Unicode(String),
}

impl Substr {
    /// Compile `needle` for repeated searches.
    pub fn new(needle: &str) -> Self {
        let compiled = if needle.is_empty() {
            Compiled::Empty
        } else if needle.is_ascii() {
            Compiled::Ascii(
                AhoCorasickBuilder::new()
                    .ascii_case_insensitive(true)
                    .build([needle]),
            )
        } else {
            Compiled::Unicode(needle.to_lowercase())
        };
        Self { compiled }
    }

    /// Returns `true` if the needle occurs anywhere in `haystack`,
    /// ignoring case.
    pub fn matches(&self, haystack: &str) -> bool {
        match &self.compiled {
            Compiled::Empty => true,
            Compiled::Ascii(ac) => ac.is_match(haystack),
            Compiled::Unicode(lo) => haystack.to_lowercase().contains(lo.as_str()),
        }
    }
}

/// One-shot case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    Substr::new(needle).matches(haystack)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_case_insensitive() {
        assert!(contains_ci("Hello World", "world"));
        assert!(contains_ci("Hello World", "LO WO"));
        assert!(!contains_ci("Hello World", "worlds"));
    }

    #[test]
    fn empty_needle_always_matches() {
        assert!(contains_ci("", ""));
        assert!(contains_ci("anything", ""));
    }

    #[test]
    fn empty_haystack() {
        assert!(!contains_ci("", "a"));
    }

    #[test]
    fn unicode_needle_folds_case() {
        assert!(contains_ci("CAFÉ au lait", "café"));
        // No full case folding: `ß` is not `ss`.
        assert!(!contains_ci("straße", "SSE"));
    }

    #[test]
    fn ascii_needle_in_unicode_haystack() {
        assert!(contains_ci("über ALLES", "alles"));
    }

    #[test]
    fn reusable_matcher() {
        let p = Substr::new("ello");
        assert!(p.matches("HELLO"));
        assert!(!p.matches("Hi"));
    }
}
