//! Session file parser.
//!
//! A session file seeds the variable store and chat history before a script
//! runs:
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `set <name>=<value>` or `set <name> <value>` | set a variable |
//! | `message <text>` | append a chat message (oldest first) |
//! | `histsize <n>` | cap the number of messages kept |
//! | Lines starting with `;` | comment, ignored |
//! | Anything else | silently skipped |

use std::path::Path;

use tracing::debug;

use crate::history::MessageHistory;
use crate::script::Session;
use crate::var::VarStore;

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a session file.
#[derive(Debug)]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Parsed session: variables and chat history.
#[derive(Debug, Default)]
pub struct Config {
    pub vars: VarStore,
    pub history: MessageHistory,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a session file string.
    ///
    /// Returns the config and a list of any errors on recognised lines.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let (cmd, args_str) = line
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((line, ""));
            let args_str = args_str.trim();

            let result = match cmd {
                "set" => parse_set(&split_args(args_str), &mut config.vars),
                // Message text is taken verbatim; quotes are part of the message.
                "message" => {
                    config.history.record(args_str);
                    Ok(())
                }
                "histsize" => parse_histsize(args_str, &mut config.history),
                _ => {
                    debug!(line = lineno, cmd, "unknown session directive skipped");
                    Ok(())
                }
            };
            if let Err(message) = result {
                errors.push(ConfigError { line: lineno, message });
            }
        }

        (config, errors)
    }

    /// Read and parse a session file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }

    /// Build the in-memory host from this config.
    pub fn into_session(self) -> Session {
        Session {
            vars: self.vars,
            history: self.history,
        }
    }
}

// ── Argument tokenizer ────────────────────────────────────────────────────────

/// Split `s` into whitespace-delimited tokens, honouring double-quoted strings
/// and `\"` escapes within them.
fn split_args(s: &str) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    cur.push(escaped);
                }
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !cur.is_empty() {
                    args.push(std::mem::take(&mut cur));
                }
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() {
        args.push(cur);
    }
    args
}

// ── set / histsize ────────────────────────────────────────────────────────────

/// Parse `set <name>=<value>` or `set <name> <value>`.
fn parse_set(tokens: &[String], vars: &mut VarStore) -> Result<(), String> {
    if tokens.is_empty() {
        return Err("set: requires an argument".into());
    }

    let (name, value) = if let Some((name, value)) = tokens[0].split_once('=') {
        let mut value = value.to_owned();
        for t in &tokens[1..] {
            value.push(' ');
            value.push_str(t);
        }
        (name.to_owned(), value)
    } else if tokens.len() >= 2 {
        (tokens[0].clone(), tokens[1..].join(" "))
    } else {
        return Err(format!("set: missing value for '{}'", tokens[0]));
    };

    if name.is_empty() {
        return Err("set: variable name cannot be empty".into());
    }

    vars.set(name, value);
    Ok(())
}

fn parse_histsize(arg: &str, history: &mut MessageHistory) -> Result<(), String> {
    let n: usize = arg
        .parse()
        .map_err(|_| format!("histsize: invalid number '{arg}'"))?;
    history.set_max_size(n);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
