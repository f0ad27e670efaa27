//! Command-line argument parsing.
//!
//! Usage:
//!   logic [-d] [-f[<session>]] [-s<name>=<value>]... [-m<message>]... [-c<script> | <file> | -]

use std::path::PathBuf;

use thiserror::Error;

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Which session file to load.
    pub session: SessionFile,
    /// Where the script text comes from.
    pub script: ScriptSource,
    /// Variables to set before running (`-s name=value`), in order.
    pub vars: Vec<(String, String)>,
    /// Chat messages to record before running (`-m text`), oldest first.
    pub messages: Vec<String>,
    /// Debug logging (`-d`).
    pub debug: bool,
}

/// How to choose the session file.
#[derive(Debug, Default)]
pub enum SessionFile {
    /// Look for `session.logic` in the standard locations (default).
    #[default]
    Search,
    /// `-f` with no file argument: start from an empty session.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

/// Where to read the script from.
#[derive(Debug, Default, PartialEq)]
pub enum ScriptSource {
    /// Read standard input (default, or `-`).
    #[default]
    Stdin,
    /// `-c<script>`: script text given on the command line.
    Inline(String),
    /// A script file path.
    File(PathBuf),
}

#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("-{0} requires an argument")]
    MissingArgument(char),
    #[error("unknown option: -{0}")]
    UnknownOption(char),
    #[error("expected name=value, got '{0}'")]
    BadAssignment(String),
    #[error("too many arguments ({0})")]
    TooManyArguments(usize),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()`.
pub fn parse_args() -> Result<CliArgs, CliError> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    parse_argv(&raw)
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, CliError> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            i += 1;
            positional.extend(argv[i..].iter().cloned());
            break;
        }

        // Non-flag argument.
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        // Flag argument: iterate over characters after the leading `-`.
        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'd' => args.debug = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        let file: String = chars[j + 1..].iter().collect();
                        args.session = SessionFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else if i + 1 < argv.len() && !argv[i + 1].starts_with('-') {
                        i += 1;
                        args.session = SessionFile::Explicit(PathBuf::from(&argv[i]));
                    } else {
                        args.session = SessionFile::Skip;
                    }
                }

                // Flags that always take a value, attached or separate.
                flag @ ('c' | 's' | 'm') => {
                    let value = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err(CliError::MissingArgument(flag));
                    };
                    match flag {
                        'c' => args.script = ScriptSource::Inline(value),
                        's' => args.vars.push(parse_assignment(&value)?),
                        _ => args.messages.push(value),
                    }
                }

                c => return Err(CliError::UnknownOption(c)),
            }
            j += 1;
        }
        i += 1;
    }

    match positional.len() {
        0 => {}
        1 if args.script != ScriptSource::Stdin => return Err(CliError::TooManyArguments(1)),
        1 if positional[0] == "-" => {}
        1 => {
            args.script = ScriptSource::File(PathBuf::from(positional.remove(0)));
        }
        n => return Err(CliError::TooManyArguments(n)),
    }

    Ok(args)
}

fn parse_assignment(s: &str) -> Result<(String, String), CliError> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.to_owned()))
        }
        _ => Err(CliError::BadAssignment(s.to_owned())),
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Search for the session file in the standard locations.
/// Returns the first path that exists, or `None`.
pub fn find_session_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(p) = std::env::var("LOGIC_SESSION") {
        candidates.push(PathBuf::from(p));
    }
    if let Some(dirs) = directories::ProjectDirs::from("", "", "logic") {
        candidates.push(dirs.config_dir().join("session.logic"));
    }
    candidates.push(PathBuf::from("./session.logic"));
    candidates.into_iter().find(|p| p.exists())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
