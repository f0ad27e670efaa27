use std::io::Read;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use logic::cli::{self, ScriptSource, SessionFile};
use logic::config::Config;
use logic::script::Session;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("logic: {e}");
            eprintln!(
                "Usage: logic [-d] [-f[<session>]] [-s<name>=<value>]... [-m<message>]... [-c<script> | <file> | -]"
            );
            std::process::exit(1);
        }
    };

    // ── Logging (stderr; LOGIC_LOG, then RUST_LOG, default warn) ─────────────
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("LOGIC_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // ── Load the session file ────────────────────────────────────────────────
    let session_path = match args.session {
        SessionFile::Skip => None,
        SessionFile::Explicit(path) => Some(path),
        SessionFile::Search => cli::find_session_file(),
    };
    let mut session = match session_path {
        Some(path) => match Config::load_file(&path) {
            Ok((config, errors)) => {
                for e in &errors {
                    warn!(file = %path.display(), "{e}");
                }
                debug!(file = %path.display(), vars = config.vars.len(), "session loaded");
                config.into_session()
            }
            Err(e) => {
                eprintln!("logic: {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Session::new(),
    };

    // ── Command-line overrides ───────────────────────────────────────────────
    for (name, value) in args.vars {
        session.vars.set(name, value);
    }
    for message in args.messages {
        session.history.record(message);
    }

    // ── Read and run the script ──────────────────────────────────────────────
    let script = match args.script {
        ScriptSource::Inline(text) => text,
        ScriptSource::File(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("logic: {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        ScriptSource::Stdin => {
            let mut text = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut text) {
                eprintln!("logic: stdin: {e}");
                std::process::exit(1);
            }
            text
        }
    };

    println!("{}", session.run(&script));
}
