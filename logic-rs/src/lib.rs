//! Embedded logic-script interpreter for chat macros.
//!
//! The core is [`script`]; [`var`] and [`history`] back the default
//! in-memory [`Session`](script::Session) host, and [`config`] / [`cli`] drive
//! the `logic` command-line runner.

pub mod cli;
pub mod config;
pub mod history;
pub mod pattern;
pub mod script;
pub mod var;

use script::{Host, Interpreter};

/// Run `script` against `host`, returning its output or a
/// `[Logic Error: …]` marker if a host capability failed.
pub fn run<H: Host + ?Sized>(host: &mut H, script: &str) -> String {
    Interpreter::new(host).run_or_marker(script)
}
