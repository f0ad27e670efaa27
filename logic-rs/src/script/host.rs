//! Host capabilities the interpreter consumes.
//!
//! The interpreter owns nothing between calls.  Variables, placeholder
//! substitution, and chat history all live behind [`Host`], so a test can
//! pass a double and an application can pass its own storage.

use super::error::Result;
use super::expand::expand;
use super::expr::EvalContext;
use super::interp::Interpreter;
use super::value::Value;
use crate::history::MessageHistory;
use crate::var::VarStore;

/// Capabilities supplied by the embedding application.
pub trait Host {
    /// Raw stored value of `name`, or `None` if unset.
    fn get_var(&self, name: &str) -> Result<Option<String>>;

    /// Store the raw string `value` under `name`.
    fn set_var(&mut self, name: &str, value: &str) -> Result<()>;

    /// Expand host placeholders in a live line.  Must return a line without
    /// placeholders unchanged.
    fn substitute(&mut self, line: &str) -> Result<String> {
        Ok(line.to_owned())
    }

    /// Text of the most recent chat message, `""` if there is none.
    fn last_message(&self) -> String {
        String::new()
    }

    /// Uniform draw in `[0, 1)` for `RANDOM`.
    fn random(&mut self) -> f64 {
        rand::random()
    }
}

/// Adapts a [`Host`] to the evaluator, coercing stored strings on read.
pub(crate) struct HostCtx<'a, H: Host + ?Sized>(pub(crate) &'a mut H);

impl<H: Host + ?Sized> EvalContext for HostCtx<'_, H> {
    fn get_var(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.0.get_var(name)?.map(|raw| Value::from_stored(&raw)))
    }

    fn random(&mut self) -> f64 {
        self.0.random()
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// In-memory host: a variable store plus chat history.
#[derive(Debug, Default, Clone)]
pub struct Session {
    pub vars: VarStore,
    pub history: MessageHistory,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `script` and return its output, or a `[Logic Error: …]` marker.
    pub fn run(&mut self, script: &str) -> String {
        Interpreter::new(self).run_or_marker(script)
    }
}

impl Host for Session {
    fn get_var(&self, name: &str) -> Result<Option<String>> {
        Ok(self.vars.get(name).map(str::to_owned))
    }

    fn set_var(&mut self, name: &str, value: &str) -> Result<()> {
        self.vars.set(name, value);
        Ok(())
    }

    fn substitute(&mut self, line: &str) -> Result<String> {
        Ok(expand(line, &mut self.vars, &self.history))
    }

    fn last_message(&self) -> String {
        self.history.last().to_owned()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trip() {
        let mut s = Session::new();
        s.set_var("x", "5").unwrap();
        assert_eq!(s.get_var("x").unwrap().as_deref(), Some("5"));
        assert_eq!(s.get_var("y").unwrap(), None);
    }

    #[test]
    fn host_ctx_coerces() {
        let mut s = Session::new();
        s.vars.set("x", "5");
        s.vars.set("flag", "true");
        let ctx = HostCtx(&mut s);
        assert_eq!(ctx.get_var("x").unwrap(), Some(Value::Num(5.0)));
        assert_eq!(ctx.get_var("flag").unwrap(), Some(Value::Bool(true)));
    }

    #[test]
    fn last_message_from_history() {
        let mut s = Session::new();
        assert_eq!(s.last_message(), "");
        s.history.record("hi there");
        assert_eq!(s.last_message(), "hi there");
    }

    #[test]
    fn session_run() {
        let mut s = Session::new();
        assert_eq!(s.run("SET x = 2\nIF x > 1\nSAY big\nEND"), "big");
    }
}
