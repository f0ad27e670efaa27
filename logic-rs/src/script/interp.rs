//! Logic script interpreter.
//!
//! The [`Interpreter`] walks the script line by line without building a
//! tree.  Nested `IF` blocks are tracked by a [`FrameStack`]: `IF` pushes a
//! frame, `END` pops it, and `ELSE IF` / `ELSE` flip the top frame.  Lines
//! inside a suppressed frame are skipped, except that the block keywords are
//! still recognised so nesting stays balanced.

use std::borrow::Cow;

use tracing::{debug, debug_span, trace, warn};

use super::{
    error::Result,
    expr::evaluate,
    host::{Host, HostCtx},
    stmt::{parse_set, parse_setvar, strip_quotes, Directive},
};

/// Keyword replaced by the quoted last chat message inside conditions.
pub const LAST_MESSAGE: &str = "LAST_MESSAGE";

pub const ELSE_IF_WITHOUT_IF: &str = "[Error: ELSE IF without IF]";
pub const ELSE_WITHOUT_IF: &str = "[Error: ELSE without IF]";

// ── Frames ────────────────────────────────────────────────────────────────────

/// State of one conditional nesting level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    /// Output and variable writes in this frame are skipped.
    pub suppressed: bool,
    /// Some branch at this level has already been taken.
    pub any_branch_matched: bool,
}

impl Frame {
    /// A frame that can no longer become active.  Marked as matched so no
    /// later `ELSE` at this level can wake it.
    fn dead() -> Self {
        Frame {
            suppressed: true,
            any_branch_matched: true,
        }
    }

    fn branch(taken: bool) -> Self {
        Frame {
            suppressed: !taken,
            any_branch_matched: taken,
        }
    }
}

/// Stack of [`Frame`]s.  The base frame is never popped.
#[derive(Debug, Clone)]
pub struct FrameStack {
    frames: Vec<Frame>,
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStack {
    pub fn new() -> Self {
        FrameStack {
            frames: vec![Frame::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn top(&self) -> Frame {
        self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let i = self.frames.len() - 1;
        &mut self.frames[i]
    }

    /// The frame enclosing the top one, if any.
    pub fn parent(&self) -> Option<Frame> {
        self.frames.iter().rev().nth(1).copied()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Pop the top frame.  Returns `false` (and does nothing) at the base.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Whether an `ELSE IF` here would actually need its condition.
    fn else_if_is_live(&self) -> bool {
        match self.parent() {
            Some(parent) => !parent.suppressed && !self.top().any_branch_matched,
            None => false,
        }
    }
}

// ── Interpreter ───────────────────────────────────────────────────────────────

/// Per-call state; discarded when the run ends.
#[derive(Debug, Default)]
struct RunState {
    frames: FrameStack,
    output: String,
}

impl RunState {
    fn say(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push(' ');
    }
}

/// Executes logic scripts against a [`Host`].
pub struct Interpreter<'h, H: Host + ?Sized> {
    host: &'h mut H,
}

impl<'h, H: Host + ?Sized> Interpreter<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        Self { host }
    }

    /// Run `script` and return the trimmed output.
    ///
    /// Malformed lines never fail the run.  An error means a host capability
    /// failed, and whatever output had accumulated is discarded.
    pub fn run(&mut self, script: &str) -> Result<String> {
        let _span = debug_span!("logic_run").entered();
        let mut st = RunState::default();

        for line in script.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if st.frames.top().suppressed {
                self.exec_suppressed(line, &mut st)?;
            } else {
                let expanded = self.host.substitute(line)?;
                self.exec_live(expanded.trim(), &mut st)?;
            }
        }

        if st.frames.depth() > 1 {
            debug!(open = st.frames.depth() - 1, "script ended with unclosed IF blocks");
        }
        Ok(st.output.trim().to_owned())
    }

    /// Like [`run`](Self::run), but a host failure becomes a single
    /// `[Logic Error: …]` string in place of the whole output.
    pub fn run_or_marker(&mut self, script: &str) -> String {
        match self.run(script) {
            Ok(out) => out,
            Err(e) => {
                warn!(error = %e, "logic script aborted");
                format!("[Logic Error: {e}]")
            }
        }
    }

    /// Execute a line in an active frame.  `line` is already substituted.
    fn exec_live(&mut self, line: &str, st: &mut RunState) -> Result<()> {
        let directive = Directive::parse(line);
        trace!(line, ?directive, "exec");
        match directive {
            Directive::If(cond) => {
                let taken = self.eval_cond(cond)?;
                st.frames.push(Frame::branch(taken));
            }
            Directive::ElseIf(cond) => self.enter_else(st, ELSE_IF_WITHOUT_IF, Some(cond))?,
            Directive::Else => self.enter_else(st, ELSE_WITHOUT_IF, None)?,
            Directive::End => end_block(st),
            Directive::Say(text) => st.say(strip_quotes(text.trim())),
            Directive::Set(args) => match parse_set(args) {
                Some((name, value)) => self.host.set_var(name, value)?,
                None => trace!(args, "malformed SET ignored"),
            },
            Directive::SetVar(args) => match parse_setvar(args) {
                Some((name, value)) => self.host.set_var(name, &value.to_string())?,
                None => trace!(args, "malformed SETVAR ignored"),
            },
            Directive::Unknown => {}
        }
        Ok(())
    }

    /// Execute a line in a suppressed frame.  Only block keywords matter and
    /// nothing is substituted, with one exception: an `ELSE IF` that could
    /// still wake its frame is substituted and evaluated.
    fn exec_suppressed(&mut self, line: &str, st: &mut RunState) -> Result<()> {
        match Directive::parse_structural(line) {
            Directive::If(_) => st.frames.push(Frame::dead()),
            Directive::ElseIf(_) if st.frames.else_if_is_live() => {
                let expanded = self.host.substitute(line)?;
                let cond = match Directive::parse_structural(expanded.trim()) {
                    Directive::ElseIf(cond) => cond.to_owned(),
                    _ => String::new(),
                };
                self.enter_else(st, ELSE_IF_WITHOUT_IF, Some(cond.as_str()))?;
            }
            Directive::ElseIf(_) => self.enter_else(st, ELSE_IF_WITHOUT_IF, None)?,
            Directive::Else => self.enter_else(st, ELSE_WITHOUT_IF, None)?,
            Directive::End => end_block(st),
            _ => trace!(line, "skipped"),
        }
        Ok(())
    }

    /// Shared `ELSE IF` / `ELSE` logic.  `cond` is `None` for `ELSE`, and
    /// also for an `ELSE IF` whose condition cannot matter.
    fn enter_else(&mut self, st: &mut RunState, marker: &str, cond: Option<&str>) -> Result<()> {
        let Some(parent) = st.frames.parent() else {
            debug!(marker, "branch keyword outside IF");
            st.say(marker);
            return Ok(());
        };
        let top = st.frames.top();
        let next = if parent.suppressed || top.any_branch_matched {
            Frame::dead()
        } else {
            let taken = match cond {
                Some(c) => self.eval_cond(c)?,
                None => true,
            };
            Frame::branch(taken)
        };
        *st.frames.top_mut() = next;
        Ok(())
    }

    fn eval_cond(&mut self, cond: &str) -> Result<bool> {
        let cond = self.with_last_message(cond);
        evaluate(&cond, &mut HostCtx(&mut *self.host))
    }

    /// Replace `LAST_MESSAGE` with the quoted last chat message.  Double
    /// quotes inside the message become single quotes.
    fn with_last_message<'c>(&self, cond: &'c str) -> Cow<'c, str> {
        if !cond.contains(LAST_MESSAGE) {
            return Cow::Borrowed(cond);
        }
        let msg = self.host.last_message().replace('"', "'");
        Cow::Owned(cond.replace(LAST_MESSAGE, &format!("\"{msg}\"")))
    }
}

fn end_block(st: &mut RunState) {
    if !st.frames.pop() {
        debug!("END without IF ignored");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
