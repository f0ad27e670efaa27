//! Collaborator failures.
//!
//! Malformed script text never produces an error; it degrades to inline
//! markers or no-ops.  A [`ScriptError`] only means a host capability
//! (variable store, substitution) failed, and it aborts the whole run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    /// The variable store could not be read or written.
    #[error("variable store: {0}")]
    Store(String),

    /// The host's text-substitution pass failed.
    #[error("substitution failed: {0}")]
    Substitution(String),
}

pub type Result<T> = std::result::Result<T, ScriptError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
