//! Logic scripting language.
//!
//! A small line-oriented directive language for chat macros:
//!
//! - `IF` … `ELSE IF` … `ELSE` … `END`, nestable
//! - `SAY text` appends to the output
//! - `SET name = value` and `SETVAR name value` write variables
//! - Conditions are a single comparison: `LEFT OP RIGHT`
//!
//! # Quick start
//!
//! ```rust
//! use logic::script::Session;
//!
//! let mut session = Session::new();
//! let out = session.run("SET hp = 3\nIF hp < 5\nSAY \"low health\"\nEND");
//! assert_eq!(out, "low health");
//! ```

pub mod error;
pub mod expand;
pub mod expr;
pub mod host;
pub mod interp;
pub mod stmt;
pub mod value;

// Re-exports for convenience.
pub use error::ScriptError;
pub use expr::EvalContext;
pub use host::{Host, Session};
pub use interp::Interpreter;
pub use value::Value;
