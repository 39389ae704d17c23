//! Interactive modes.
//!
//! - `repl`: line-oriented chat loop over a `SessionRuntime`
//! - `input`: parsing of typed lines into commands
//! - `view`: incremental rendering of `SessionState` to a writer

pub mod input;
pub mod repl;
pub mod view;
