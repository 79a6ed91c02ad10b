//! Library half of the `qtsel` command-line tool.
//!
//! Logging setup, settings loading, the on-disk metadata source and the
//! [`Session`](session::Session) that drives selection state from it.

pub mod logging;
pub mod session;
pub mod settings;
pub mod source;
