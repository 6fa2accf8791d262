//! Tierlist CLI library.
//!
//! Session commands (`begin`, `add`, `show`, ...) share one grammar between
//! the interactive REPL and replayed scripts. Each command runs against a
//! single in-memory manager and reports a `Result: <STATUS>` line.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use commands::{Outcome, Session, SessionCommand};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
