//! Command-line interface module
//!
//! Argument parsing, the interactive shell and session selection.

pub mod args;
pub mod completion;
pub mod provider;
pub mod sessions;
pub mod shell;

pub use args::*;
pub use shell::{Shell, ShellExit};
