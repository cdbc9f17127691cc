//! CLI module - argument parsing, terminal console, and command dispatch

pub mod args;
pub mod commands;
pub mod console;
pub mod helpers;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts};
pub use console::TerminalConsole;
