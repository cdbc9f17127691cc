//! CLI command implementations

pub mod auth;
pub mod boards;
pub mod completions;
pub mod filters;
pub mod utils;
