//! JCL: Jira Cleanup
//!
//! Lists JIRA filters and boards as numbered tables, lets the user pick a
//! subset with range expressions like `1-3,6`, and deletes the picked items
//! after an explicit confirmation.

pub mod cli;
pub mod core;
pub mod jira;
