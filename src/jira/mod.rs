//! JIRA REST collaborator - HTTP session, authentication probing, payloads

pub mod auth;
pub mod client;
pub mod models;

pub use auth::{candidate_strategies, is_redhat_host, AuthStrategy};
pub use client::JiraClient;
pub use models::{ServerInfo, User};
