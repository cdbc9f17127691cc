//! Authentication strategies and the order they are tried in
//!
//! Atlassian Cloud and most servers take basic auth (username + API token).
//! Red Hat's JIRA only accepts Personal Access Tokens sent as bearer tokens.

use std::fmt;

use reqwest::blocking::RequestBuilder;

use crate::core::config::{AuthMode, Config};

/// One way of attaching credentials to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    Basic,
    Bearer,
}

impl AuthStrategy {
    /// Attach credentials to `request`
    pub fn apply(&self, request: RequestBuilder, username: Option<&str>, token: &str) -> RequestBuilder {
        match self {
            AuthStrategy::Basic => request.basic_auth(username.unwrap_or_default(), Some(token)),
            AuthStrategy::Bearer => request.bearer_auth(token),
        }
    }

    /// Human-readable description for status output
    pub fn describe(&self) -> &'static str {
        match self {
            AuthStrategy::Basic => "Basic auth (username + API token)",
            AuthStrategy::Bearer => "Bearer token (Personal Access Token)",
        }
    }
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStrategy::Basic => write!(f, "basic"),
            AuthStrategy::Bearer => write!(f, "bearer"),
        }
    }
}

/// True for Red Hat's JIRA, which wants bearer tokens
pub fn is_redhat_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_lowercase();
    host == "redhat.com" || host.ends_with(".redhat.com")
}

/// Strategies to try, in order, for `config`
///
/// An explicit mode yields exactly that strategy. `Auto` puts the likely
/// scheme for the host first and the other one second. Basic auth is only a
/// candidate when a username is configured.
pub fn candidate_strategies(config: &Config) -> Vec<AuthStrategy> {
    let ordered = match config.auth {
        AuthMode::Basic => vec![AuthStrategy::Basic],
        AuthMode::Bearer => vec![AuthStrategy::Bearer],
        AuthMode::Auto => {
            if config.host().is_some_and(|h| is_redhat_host(&h)) {
                vec![AuthStrategy::Bearer, AuthStrategy::Basic]
            } else {
                vec![AuthStrategy::Basic, AuthStrategy::Bearer]
            }
        }
    };

    ordered
        .into_iter()
        .filter(|s| *s != AuthStrategy::Basic || config.username.is_some())
        .collect()
}
