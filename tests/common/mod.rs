//! Shared test helpers for integration tests
//!
//! Command helpers for the binary, in-memory fakes for the workflow
//! collaborators, and a mock JIRA server for client tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::io;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;
use wiremock::{Mock, MockServer, Request};

use jcl::core::{
    AuthMode, Config, Console, Item, ItemKind, ItemProvider, ItemQuery, PartialConfig,
    ProviderError,
};

const JIRA_VARS: &[&str] = &[
    "JIRA_URL",
    "JIRA_USERNAME",
    "JIRA_EMAIL",
    "JIRA_USER",
    "JIRA_API_TOKEN",
    "JIRA_TOKEN",
    "JIRA_AUTH",
    "JIRA_BOARD_FILTER",
    "JIRA_TIMEOUT",
    "JCL_CONFIG",
    "RUST_LOG",
];

/// Helper to get a jcl command isolated from the user's environment
///
/// Runs inside `home` with HOME and XDG_CONFIG_HOME pointing there, so no
/// real config file or `.env` is picked up.
pub fn jcl(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("jcl"));
    for var in JIRA_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

/// Build a validated config for `url`
pub fn test_config(url: &str, username: Option<&str>, auth: AuthMode) -> Config {
    PartialConfig {
        url: Some(url.to_string()),
        username: username.map(String::from),
        token: Some("secret-token".to_string()),
        auth: Some(auth),
        timeout_secs: Some(5),
        ..Default::default()
    }
    .build()
    .unwrap()
}

pub fn filters(names: &[&str]) -> Vec<Item> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Item::filter((10000 + i).to_string(), *name))
        .collect()
}

pub fn boards(names: &[&str]) -> Vec<Item> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Item::board((i + 1).to_string(), *name))
        .collect()
}

// ============================================================================
// Fake provider
// ============================================================================

/// In-memory provider that records every call
#[derive(Default)]
pub struct FakeProvider {
    pub items: Vec<Item>,
    /// Ids whose delete call fails with a 403
    pub failing: HashSet<String>,
    /// Fail fetch_collection with a 500
    pub fetch_fails: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeProvider {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Ids passed to delete_item, in call order
    pub fn deleted_ids(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| c.strip_prefix("delete:").map(String::from))
            .collect()
    }
}

impl ItemProvider for FakeProvider {
    fn fetch_collection(&self, query: &ItemQuery) -> Result<Vec<Item>, ProviderError> {
        self.calls
            .borrow_mut()
            .push(format!("fetch:{}", query.kind.name_plural()));
        if self.fetch_fails {
            return Err(ProviderError::Http {
                status: 500,
                url: "https://jira.example.com".to_string(),
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(self.items.clone())
    }

    fn fetch_item(&self, kind: ItemKind, id: &str) -> Result<Item, ProviderError> {
        self.calls.borrow_mut().push(format!("get:{}", id));
        self.items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(ProviderError::NotFound {
                kind,
                id: id.to_string(),
            })
    }

    fn delete_item(&self, _kind: ItemKind, id: &str) -> Result<(), ProviderError> {
        self.calls.borrow_mut().push(format!("delete:{}", id));
        if self.failing.contains(id) {
            return Err(ProviderError::Http {
                status: 403,
                url: format!("https://jira.example.com/item/{}", id),
                message: "Forbidden".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Scripted console
// ============================================================================

/// Console that answers prompts from a script and records all output
#[derive(Default)]
pub struct ScriptedConsole {
    pub answers: VecDeque<String>,
    /// Error returned once the answers run out (default: end of input)
    pub exhausted: Option<io::ErrorKind>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Fail with `kind` once the scripted answers run out
    pub fn then_failing(mut self, kind: io::ErrorKind) -> Self {
        self.exhausted = Some(kind);
        self
    }

    pub fn saw(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    pub fn warnings(&self) -> Vec<&String> {
        self.output
            .iter()
            .filter(|line| line.starts_with("warn: "))
            .collect()
    }
}

impl Console for ScriptedConsole {
    fn prompt_line(&mut self, message: &str) -> io::Result<String> {
        self.prompts.push(message.to_string());
        let kind = self.exhausted.unwrap_or(io::ErrorKind::UnexpectedEof);
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(kind, "script exhausted"))
    }

    fn print_table(&mut self, heading: &str, items: &[Item]) {
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        self.output
            .push(format!("table: {} [{}]", heading, ids.join(",")));
    }

    fn print_details(&mut self, item: &Item) {
        self.output.push(format!("details: {}", item.id));
    }

    fn info(&mut self, message: &str) {
        self.output.push(format!("info: {}", message));
    }

    fn success(&mut self, message: &str) {
        self.output.push(format!("success: {}", message));
    }

    fn warn(&mut self, message: &str) {
        self.output.push(format!("warn: {}", message));
    }
}

// ============================================================================
// Mock JIRA server
// ============================================================================

/// wiremock server driven from synchronous tests
///
/// The server runs on its own multi-threaded runtime so the blocking client
/// can be called from the test thread.
pub struct MockJira {
    // Dropped before the runtime it runs on
    server: MockServer,
    rt: tokio::runtime::Runtime,
}

impl MockJira {
    pub fn start() -> Self {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn received(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// Requests received with the given method and path
    pub fn received_at(&self, method: &str, path: &str) -> Vec<Request> {
        self.received()
            .into_iter()
            .filter(|r| r.method.as_str() == method && r.url.path() == path)
            .collect()
    }
}

/// Body of `/myself` for a user named Jane Doe
pub fn myself_body() -> serde_json::Value {
    serde_json::json!({
        "name": "jdoe",
        "displayName": "Jane Doe",
        "emailAddress": "jane@example.com",
        "active": true
    })
}
