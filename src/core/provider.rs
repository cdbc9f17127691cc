//! Item provider abstraction
//!
//! The deletion workflow talks to JIRA only through [`ItemProvider`], so the
//! same flow runs against the HTTP client in production and in-memory fakes
//! in tests.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::item::{BoardType, Item, ItemKind};

/// Errors raised by an item provider
#[derive(Debug, Error, Diagnostic)]
pub enum ProviderError {
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    #[error("{kind} {id} not found or access denied")]
    #[diagnostic(help("Check the id and that your account has permission to view it"))]
    NotFound { kind: ItemKind, id: String },

    #[error("Request to {url} failed: {message}")]
    #[diagnostic(help("Check the JIRA URL and your network connection (VPN?)"))]
    Transport { url: String, message: String },

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Authentication failed against {url} (tried: {})", .tried.join(", "))]
    #[diagnostic(help(
        "Atlassian Cloud expects your email and an API token (basic auth); \
         Red Hat JIRA expects a Personal Access Token (bearer auth). \
         Force one with --auth basic|bearer"
    ))]
    AuthenticationFailed { url: String, tried: Vec<String> },
}

impl ProviderError {
    /// True for HTTP 401/403 responses
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ProviderError::Http { status, .. } if *status == 401 || *status == 403)
    }
}

/// What to fetch, with optional server-side narrowing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub kind: ItemKind,
    /// Server-side name search (filters: `filterName`, boards: `name`)
    pub name: Option<String>,
    /// Board type restriction (boards only)
    pub board_type: Option<BoardType>,
    /// Project key or id restriction (boards only)
    pub project: Option<String>,
}

impl ItemQuery {
    /// The user's favourite filters
    pub fn filters() -> Self {
        Self::new(ItemKind::Filter)
    }

    /// All boards visible to the user
    pub fn boards() -> Self {
        Self::new(ItemKind::Board)
    }

    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            name: None,
            board_type: None,
            project: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_board_type(mut self, board_type: Option<BoardType>) -> Self {
        self.board_type = board_type;
        self
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project.filter(|p| !p.trim().is_empty());
        self
    }
}

/// Source and sink of filters and boards
pub trait ItemProvider {
    /// Fetch the collection described by `query`, in API order
    fn fetch_collection(&self, query: &ItemQuery) -> Result<Vec<Item>, ProviderError>;

    /// Fetch one item with its full details
    fn fetch_item(&self, kind: ItemKind, id: &str) -> Result<Item, ProviderError>;

    /// Delete one item
    fn delete_item(&self, kind: ItemKind, id: &str) -> Result<(), ProviderError>;
}
