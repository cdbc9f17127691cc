//! JIRA REST payloads
//!
//! Only the fields the tool displays are modelled; everything else in the
//! responses is ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::item::{Item, ItemDetails, ProjectLocation};

/// Ids arrive as strings for filters and as numbers for boards
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Number(i64),
}

impl From<IdValue> for String {
    fn from(id: IdValue) -> Self {
        match id {
            IdValue::Text(s) => s,
            IdValue::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    /// Server/Data Center username
    pub name: Option<String>,
    /// Cloud account id
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub id: IdValue,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub jql: Option<String>,
    #[serde(default)]
    pub favourite: bool,
    #[serde(default)]
    pub owner: Option<User>,
    /// A list on some servers, a `{size, items}` object on others
    #[serde(default)]
    pub subscriptions: Option<serde_json::Value>,
}

impl Filter {
    fn subscription_count(&self) -> usize {
        match &self.subscriptions {
            Some(serde_json::Value::Array(items)) => items.len(),
            Some(serde_json::Value::Object(map)) => map
                .get("size")
                .and_then(|s| s.as_u64())
                .map(|s| s as usize)
                .or_else(|| map.get("items").and_then(|i| i.as_array()).map(|i| i.len()))
                .unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<Filter> for Item {
    fn from(filter: Filter) -> Self {
        let subscriptions = filter.subscription_count();
        Item {
            id: filter.id.into(),
            name: filter.name,
            details: ItemDetails::Filter {
                owner: filter.owner.and_then(|o| o.display_name),
                description: filter.description.filter(|d| !d.is_empty()),
                jql: filter.jql,
                favourite: filter.favourite,
                subscriptions,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocation {
    pub project_id: Option<IdValue>,
    pub name: Option<String>,
    pub project_name: Option<String>,
    pub key: Option<String>,
    pub project_key: Option<String>,
}

impl From<BoardLocation> for ProjectLocation {
    fn from(location: BoardLocation) -> Self {
        ProjectLocation {
            name: location.project_name.or(location.name),
            key: location.project_key.or(location.key),
            project_id: location.project_id.map(String::from),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: IdValue,
    pub name: String,
    #[serde(rename = "type", default)]
    pub board_type: Option<String>,
    #[serde(default)]
    pub location: Option<BoardLocation>,
}

impl From<Board> for Item {
    fn from(board: Board) -> Self {
        Item {
            id: board.id.into(),
            name: board.name,
            details: ItemDetails::Board {
                board_type: board.board_type,
                project: board.location.map(ProjectLocation::from),
            },
        }
    }
}

/// One page of a paginated collection
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    #[serde(default)]
    pub start_at: Option<u64>,
    #[serde(default)]
    pub max_results: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub is_last: Option<bool>,
}

impl<T> Page<T> {
    /// True when no further page should be requested after this one
    pub fn is_final(&self, start_at: u64) -> bool {
        if self.values.is_empty() || self.is_last == Some(true) {
            return true;
        }
        match self.total {
            Some(total) => start_at + self.values.len() as u64 >= total,
            // No isLast and no total: a short page is the last one
            None => self.is_last.is_none()
                && self.max_results.is_some_and(|max| (self.values.len() as u64) < max),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub server_title: Option<String>,
    pub version: Option<String>,
    pub deployment_type: Option<String>,
}

/// Standard JIRA error body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, serde_json::Value>,
}

impl ErrorBody {
    /// All messages joined with "; ", or None if the body carried none
    pub fn summary(&self) -> Option<String> {
        let mut parts: Vec<String> = self.error_messages.clone();
        for (field, value) in &self.errors {
            match value.as_str() {
                Some(msg) => parts.push(format!("{}: {}", field, msg)),
                None => parts.push(format!("{}: {}", field, value)),
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}
