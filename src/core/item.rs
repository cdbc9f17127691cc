//! Item model - the filters and boards the tool lists and deletes

use std::fmt;

use clap::ValueEnum;

/// The kind of JIRA object an item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Filter,
    Board,
}

impl ItemKind {
    /// Singular label for messages (e.g., "filter")
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Filter => "filter",
            ItemKind::Board => "board",
        }
    }

    /// Plural label for messages (e.g., "filters")
    pub fn name_plural(&self) -> &'static str {
        match self {
            ItemKind::Filter => "filters",
            ItemKind::Board => "boards",
        }
    }

    /// Label with a count-aware suffix, matching the "filter(s)" wording of prompts
    pub fn counted(&self, count: usize) -> String {
        if count == 1 {
            format!("1 {}", self.name())
        } else {
            format!("{} {}", count, self.name_plural())
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Agile board type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoardType {
    Scrum,
    Kanban,
    Simple,
}

impl BoardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardType::Scrum => "scrum",
            BoardType::Kanban => "kanban",
            BoardType::Simple => "simple",
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Project a board is located in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectLocation {
    pub name: Option<String>,
    pub key: Option<String>,
    pub project_id: Option<String>,
}

impl fmt::Display for ProjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("N/A");
        match &self.key {
            Some(key) => write!(f, "{} ({})", name, key),
            None => write!(f, "{}", name),
        }
    }
}

/// Kind-specific fields carried alongside the id and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemDetails {
    Filter {
        owner: Option<String>,
        description: Option<String>,
        jql: Option<String>,
        favourite: bool,
        subscriptions: usize,
    },
    Board {
        board_type: Option<String>,
        project: Option<ProjectLocation>,
    },
}

/// A filter or board as returned by the API
///
/// Items are positionally addressed by the selection prompt, so a `Vec<Item>`
/// always keeps the API response order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub details: ItemDetails,
}

impl Item {
    /// Create a filter item with no optional details
    pub fn filter(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            details: ItemDetails::Filter {
                owner: None,
                description: None,
                jql: None,
                favourite: false,
                subscriptions: 0,
            },
        }
    }

    /// Create a board item with no optional details
    pub fn board(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            details: ItemDetails::Board {
                board_type: None,
                project: None,
            },
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self.details {
            ItemDetails::Filter { .. } => ItemKind::Filter,
            ItemDetails::Board { .. } => ItemKind::Board,
        }
    }

    /// Owner display name (filters only)
    pub fn owner(&self) -> Option<&str> {
        match &self.details {
            ItemDetails::Filter { owner, .. } => owner.as_deref(),
            ItemDetails::Board { .. } => None,
        }
    }

    /// Board type (boards only)
    pub fn board_type(&self) -> Option<&str> {
        match &self.details {
            ItemDetails::Board { board_type, .. } => board_type.as_deref(),
            ItemDetails::Filter { .. } => None,
        }
    }

    /// Project location (boards only)
    pub fn project(&self) -> Option<&ProjectLocation> {
        match &self.details {
            ItemDetails::Board { project, .. } => project.as_ref(),
            ItemDetails::Filter { .. } => None,
        }
    }

    /// One-line summary of the kind-specific fields, used in tables
    pub fn summary(&self) -> String {
        match &self.details {
            ItemDetails::Filter { owner, .. } => {
                format!("Owner: {}", owner.as_deref().unwrap_or("N/A"))
            }
            ItemDetails::Board {
                board_type,
                project,
            } => {
                let project = project
                    .as_ref()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                format!(
                    "Type: {} | Project: {}",
                    board_type.as_deref().unwrap_or("N/A"),
                    project
                )
            }
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_details() {
        assert_eq!(Item::filter("1", "a").kind(), ItemKind::Filter);
        assert_eq!(Item::board("2", "b").kind(), ItemKind::Board);
    }

    #[test]
    fn test_counted_labels() {
        assert_eq!(ItemKind::Filter.counted(1), "1 filter");
        assert_eq!(ItemKind::Board.counted(3), "3 boards");
        assert_eq!(ItemKind::Board.counted(0), "0 boards");
    }

    #[test]
    fn test_board_summary() {
        let mut board = Item::board("42", "Team Board");
        board.details = ItemDetails::Board {
            board_type: Some("scrum".to_string()),
            project: Some(ProjectLocation {
                name: Some("Platform".to_string()),
                key: Some("PLAT".to_string()),
                project_id: Some("10001".to_string()),
            }),
        };
        assert_eq!(board.summary(), "Type: scrum | Project: Platform (PLAT)");
        assert_eq!(board.board_type(), Some("scrum"));
        assert!(board.owner().is_none());
    }

    #[test]
    fn test_filter_summary_without_owner() {
        let filter = Item::filter("10000", "My open bugs");
        assert_eq!(filter.summary(), "Owner: N/A");
        assert_eq!(filter.to_string(), "My open bugs (ID: 10000)");
    }
}
