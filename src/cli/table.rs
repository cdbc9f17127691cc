//! Numbered item tables

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{or_na, truncate_str};
use crate::core::item::{Item, ItemDetails, ItemKind};

/// Longest name shown before truncation
const NAME_WIDTH: usize = 50;

#[derive(Tabled)]
struct FilterRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "OWNER")]
    owner: String,
}

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "TYPE")]
    board_type: String,
    #[tabled(rename = "PROJECT")]
    project: String,
}

/// Render `items` as a table numbered from 1
///
/// The column set follows the kind of the first item; an empty slice renders
/// as an empty string.
pub fn render_items(items: &[Item]) -> String {
    let Some(first) = items.first() else {
        return String::new();
    };

    let mut table = match first.kind() {
        ItemKind::Filter => Table::new(items.iter().enumerate().map(|(i, item)| {
            FilterRow {
                index: i + 1,
                name: truncate_str(&item.name, NAME_WIDTH),
                id: item.id.clone(),
                owner: or_na(item.owner()).to_string(),
            }
        })),
        ItemKind::Board => Table::new(items.iter().enumerate().map(|(i, item)| {
            BoardRow {
                index: i + 1,
                name: truncate_str(&item.name, NAME_WIDTH),
                id: item.id.clone(),
                board_type: or_na(item.board_type()).to_string(),
                project: item
                    .project()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            }
        })),
    };
    table.with(Style::sharp());
    table.to_string()
}

/// Field/value pairs for the single-item detail view
pub fn detail_lines(item: &Item) -> Vec<(&'static str, String)> {
    let mut lines = vec![("Name", item.name.clone()), ("ID", item.id.clone())];

    match &item.details {
        ItemDetails::Filter {
            owner,
            description,
            jql,
            favourite,
            subscriptions,
        } => {
            lines.push(("Owner", or_na(owner.as_deref()).to_string()));
            if let Some(description) = description {
                lines.push(("Description", description.clone()));
            }
            lines.push(("JQL", or_na(jql.as_deref()).to_string()));
            lines.push(("Favourite", if *favourite { "yes" } else { "no" }.to_string()));
            lines.push(("Subscriptions", subscriptions.to_string()));
        }
        ItemDetails::Board {
            board_type,
            project,
        } => {
            lines.push(("Type", or_na(board_type.as_deref()).to_string()));
            match project {
                Some(project) => {
                    lines.push(("Project", project.to_string()));
                    if let Some(id) = &project.project_id {
                        lines.push(("Project ID", id.clone()));
                    }
                }
                None => lines.push(("Project", "N/A".to_string())),
            }
        }
    }

    lines
}
