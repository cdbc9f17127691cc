//! Confirm-then-delete workflow
//!
//! A run moves through `Listed -> Selected -> Confirmed | Declined`, and a
//! confirmed run goes on to `Deleting -> Done`. Deletions happen one at a time
//! in ascending selection order; a failed delete is recorded and the loop
//! moves on to the next item.

use std::io;

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::console::Console;
use crate::core::item::{Item, ItemKind};
use crate::core::lister::filter_items;
use crate::core::provider::{ItemProvider, ItemQuery, ProviderError};
use crate::core::selection::parse_selection;

/// Fatal errors that end a run
#[derive(Debug, Error, Diagnostic)]
pub enum FlowError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Provider(#[from] ProviderError),

    #[error("Console error: {0}")]
    Console(#[from] io::Error),
}

/// A delete call that failed
#[derive(Debug)]
pub struct FailedDeletion {
    pub item: Item,
    pub error: ProviderError,
}

/// Per-item results of a deletion batch
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub succeeded: Vec<Item>,
    pub failed: Vec<FailedDeletion>,
}

impl DeletionReport {
    /// Number of delete calls made
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// How a run ended
#[derive(Debug)]
pub enum Outcome {
    /// The collection (after filtering) was empty
    NothingFound,
    /// The user entered an empty selection
    NoSelection,
    /// The user did not confirm
    Declined,
    /// Deletions were attempted
    Completed(DeletionReport),
}

impl Outcome {
    /// The deletion report, if deletions were attempted
    pub fn report(&self) -> Option<&DeletionReport> {
        match self {
            Outcome::Completed(report) => Some(report),
            _ => None,
        }
    }

    /// The deletion report, empty unless deletions were attempted
    pub fn into_report(self) -> DeletionReport {
        match self {
            Outcome::Completed(report) => report,
            _ => DeletionReport::default(),
        }
    }
}

/// True only for "y" or "yes", ignoring case and surrounding whitespace
pub fn is_confirmation(input: &str) -> bool {
    let answer = input.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// True when the user abandoned a prompt (Ctrl-C or closed input)
pub fn is_cancellation(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof
    )
}

/// Prompt for one line; `None` when the user cancelled
fn prompt(console: &mut dyn Console, message: &str) -> Result<Option<String>, FlowError> {
    match console.prompt_line(message) {
        Ok(line) => Ok(Some(line)),
        Err(e) if is_cancellation(&e) => {
            debug!(error = %e, "prompt cancelled");
            console.info("Operation cancelled");
            Ok(None)
        }
        Err(e) => Err(FlowError::Console(e)),
    }
}

/// Delete each item in order, recording every result
pub fn delete_items(
    provider: &dyn ItemProvider,
    console: &mut dyn Console,
    kind: ItemKind,
    items: &[Item],
) -> DeletionReport {
    let mut report = DeletionReport::default();

    for (index, item) in items.iter().enumerate() {
        debug!(kind = %kind, id = %item.id, position = index + 1, "deleting");
        console.info(&format!("Deleting '{}' ({}/{})...", item.name, index + 1, items.len()));

        match provider.delete_item(kind, &item.id) {
            Ok(()) => {
                info!(kind = %kind, id = %item.id, name = %item.name, "deleted");
                console.success(&format!("{} deleted", item));
                report.succeeded.push(item.clone());
            }
            Err(error) => {
                warn!(kind = %kind, id = %item.id, error = %error, "delete failed");
                console.warn(&format!("Failed to delete {}: {}", item, error));
                report.failed.push(FailedDeletion {
                    item: item.clone(),
                    error,
                });
            }
        }
    }

    report
}

/// Show `selected`, ask for confirmation, and delete on an explicit yes
pub fn confirm_and_delete(
    provider: &dyn ItemProvider,
    console: &mut dyn Console,
    kind: ItemKind,
    selected: &[Item],
) -> Result<Outcome, FlowError> {
    if selected.is_empty() {
        return Ok(Outcome::NoSelection);
    }

    let count = kind.counted(selected.len());
    console.print_table(&format!("You are about to delete {}:", count), selected);
    console.warn(&format!(
        "Deleting {} permanently removes them from JIRA",
        kind.name_plural()
    ));

    let Some(answer) = prompt(console, &format!("Delete {}? (yes/no)", count))? else {
        return Ok(Outcome::Declined);
    };
    if !is_confirmation(&answer) {
        debug!(answer = %answer.trim(), "declined");
        console.info("Deletion cancelled");
        return Ok(Outcome::Declined);
    }

    info!(kind = %kind, count = selected.len(), "deletion confirmed");
    Ok(Outcome::Completed(delete_items(
        provider, console, kind, selected,
    )))
}

/// List, select, confirm, and delete
///
/// Provider errors while fetching are fatal. Invalid selections are reported
/// and the prompt is repeated; an empty or cancelled selection ends the run.
pub fn run_interactive_deletion_flow(
    provider: &dyn ItemProvider,
    console: &mut dyn Console,
    query: &ItemQuery,
    filter: Option<&str>,
) -> Result<Outcome, FlowError> {
    let kind = query.kind;

    let fetched = provider.fetch_collection(query)?;
    debug!(kind = %kind, fetched = fetched.len(), "collection fetched");
    let items = filter_items(fetched, filter);

    if items.is_empty() {
        match filter.map(str::trim).filter(|f| !f.is_empty()) {
            Some(f) => console.info(&format!("No {} found containing '{}'", kind.name_plural(), f)),
            None => console.info(&format!("No {} found", kind.name_plural())),
        }
        return Ok(Outcome::NothingFound);
    }

    console.print_table(&format!("Found {}:", kind.counted(items.len())), &items);
    console.info(&format!(
        "Select by number (3), range (1-5), list (2,4,7) or combined (1-3,6-8). All: 1-{}",
        items.len()
    ));

    let message = format!("Select {} to delete (1-{})", kind.name_plural(), items.len());
    let selection = loop {
        let Some(input) = prompt(console, &message)? else {
            return Ok(Outcome::NoSelection);
        };
        match parse_selection(&input, items.len()) {
            Ok(selection) => break selection,
            Err(e) => console.warn(&e.to_string()),
        }
    };

    if selection.is_empty() {
        console.info("No selection made");
        return Ok(Outcome::NoSelection);
    }
    debug!(positions = ?selection.to_vec(), "selected");

    let mut selected: Vec<Item> = selection.resolve(&items).into_iter().cloned().collect();

    // A single pick gets the full detail view, as with delete-by-id
    if let [only] = selected.as_mut_slice() {
        match provider.fetch_item(kind, &only.id) {
            Ok(detailed) => {
                console.print_details(&detailed);
                *only = detailed;
            }
            Err(e) => console.warn(&format!("Could not load details for {}: {}", only, e)),
        }
    }

    confirm_and_delete(provider, console, kind, &selected)
}

/// Fetch one item by id, show it, and run it through confirm-and-delete
pub fn delete_by_id(
    provider: &dyn ItemProvider,
    console: &mut dyn Console,
    kind: ItemKind,
    id: &str,
) -> Result<Outcome, FlowError> {
    let item = provider.fetch_item(kind, id.trim())?;
    console.print_details(&item);
    confirm_and_delete(provider, console, kind, std::slice::from_ref(&item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_accepts_only_yes() {
        for yes in ["y", "Y", "yes", "YES", "Yes", "  y  ", "yEs\n"] {
            assert!(is_confirmation(yes), "{yes:?} should confirm");
        }
        for no in ["", "n", "N", "no", "nope", "ye", "yes please", "1", "true"] {
            assert!(!is_confirmation(no), "{no:?} should decline");
        }
    }

    #[test]
    fn test_cancellation_kinds() {
        assert!(is_cancellation(&io::Error::from(io::ErrorKind::Interrupted)));
        assert!(is_cancellation(&io::Error::from(io::ErrorKind::UnexpectedEof)));
        assert!(!is_cancellation(&io::Error::from(io::ErrorKind::BrokenPipe)));
        assert!(!is_cancellation(&io::Error::other("terminal gone")));
    }

    #[test]
    fn test_into_report_is_empty_for_non_completed() {
        for outcome in [Outcome::NothingFound, Outcome::NoSelection, Outcome::Declined] {
            assert!(outcome.report().is_none());
            let report = outcome.into_report();
            assert!(report.succeeded.is_empty());
            assert!(report.failed.is_empty());
            assert_eq!(report.attempted(), 0);
        }
    }

    #[test]
    fn test_report_counts() {
        let report = DeletionReport {
            succeeded: vec![Item::filter("1", "a"), Item::filter("3", "c")],
            failed: vec![FailedDeletion {
                item: Item::filter("2", "b"),
                error: ProviderError::Http {
                    status: 403,
                    url: "https://jira.example.com/rest/api/2/filter/2".to_string(),
                    message: "Forbidden".to_string(),
                },
            }],
        };
        assert_eq!(report.attempted(), 3);
        assert!(report.has_failures());
    }
}
