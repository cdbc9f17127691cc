//! `jcl boards` command - list boards and delete a selection

use miette::Result;
use tracing::info;

use crate::cli::commands::utils::{connect, load_config, print_summary};
use crate::cli::console::TerminalConsole;
use crate::cli::GlobalOpts;
use crate::core::deletion::{delete_by_id, run_interactive_deletion_flow};
use crate::core::item::{BoardType, ItemKind};
use crate::core::provider::ItemQuery;

#[derive(clap::Args, Debug, Default)]
pub struct BoardsArgs {
    /// Only show boards whose name contains this text (case-insensitive).
    /// Falls back to JIRA_BOARD_FILTER or `board_filter` in the config file.
    #[arg(long, short = 'f', value_name = "TEXT")]
    pub filter: Option<String>,

    /// Only list boards of this type
    #[arg(long = "type", short = 't', value_enum)]
    pub board_type: Option<BoardType>,

    /// Only list boards in this project (key or id)
    #[arg(long, short = 'p', value_name = "KEY")]
    pub project: Option<String>,

    /// Delete one board by id, skipping the list
    #[arg(long, value_name = "ID", conflicts_with_all = ["filter", "board_type", "project"])]
    pub id: Option<String>,
}

pub fn run(args: BoardsArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let client = connect(&config)?;
    let mut console = TerminalConsole::new();

    let outcome = match args.id {
        Some(id) => {
            info!(id = %id, "deleting board by id");
            delete_by_id(&client, &mut console, ItemKind::Board, &id)?
        }
        None => {
            let filter = args.filter.or_else(|| config.board_filter.clone());
            // The name goes to the server to narrow paging; the local filter
            // still applies the case-insensitive substring match
            let query = ItemQuery::boards()
                .with_name(filter.clone())
                .with_board_type(args.board_type)
                .with_project(args.project);

            match &filter {
                Some(f) => println!("Loading boards containing '{}'...", f),
                None => println!("Loading boards..."),
            }
            run_interactive_deletion_flow(&client, &mut console, &query, filter.as_deref())?
        }
    };

    print_summary(ItemKind::Board, &outcome)
}
