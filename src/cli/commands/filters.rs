//! `jcl filters` command - list filters and delete a selection

use miette::Result;
use tracing::info;

use crate::cli::commands::utils::{connect, load_config, print_summary};
use crate::cli::console::TerminalConsole;
use crate::cli::GlobalOpts;
use crate::core::deletion::{delete_by_id, run_interactive_deletion_flow};
use crate::core::item::ItemKind;
use crate::core::provider::ItemQuery;

#[derive(clap::Args, Debug, Default)]
pub struct FiltersArgs {
    /// Search all visible filters by name instead of listing favourites
    #[arg(long, short = 's', value_name = "NAME")]
    pub search: Option<String>,

    /// Only show filters whose name contains this text (case-insensitive)
    #[arg(long, short = 'f', value_name = "TEXT")]
    pub filter: Option<String>,

    /// Delete one filter by id, skipping the list
    #[arg(long, value_name = "ID", conflicts_with_all = ["search", "filter"])]
    pub id: Option<String>,
}

pub fn run(args: FiltersArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let client = connect(&config)?;
    let mut console = TerminalConsole::new();

    let outcome = match args.id {
        Some(id) => {
            info!(id = %id, "deleting filter by id");
            delete_by_id(&client, &mut console, ItemKind::Filter, &id)?
        }
        None => {
            let query = ItemQuery::filters().with_name(args.search);
            match &query.name {
                Some(name) => println!("Searching filters named '{}'...", name),
                None => println!("Loading favourite filters..."),
            }
            run_interactive_deletion_flow(&client, &mut console, &query, args.filter.as_deref())?
        }
    };

    print_summary(ItemKind::Filter, &outcome)
}
