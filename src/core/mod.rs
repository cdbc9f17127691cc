//! Core module - item model, range selection, and the deletion workflow

pub mod config;
pub mod console;
pub mod deletion;
pub mod item;
pub mod lister;
pub mod provider;
pub mod selection;

pub use config::{AuthMode, Config, ConfigError, PartialConfig};
pub use console::Console;
pub use deletion::{
    confirm_and_delete, delete_by_id, delete_items, is_cancellation, is_confirmation,
    run_interactive_deletion_flow, DeletionReport, FailedDeletion, FlowError, Outcome,
};
pub use item::{BoardType, Item, ItemDetails, ItemKind, ProjectLocation};
pub use lister::filter_items;
pub use provider::{ItemProvider, ItemQuery, ProviderError};
pub use selection::{parse_selection, ParseError, SelectionRange};
