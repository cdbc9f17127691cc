//! Console abstraction used by the interactive workflow

use std::io;

use crate::core::item::Item;

/// Line-oriented user interaction
///
/// Implemented by the terminal front-end in `cli::console` and by scripted
/// fakes in tests.
pub trait Console {
    /// Show `message` and block until the user enters a line (without newline)
    fn prompt_line(&mut self, message: &str) -> io::Result<String>;

    /// Show `items` as an indexed table, numbered from 1
    fn print_table(&mut self, heading: &str, items: &[Item]);

    /// Show every known field of a single item
    fn print_details(&mut self, item: &Item);

    fn info(&mut self, message: &str);

    fn success(&mut self, message: &str);

    fn warn(&mut self, message: &str);
}
