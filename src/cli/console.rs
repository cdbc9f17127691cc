//! Terminal implementation of the workflow console

use std::io::{self, BufRead, Write};

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::cli::helpers::is_interactive;
use crate::cli::table::{detail_lines, render_items};
use crate::core::console::Console;
use crate::core::item::Item;

/// Console on stdin/stdout
///
/// Prompts go through dialoguer on a terminal. With piped stdin the prompt is
/// printed to stdout and one line is read per prompt, so scripted input such
/// as `printf '1-3\nyes\n' | jcl filters` works.
pub struct TerminalConsole {
    theme: ColorfulTheme,
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interactive: is_interactive(),
        }
    }

    fn read_piped_line(&self, message: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}: ", message)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        println!();
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn prompt_line(&mut self, message: &str) -> io::Result<String> {
        if !self.interactive {
            return self.read_piped_line(message);
        }
        Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| match e {
                dialoguer::Error::IO(err) => err,
            })
    }

    fn print_table(&mut self, heading: &str, items: &[Item]) {
        println!();
        println!("{}", style(heading).bold());
        println!("{}", render_items(items));
        println!();
    }

    fn print_details(&mut self, item: &Item) {
        println!("{}", style("─".repeat(60)).dim());
        for (field, value) in detail_lines(item) {
            match field {
                "Name" => println!("{}: {}", style(field).bold(), style(value).yellow()),
                "ID" => println!("{}: {}", style(field).bold(), style(value).cyan()),
                _ => println!("{}: {}", style(field).bold(), value),
            }
        }
        println!("{}", style("─".repeat(60)).dim());
    }

    fn info(&mut self, message: &str) {
        println!("{}", message);
    }

    fn success(&mut self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{} {}", style("!").yellow(), message);
    }
}
