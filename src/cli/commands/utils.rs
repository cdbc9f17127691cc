//! Shared utilities for CLI commands

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use miette::{IntoDiagnostic, Result};
use tracing::debug;

use crate::cli::helpers::is_interactive;
use crate::cli::GlobalOpts;
use crate::core::config::{Config, PartialConfig};
use crate::core::deletion::Outcome;
use crate::core::item::ItemKind;
use crate::jira::{JiraClient, User};

/// Resolve the configuration for a command
///
/// Layers the config file, environment, and command-line flags. On a terminal
/// any required setting that is still missing is asked for; otherwise the
/// missing settings are reported as an error.
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let mut partial = PartialConfig::load(global.config.as_deref(), global.overrides())?;

    let missing = partial.missing();
    if !missing.is_empty() && is_interactive() {
        prompt_missing(&mut partial, &missing)?;
    }

    let config = partial.build()?;
    debug!(config = ?config, "configuration resolved");
    Ok(config)
}

fn prompt_missing(partial: &mut PartialConfig, missing: &[&str]) -> Result<()> {
    let theme = ColorfulTheme::default();
    eprintln!(
        "{} Not configured: {}",
        style("!").yellow(),
        missing.join(", ")
    );

    for &key in missing {
        match key {
            "JIRA_URL" => {
                let url: String = Input::with_theme(&theme)
                    .with_prompt("JIRA URL (e.g., https://company.atlassian.net)")
                    .interact_text()
                    .into_diagnostic()?;
                partial.url = Some(url);
            }
            "JIRA_USERNAME" => {
                let username: String = Input::with_theme(&theme)
                    .with_prompt("JIRA username or email")
                    .interact_text()
                    .into_diagnostic()?;
                partial.username = Some(username);
            }
            "JIRA_API_TOKEN" => {
                let token = Password::with_theme(&theme)
                    .with_prompt("API token or Personal Access Token")
                    .interact()
                    .into_diagnostic()?;
                partial.token = Some(token);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Connect and authenticate, reporting which method the server accepted
pub fn connect(config: &Config) -> Result<JiraClient> {
    println!("Connecting to {}...", style(&config.url).cyan());
    let (client, user) = JiraClient::connect(config)?;
    println!(
        "{} Authenticated as {} using {}",
        style("✓").green(),
        style(user_label(&user)).cyan(),
        client.strategy().describe()
    );
    Ok(client)
}

/// Best available name for a user
pub fn user_label(user: &User) -> String {
    [
        &user.display_name,
        &user.name,
        &user.email_address,
        &user.account_id,
    ]
    .into_iter()
    .flatten()
    .find(|s| !s.trim().is_empty())
    .cloned()
    .unwrap_or_else(|| "unknown user".to_string())
}

/// Print the results of a run; any failed deletion makes this an error
pub fn print_summary(kind: ItemKind, outcome: &Outcome) -> Result<()> {
    let Some(report) = outcome.report() else {
        return Ok(());
    };

    println!();
    println!("{}", style("Results").bold());
    println!(
        "  {} {} deleted",
        style("✓").green(),
        kind.counted(report.succeeded.len())
    );

    if !report.has_failures() {
        return Ok(());
    }

    println!(
        "  {} {} failed",
        style("✗").red(),
        kind.counted(report.failed.len())
    );
    for failed in &report.failed {
        println!("    - {}: {}", failed.item, failed.error);
    }
    if kind == ItemKind::Board {
        println!();
        println!(
            "{}",
            style("Deleting a board needs board admin rights, and boards with active sprints may be refused.")
                .dim()
        );
    }

    Err(miette::miette!(
        "{} of {} deletions failed",
        report.failed.len(),
        report.attempted()
    ))
}
