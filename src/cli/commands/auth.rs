//! `jcl auth` command - connection and authentication check

use console::style;
use miette::Result;

use crate::cli::commands::utils::{load_config, user_label};
use crate::cli::helpers::or_na;
use crate::cli::GlobalOpts;
use crate::core::config::mask_secret;
use crate::jira::{candidate_strategies, JiraClient};

pub fn run(global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let candidates = candidate_strategies(&config);

    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("URL").bold(), style(&config.url).cyan());
    println!(
        "{}: {}",
        style("Username").bold(),
        or_na(config.username.as_deref())
    );
    println!("{}: {}", style("Token").bold(), mask_secret(&config.token));
    println!("{}: {}", style("Auth mode").bold(), config.auth);
    println!(
        "{}: {}",
        style("Will try").bold(),
        candidates
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("{}", style("─".repeat(60)).dim());

    let (client, user) = JiraClient::connect(&config)?;
    println!(
        "{} Authenticated as {}",
        style("✓").green(),
        style(user_label(&user)).cyan()
    );
    if let Some(email) = user.email_address.as_deref().filter(|e| !e.is_empty()) {
        println!("   {}", style(email).dim());
    }
    println!("   Method: {}", client.strategy().describe());

    match client.server_info() {
        Ok(info) => println!(
            "   Server: {} {} ({})",
            or_na(info.server_title.as_deref()),
            or_na(info.version.as_deref()),
            or_na(info.deployment_type.as_deref())
        ),
        Err(e) => eprintln!(
            "{} Could not read server info: {}",
            style("!").yellow(),
            e
        ),
    }

    Ok(())
}
