use colored::Colorize;

use crate::cli::Session;
use crate::error::Result;
use crate::settings::settings_path;
use crate::store::StateKey;

pub fn run(session: &Session) -> Result<()> {
    let token = session.store.get(StateKey::Token)?;
    let budget = session.store.get(StateKey::BudgetId)?;

    println!("Settings:   {}", settings_path().display());
    println!("State dir:  {}", session.store.location());
    println!("API URL:    {}", session.settings.api_url);
    println!("Timeout:    {}s", session.settings.timeout_secs);
    println!();
    println!(
        "Token:      {}",
        if token.is_some() {
            "set".green()
        } else {
            "(not set)".yellow()
        }
    );
    println!(
        "Budget ID:  {}",
        match &budget {
            Some(id) => id.as_str().normal(),
            None => "(not set)".yellow(),
        }
    );

    if token.is_none() {
        println!();
        println!("Run `ynab-cli token <token>` to get started.");
    } else if budget.is_none() {
        println!();
        println!("Run `ynab-cli budget` to choose a budget.");
    }
    Ok(())
}
