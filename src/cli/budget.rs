use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::api::BudgetApi;
use crate::cli::Session;
use crate::error::Result;
use crate::models::Budget;
use crate::prompt::{choose, Prompter};
use crate::store::{StateKey, StateStore};

pub fn run(session: &Session, prompter: &mut dyn Prompter) -> Result<()> {
    let client = session.client()?;
    choose_budget(&client, session.store.as_ref(), prompter)?;
    Ok(())
}

pub fn choose_budget(
    api: &dyn BudgetApi,
    store: &dyn StateStore,
    prompter: &mut dyn Prompter,
) -> Result<Option<Budget>> {
    let budgets = api.budgets()?;
    if budgets.is_empty() {
        println!("{}", "No budgets found.".yellow());
        return Ok(None);
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "ID"]);
    for (i, budget) in budgets.iter().enumerate() {
        table.add_row(vec![Cell::new(i), Cell::new(&budget.name), Cell::new(&budget.id)]);
    }
    println!("Budgets\n{table}");

    if let Some(current) = store.get(StateKey::BudgetId)? {
        println!("Current budget ID: {current}");
    }

    let Some(budget) = choose(prompter, "Which budget do you want to set?", &budgets)? else {
        return Ok(None);
    };
    store.set(StateKey::BudgetId, &budget.id)?;
    println!(
        "{}",
        format!("Set budget to {} ({})", budget.name, budget.id).green()
    );
    Ok(Some(budget.clone()))
}
