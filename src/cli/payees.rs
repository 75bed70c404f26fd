use colored::Colorize;

use crate::api::BudgetApi;
use crate::cli::Session;
use crate::error::Result;
use crate::reports::unused_payees;

pub fn unused(session: &Session) -> Result<()> {
    let client = session.client()?;
    let budget_id = session.budget_id()?;
    list_unused(&client, &budget_id)?;
    Ok(())
}

pub fn list_unused(api: &dyn BudgetApi, budget_id: &str) -> Result<Vec<String>> {
    let transactions = api.transactions(budget_id)?;
    let payees = api.payees(budget_id)?;

    let names: Vec<String> = unused_payees(&transactions, &payees)
        .into_iter()
        .map(|p| p.name.clone())
        .collect();
    tracing::info!("{} of {} payees unused", names.len(), payees.len());

    println!("{}", "UNUSED PAYEES:".bold());
    for name in &names {
        println!("{name}");
    }
    Ok(names)
}
