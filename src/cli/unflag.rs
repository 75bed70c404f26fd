use colored::Colorize;

use crate::api::BudgetApi;
use crate::cli::Session;
use crate::editor::plan_unflag;
use crate::error::Result;
use crate::flags::Flag;

pub fn run(session: &Session, flag: &Flag, dry_run: bool) -> Result<()> {
    let client = session.client()?;
    let budget_id = session.budget_id()?;
    unflag(&client, &budget_id, flag, dry_run)?;
    Ok(())
}

/// Returns how many transactions were (or would be) changed.
pub fn unflag(api: &dyn BudgetApi, budget_id: &str, flag: &Flag, dry_run: bool) -> Result<usize> {
    let transactions = api.transactions(budget_id)?;
    let plan = plan_unflag(&transactions, flag);

    println!("{}", format!("UNFLAGGING ALL TRANSACTIONS WITH FLAG {flag}.").bold());

    for id in &plan.skipped_subtransactions {
        tracing::warn!("subtransaction {id} carries {flag} but split lines cannot be edited");
        println!("{}", format!("Skipped subtransaction {id}: edit it in YNAB.").yellow());
    }

    if dry_run {
        for update in &plan.updates {
            println!("{}: {:?}", update.id, update.memo);
        }
        println!("Would unflag {} transactions.", plan.updates.len());
        return Ok(plan.updates.len());
    }

    let updated = api.update_transactions(budget_id, &plan.updates)?;
    println!("Unflagged {updated} transactions.");
    Ok(updated)
}
