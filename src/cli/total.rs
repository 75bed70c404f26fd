use colored::Colorize;

use crate::api::BudgetApi;
use crate::cli::{print_line, Session};
use crate::error::Result;
use crate::flags::Flag;
use crate::fmt::flag_amount;
use crate::reports::{flag_total, FlagReport};

pub fn run(session: &Session, flag: &Flag) -> Result<()> {
    let client = session.client()?;
    let budget_id = session.budget_id()?;
    total(&client, &budget_id, flag)?;
    Ok(())
}

pub fn total(api: &dyn BudgetApi, budget_id: &str, flag: &Flag) -> Result<FlagReport> {
    tracing::info!("searching for transactions with flag {flag}");
    let transactions = api.transactions(budget_id)?;
    let report = flag_total(&transactions, flag);

    println!("{}", format!("ALL TRANSACTIONS WITH FLAG {flag}:").bold());
    for entry in &report.entries {
        print_line(&entry.line);
        println!("Flagged Amount: {}", flag_amount(entry.flagged_amount.into()));
        println!();
    }

    for failure in &report.failures {
        print_line(&failure.line);
        println!("{}", format!("ERROR: {}", failure.error).red());
        println!();
    }

    println!("{}", format!("TOTAL {flag}: {}", flag_amount(report.total)).bold());
    if !report.failures.is_empty() {
        println!(
            "{}",
            format!("{} flagged transaction(s) skipped.", report.failures.len()).yellow()
        );
    }
    Ok(report)
}
