use colored::Colorize;

use crate::api::BudgetApi;
use crate::cli::Session;
use crate::error::Result;
use crate::reports::{card_openings, window_start, WindowReport};

pub fn run(session: &Session, num_months: u32) -> Result<()> {
    let client = session.client()?;
    let budget_id = session.budget_id()?;
    let today = chrono::Local::now().date_naive();
    window(&client, &budget_id, num_months, today)?;
    Ok(())
}

pub fn window(
    api: &dyn BudgetApi,
    budget_id: &str,
    num_months: u32,
    today: chrono::NaiveDate,
) -> Result<WindowReport> {
    let start = window_start(today, num_months);
    println!(
        "{}",
        format!("ACCOUNTS OPENED IN THE LAST {num_months} MONTHS:").bold()
    );

    let accounts = api.accounts(budget_id)?;
    let report = card_openings(api, budget_id, &accounts, start)?;

    for card in &report.opened {
        println!("{} (Opened {})", card.name, card.opened);
    }
    for name in &report.undated {
        println!("{}", format!("{name}: no starting balance found").yellow());
    }
    println!("{}", format!("TOTAL: {}", report.opened.len()).bold());
    Ok(report)
}
