use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::api::BudgetApi;
use crate::cli::{print_line, Session};
use crate::error::Result;
use crate::fmt::money;
use crate::models::Account;
use crate::prompt::{choose, Prompter};
use crate::reports::{account_spend, SpendReport};

pub fn run(session: &Session, prompter: &mut dyn Prompter) -> Result<()> {
    let client = session.client()?;
    let budget_id = session.budget_id()?;
    spend(&client, &budget_id, prompter)?;
    Ok(())
}

fn choose_account(
    api: &dyn BudgetApi,
    budget_id: &str,
    prompter: &mut dyn Prompter,
) -> Result<Option<Account>> {
    let accounts: Vec<Account> = api
        .accounts(budget_id)?
        .into_iter()
        .filter(|a| !a.deleted)
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["#", "Account", "Type"]);
    for (i, account) in accounts.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i),
            Cell::new(&account.name),
            Cell::new(&account.account_type),
        ]);
    }
    println!("Accounts\n{table}");

    let chosen = choose(prompter, "Which account do you choose?", &accounts)?.cloned();
    if let Some(account) = &chosen {
        println!("Chose account {} ({})", account.name, account.id);
    }
    Ok(chosen)
}

pub fn spend(
    api: &dyn BudgetApi,
    budget_id: &str,
    prompter: &mut dyn Prompter,
) -> Result<Option<SpendReport>> {
    let Some(account) = choose_account(api, budget_id, prompter)? else {
        return Ok(None);
    };

    let transactions = api.account_transactions(budget_id, &account.id)?;
    let report = account_spend(&transactions);

    println!("{}", "ALL TRANSACTIONS FOR THIS ACCOUNT:".bold());
    for line in &report.lines {
        print_line(line);
        println!();
    }
    println!("{}", format!("TOTAL SPEND: {}", money(report.total_spend)).bold());
    Ok(Some(report))
}
