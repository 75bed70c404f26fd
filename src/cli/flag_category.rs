use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::api::BudgetApi;
use crate::cli::Session;
use crate::editor::plan_category_flag;
use crate::error::Result;
use crate::flags::Flag;
use crate::models::Category;
use crate::prompt::{choose, Prompter};

pub fn run(session: &Session, prompter: &mut dyn Prompter, flag: &Flag, dry_run: bool) -> Result<()> {
    let client = session.client()?;
    let budget_id = session.budget_id()?;
    flag_category(&client, &budget_id, prompter, flag, dry_run)?;
    Ok(())
}

fn visible_categories(api: &dyn BudgetApi, budget_id: &str) -> Result<Vec<Category>> {
    Ok(api
        .category_groups(budget_id)?
        .into_iter()
        .flat_map(|group| group.categories)
        .filter(|c| !c.hidden && !c.deleted)
        .collect())
}

/// Returns how many transactions were (or would be) flagged; `None` if cancelled.
pub fn flag_category(
    api: &dyn BudgetApi,
    budget_id: &str,
    prompter: &mut dyn Prompter,
    flag: &Flag,
    dry_run: bool,
) -> Result<Option<usize>> {
    let categories = visible_categories(api, budget_id)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Category", "ID"]);
    for (i, category) in categories.iter().enumerate() {
        table.add_row(vec![Cell::new(i), Cell::new(&category.name), Cell::new(&category.id)]);
    }
    println!("Categories\n{table}");

    let Some(category) = choose(prompter, "Which category do you want to flag?", &categories)? else {
        return Ok(None);
    };
    println!("Chose category: {} ({})", category.name, category.id);

    if !prompter.confirm("Proceed?")? {
        return Ok(None);
    }

    let transactions = api.transactions(budget_id)?;
    let updates = plan_category_flag(&transactions, &category.id, flag);

    println!("{}", format!("FLAGGING ALL TRANSACTIONS WITH FLAG {flag}.").bold());
    if dry_run {
        for update in &updates {
            println!("{}: {:?}", update.id, update.memo);
        }
        println!("Would flag {} transactions.", updates.len());
        return Ok(Some(updates.len()));
    }

    let flagged = api.update_transactions(budget_id, &updates)?;
    println!("Flagged {flagged} transactions.");
    Ok(Some(flagged))
}
