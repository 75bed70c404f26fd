use std::collections::HashSet;

use chrono::{Months, NaiveDate};

use crate::api::BudgetApi;
use crate::error::Result;
use crate::flags::{find_directive, Flag, FlagError};
use crate::models::{Account, Payee, Transaction, CREDIT_CARD};

const READY_TO_ASSIGN: &str = "Inflow: Ready to Assign";
const STARTING_BALANCE: &str = "Starting Balance";

/// A transaction or split line as printed by the reports.
#[derive(Debug, Clone)]
pub struct Line {
    pub id: String,
    pub is_subtransaction: bool,
    pub account_name: String,
    pub date: String,
    pub payee_name: Option<String>,
    pub amount: i64,
    pub memo: Option<String>,
}

impl Line {
    fn from_parent(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            is_subtransaction: false,
            account_name: t.account_name.clone(),
            date: t.date.clone(),
            payee_name: t.payee_name.clone(),
            amount: t.amount,
            memo: t.memo.clone(),
        }
    }

    fn from_split(t: &Transaction, index: usize) -> Self {
        let st = &t.subtransactions[index];
        Self {
            id: st.id.clone(),
            is_subtransaction: true,
            account_name: t.account_name.clone(),
            date: t.date.clone(),
            payee_name: st.payee_name.clone().or_else(|| t.payee_name.clone()),
            amount: st.amount,
            memo: st.memo.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Flag totals
// ---------------------------------------------------------------------------

pub struct FlaggedLine {
    pub line: Line,
    pub flagged_amount: i64,
}

pub struct FlagFailure {
    pub line: Line,
    pub error: FlagError,
}

pub struct FlagReport {
    pub entries: Vec<FlaggedLine>,
    pub failures: Vec<FlagFailure>,
    /// Wider than a single amount; directive amounts are user-typed.
    pub total: i128,
}

pub fn flag_total(transactions: &[Transaction], flag: &Flag) -> FlagReport {
    let mut entries = Vec::new();
    let mut failures = Vec::new();

    let lines = transactions.iter().flat_map(|t| {
        std::iter::once(Line::from_parent(t))
            .chain((0..t.subtransactions.len()).map(move |i| Line::from_split(t, i)))
    });

    for line in lines {
        let Some(directive) = find_directive(line.memo.as_deref(), flag) else {
            continue;
        };
        match directive.resolve(line.amount) {
            Ok(flagged_amount) => entries.push(FlaggedLine {
                line,
                flagged_amount,
            }),
            Err(error) => {
                tracing::warn!("transaction {}: {error}", line.id);
                failures.push(FlagFailure { line, error });
            }
        }
    }

    let total = entries.iter().map(|e| i128::from(e.flagged_amount)).sum();
    FlagReport {
        entries,
        failures,
        total,
    }
}

// ---------------------------------------------------------------------------
// Account spend
// ---------------------------------------------------------------------------

/// Neither a transfer between accounts nor a "Ready to Assign" credit.
pub fn is_spend(transfer_transaction_id: Option<&str>, category_name: Option<&str>) -> bool {
    transfer_transaction_id.is_none() && category_name != Some(READY_TO_ASSIGN)
}

pub struct SpendReport {
    pub lines: Vec<Line>,
    /// Positive for net outflow.
    pub total_spend: i64,
}

pub fn account_spend(transactions: &[Transaction]) -> SpendReport {
    let mut lines = Vec::new();
    for t in transactions {
        if t.subtransactions.is_empty() {
            if is_spend(t.transfer_transaction_id.as_deref(), t.category_name.as_deref()) {
                lines.push(Line::from_parent(t));
            }
            continue;
        }
        for (i, st) in t.subtransactions.iter().enumerate() {
            if is_spend(st.transfer_transaction_id.as_deref(), st.category_name.as_deref()) {
                lines.push(Line::from_split(t, i));
            }
        }
    }
    let total: i64 = lines.iter().map(|l| l.amount).sum();
    SpendReport {
        lines,
        total_spend: -total,
    }
}

// ---------------------------------------------------------------------------
// New credit cards in a window
// ---------------------------------------------------------------------------

pub fn window_start(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

pub struct CardOpening {
    pub name: String,
    pub opened: NaiveDate,
}

pub struct WindowReport {
    pub opened: Vec<CardOpening>,
    /// Credit cards with no readable starting balance date.
    pub undated: Vec<String>,
}

fn opening_date(transactions: &[Transaction]) -> Option<NaiveDate> {
    transactions
        .iter()
        .find(|t| t.payee_name.as_deref() == Some(STARTING_BALANCE))
        .and_then(|t| NaiveDate::parse_from_str(&t.date, "%Y-%m-%d").ok())
}

pub fn card_openings(
    api: &dyn BudgetApi,
    budget_id: &str,
    accounts: &[Account],
    window_start: NaiveDate,
) -> Result<WindowReport> {
    let mut opened = Vec::new();
    let mut undated = Vec::new();

    for account in accounts
        .iter()
        .filter(|a| a.account_type == CREDIT_CARD && !a.deleted)
    {
        let transactions = api.account_transactions(budget_id, &account.id)?;
        match opening_date(&transactions) {
            Some(date) if date >= window_start => opened.push(CardOpening {
                name: account.name.clone(),
                opened: date,
            }),
            Some(_) => {}
            None => {
                tracing::warn!("no starting balance found for {}", account.name);
                undated.push(account.name.clone());
            }
        }
    }

    Ok(WindowReport { opened, undated })
}

// ---------------------------------------------------------------------------
// Unused payees
// ---------------------------------------------------------------------------

pub fn unused_payees<'a>(transactions: &[Transaction], payees: &'a [Payee]) -> Vec<&'a Payee> {
    let mut used: HashSet<&str> = HashSet::new();
    for t in transactions {
        used.extend(t.payee_id.as_deref());
        used.extend(t.subtransactions.iter().filter_map(|st| st.payee_id.as_deref()));
    }

    let mut unused: Vec<&Payee> = payees
        .iter()
        .filter(|p| !p.deleted && p.transfer_account_id.is_none())
        .filter(|p| !used.contains(p.id.as_str()))
        .collect();
    unused.sort_by_key(|p| p.name.to_lowercase());
    unused
}
