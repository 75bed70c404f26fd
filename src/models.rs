use serde::{Deserialize, Serialize};

/// Every API response wraps its payload in `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct BudgetList {
    pub budgets: Vec<Budget>,
}

#[derive(Debug, Deserialize)]
pub struct AccountList {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryGroupList {
    pub category_groups: Vec<CategoryGroup>,
}

#[derive(Debug, Deserialize)]
pub struct PayeeList {
    pub payees: Vec<Payee>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatedTransactions {
    #[serde(default)]
    pub transaction_ids: Vec<String>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Budget {
    pub id: String,
    pub name: String,
}

pub const CREDIT_CARD: &str = "creditCard";

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    /// Milliunits; negative for outflows.
    pub amount: i64,
    pub memo: Option<String>,
    #[serde(default)]
    pub account_name: String,
    pub payee_id: Option<String>,
    pub payee_name: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub transfer_transaction_id: Option<String>,
    #[serde(default)]
    pub subtransactions: Vec<SubTransaction>,
}

/// One line of a split. Account and date come from the parent.
#[derive(Debug, Clone, Deserialize)]
pub struct SubTransaction {
    pub id: String,
    pub amount: i64,
    pub memo: Option<String>,
    pub payee_id: Option<String>,
    pub payee_name: Option<String>,
    pub category_name: Option<String>,
    pub transfer_transaction_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryGroup {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payee {
    pub id: String,
    pub name: String,
    pub transfer_account_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// Body item for the bulk transaction PATCH; only the memo is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionUpdate {
    pub id: String,
    pub memo: String,
}

#[derive(Debug, Serialize)]
pub struct TransactionUpdateBatch<'a> {
    pub transactions: &'a [TransactionUpdate],
}
