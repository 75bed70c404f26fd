//! Client for the budgeting REST API.
//!
//! Commands talk to the [`BudgetApi`] trait; [`YnabClient`] is the blocking
//! HTTP implementation.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::{Result, YnabError};
use crate::models::{
    Account, AccountList, ApiErrorBody, Budget, BudgetList, CategoryGroup, CategoryGroupList,
    Envelope, Payee, PayeeList, Transaction, TransactionList, TransactionUpdate,
    TransactionUpdateBatch, UpdatedTransactions,
};

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

pub trait BudgetApi {
    fn budgets(&self) -> Result<Vec<Budget>>;
    fn accounts(&self, budget_id: &str) -> Result<Vec<Account>>;
    fn account_transactions(&self, budget_id: &str, account_id: &str) -> Result<Vec<Transaction>>;
    fn transactions(&self, budget_id: &str) -> Result<Vec<Transaction>>;
    /// Bulk memo update. Returns the number of transactions the server changed.
    fn update_transactions(&self, budget_id: &str, updates: &[TransactionUpdate]) -> Result<usize>;
    fn category_groups(&self, budget_id: &str) -> Result<Vec<CategoryGroup>>;
    fn payees(&self, budget_id: &str) -> Result<Vec<Payee>>;
}

pub struct YnabClient {
    http: Client,
    base_url: String,
    token: String,
}

impl YnabClient {
    pub fn new(base_url: &str, token: String, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("ynab-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{method} {url}");
        self.http.request(method, url).bearer_auth(&self.token)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send()?;
        let envelope: Envelope<T> = check_status(response)?.json()?;
        Ok(envelope.data)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn budget_path(budget_id: &str, suffix: &str) -> String {
    format!("budgets/{budget_id}/{suffix}")
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("response status: {status}");
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    tracing::error!("request failed: {} - {body}", status.as_u16());
    Err(YnabError::Api {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason()),
    })
}

fn error_message(body: &str, reason: Option<&str>) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.detail.is_empty() => parsed.error.detail,
        Ok(parsed) if !parsed.error.name.is_empty() => parsed.error.name,
        _ => reason.unwrap_or("Unknown error").to_string(),
    }
}

impl BudgetApi for YnabClient {
    fn budgets(&self) -> Result<Vec<Budget>> {
        let list: BudgetList = self.get("budgets")?;
        tracing::info!("found {} budgets", list.budgets.len());
        Ok(list.budgets)
    }

    fn accounts(&self, budget_id: &str) -> Result<Vec<Account>> {
        let list: AccountList = self.get(&budget_path(budget_id, "accounts"))?;
        Ok(list.accounts)
    }

    fn account_transactions(&self, budget_id: &str, account_id: &str) -> Result<Vec<Transaction>> {
        let path = budget_path(budget_id, &format!("accounts/{account_id}/transactions"));
        let list: TransactionList = self.get(&path)?;
        Ok(list.transactions)
    }

    fn transactions(&self, budget_id: &str) -> Result<Vec<Transaction>> {
        let list: TransactionList = self.get(&budget_path(budget_id, "transactions"))?;
        tracing::info!("found {} transactions", list.transactions.len());
        Ok(list.transactions)
    }

    fn update_transactions(&self, budget_id: &str, updates: &[TransactionUpdate]) -> Result<usize> {
        if updates.is_empty() {
            return Ok(0);
        }
        let body = TransactionUpdateBatch {
            transactions: updates,
        };
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("request data: {}", serde_json::to_string_pretty(&body)?);
        }
        let response = self
            .request(Method::PATCH, &budget_path(budget_id, "transactions"))
            .json(&body)
            .send()?;
        let envelope: Envelope<UpdatedTransactions> = check_status(response)?.json()?;
        let updated = envelope
            .data
            .transaction_ids
            .len()
            .max(envelope.data.transactions.len());
        Ok(updated)
    }

    fn category_groups(&self, budget_id: &str) -> Result<Vec<CategoryGroup>> {
        let list: CategoryGroupList = self.get(&budget_path(budget_id, "categories"))?;
        Ok(list.category_groups)
    }

    fn payees(&self, budget_id: &str) -> Result<Vec<Payee>> {
        let list: PayeeList = self.get(&budget_path(budget_id, "payees"))?;
        Ok(list.payees)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://api.youneedabudget.com/v1/", "/budgets"),
            "https://api.youneedabudget.com/v1/budgets"
        );
        assert_eq!(
            join_url("http://localhost:8080/v1", "budgets/b1/transactions"),
            "http://localhost:8080/v1/budgets/b1/transactions"
        );
    }

    #[test]
    fn test_budget_path() {
        assert_eq!(budget_path("b1", "payees"), "budgets/b1/payees");
        assert_eq!(
            budget_path("b1", "accounts/a1/transactions"),
            "budgets/b1/accounts/a1/transactions"
        );
    }

    #[test]
    fn test_error_message_prefers_detail() {
        let body = r#"{"error": {"id": "401", "name": "unauthorized", "detail": "Unauthorized"}}"#;
        assert_eq!(error_message(body, Some("Unauthorized")), "Unauthorized");
        let body = r#"{"error": {"id": "404.2", "name": "resource_not_found", "detail": ""}}"#;
        assert_eq!(error_message(body, None), "resource_not_found");
        assert_eq!(error_message("<html>", Some("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message("", None), "Unknown error");
    }

    #[test]
    fn test_client_builds() {
        let client = YnabClient::new("http://localhost/v1/", "tok".to_string(), 5).unwrap();
        assert_eq!(client.url("budgets"), "http://localhost/v1/budgets");
    }
}
