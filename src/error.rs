use thiserror::Error;

#[derive(Error, Debug)]
pub enum YnabError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(
        "YNAB Personal Access Token not set.\n\
         Follow instructions to get one here: https://api.youneedabudget.com/\n\
         Set it with `token <token>`."
    )]
    TokenNotSet,

    #[error("YNAB Budget ID not set.\nSet it with `budget`.")]
    BudgetNotSet,

    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid flag: {0:?}")]
    InvalidFlag(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

impl YnabError {
    /// Missing local setup rather than a failure; callers print these as guidance.
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::TokenNotSet | Self::BudgetNotSet)
    }
}

pub type Result<T> = std::result::Result<T, YnabError>;
