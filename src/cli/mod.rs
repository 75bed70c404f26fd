pub mod budget;
pub mod config;
pub mod flag_category;
pub mod payees;
pub mod shell;
pub mod spend;
pub mod status;
pub mod token;
pub mod total;
pub mod unflag;
pub mod window;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::api::YnabClient;
use crate::error::{Result, YnabError};
use crate::flags::Flag;
use crate::fmt::money;
use crate::prompt::Prompter;
use crate::reports::Line;
use crate::settings::{load_settings, Settings};
use crate::store::{require_budget_id, require_token, FileStore, StateStore};

#[derive(Parser)]
#[command(
    name = "ynab-cli",
    version,
    about = "Misc. automations for YNAB: memo flag totals, bulk flag edits, and account checks."
)]
pub struct Cli {
    /// Enable debug logging (including HTTP requests)
    #[arg(long, global = true)]
    pub debug: bool,
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Directory holding the token and budget id files (default: current directory)
    #[arg(long = "state-dir", env = "YNAB_CLI_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,
    /// Base URL of the YNAB API
    #[arg(long = "api-url", env = "YNAB_API_URL", global = true)]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set the YNAB personal access token needed to use the API.
    Token {
        /// Personal access token (prompted for, hidden, if omitted)
        token: Option<String>,
    },
    /// Delete the YNAB personal access token if it was set.
    DelToken,
    /// Show all budgets and choose the one to perform actions on.
    Budget,
    /// Find all transactions marked with #flag [amount], and sum them.
    Total {
        /// Flag to search for, with or without the leading '#'
        #[arg(value_parser = Flag::new)]
        flag: Flag,
    },
    /// Remove #flag [amount] from every transaction memo that has it.
    Unflag {
        #[arg(value_parser = Flag::new)]
        flag: Flag,
        /// Show the memo changes without sending them
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Total spend for an account (progress towards a minimum spend).
    Spend,
    /// Count credit cards opened in the last NUM_MONTHS months.
    Window {
        num_months: u32,
    },
    /// List payees that have no transactions attributed to them.
    UnusedPayees,
    /// Pick a category and add a flag to all of its transactions.
    FlagCategory {
        #[arg(value_parser = Flag::new)]
        flag: Flag,
        /// Show the memo changes without sending them
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Show where state is kept and what is currently set.
    Status,
    /// Show or change saved settings.
    Config {
        /// Save a default API base URL
        #[arg(long = "set-api-url", id = "set_api_url")]
        api_url: Option<String>,
        /// Save a default state directory
        #[arg(long = "set-state-dir", id = "set_state_dir")]
        state_dir: Option<String>,
        /// Save the HTTP request timeout in seconds
        #[arg(long = "set-timeout")]
        timeout_secs: Option<u64>,
    },
    /// Run commands interactively until `quit`.
    Shell,
    /// Print a shell completion script.
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Resolved configuration handed to every command.
pub struct Session {
    pub settings: Settings,
    pub store: Box<dyn StateStore>,
}

impl Session {
    pub fn from_cli(cli: &Cli) -> Self {
        let mut settings = load_settings();
        if let Some(url) = &cli.api_url {
            settings.api_url = url.clone();
        }
        let state_dir = cli
            .state_dir
            .clone()
            .unwrap_or_else(|| settings.state_dir());
        Self {
            settings,
            store: Box::new(FileStore::new(state_dir)),
        }
    }

    /// Reads the token fresh on every call.
    pub fn client(&self) -> Result<YnabClient> {
        let token = require_token(self.store.as_ref())?;
        YnabClient::new(&self.settings.api_url, token, self.settings.timeout_secs)
    }

    pub fn budget_id(&self) -> Result<String> {
        require_budget_id(self.store.as_ref())
    }
}

pub fn dispatch(session: &Session, prompter: &mut dyn Prompter, command: Commands) -> Result<()> {
    match command {
        Commands::Token { token } => token::set(session, prompter, token),
        Commands::DelToken => token::delete(session),
        Commands::Budget => budget::run(session, prompter),
        Commands::Total { flag } => total::run(session, &flag),
        Commands::Unflag { flag, dry_run } => unflag::run(session, &flag, dry_run),
        Commands::Spend => spend::run(session, prompter),
        Commands::Window { num_months } => window::run(session, num_months),
        Commands::UnusedPayees => payees::unused(session),
        Commands::FlagCategory { flag, dry_run } => {
            flag_category::run(session, prompter, &flag, dry_run)
        }
        Commands::Status => status::run(session),
        Commands::Config {
            api_url,
            state_dir,
            timeout_secs,
        } => config::run(api_url, state_dir, timeout_secs),
        Commands::Shell => shell::run(session, prompter),
        Commands::Completions { shell } => {
            shell::completions(shell);
            Ok(())
        }
    }
}

pub(crate) fn print_line(line: &Line) {
    let kind = if line.is_subtransaction {
        "Subtransaction"
    } else {
        "Transaction"
    };
    println!("{kind}: {}", line.id);
    println!("Account: {}", line.account_name);
    println!("Date: {}", line.date);
    println!("Payee: {}", line.payee_name.as_deref().unwrap_or(""));
    println!("Amount: {}", money(line.amount));
    println!("Memo: {}", line.memo.as_deref().unwrap_or(""));
}

/// Setup problems are guidance, not failures; print them plainly.
pub fn report_error(e: &YnabError) {
    if e.is_setup() {
        println!("{}", e.to_string().yellow());
    } else {
        eprintln!("{} {e}", "Error:".red());
    }
}
