mod api;
mod cli;
mod editor;
mod error;
mod flags;
mod fmt;
mod logging;
mod models;
mod prompt;
mod reports;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Session};
use logging::LogLevel;
use prompt::TerminalPrompter;

fn main() {
    let cli = Cli::parse();
    logging::init(LogLevel::from_flags(cli.debug, cli.verbose));

    let session = Session::from_cli(&cli);
    let mut prompter = TerminalPrompter;

    if let Err(e) = cli::dispatch(&session, &mut prompter, cli.command) {
        tracing::debug!("command failed: {e:?}");
        cli::report_error(&e);
        if !e.is_setup() {
            std::process::exit(1);
        }
    }
}
