use std::io::{self, BufRead, Write};

use clap::{CommandFactory, Parser};
use colored::Colorize;

use crate::cli::{dispatch, report_error, Cli, Commands, Session};
use crate::error::Result;
use crate::prompt::Prompter;

#[derive(Parser)]
#[command(name = "ynab-cli", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

enum Step {
    Run(Commands),
    Help,
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> Step {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.first().map(|w| w.to_lowercase()).as_deref() {
        None | Some("help") => Step::Help,
        Some("quit" | "q" | "exit") => Step::Quit,
        Some(_) => match ShellLine::try_parse_from(words.iter().copied()) {
            Ok(parsed) => Step::Run(parsed.command),
            Err(e) => Step::Invalid(e.to_string()),
        },
    }
}

/// Read-dispatch loop. Command errors are printed and the loop keeps going.
pub fn run(session: &Session, prompter: &mut dyn Prompter) -> Result<()> {
    println!("{}", "=== YNAB CLI ===".bold());
    println!("Type `help` for commands, `quit` to exit.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if !read_command(&mut stdin.lock(), &mut line)? {
            println!();
            break;
        }

        match parse_line(&line) {
            Step::Quit => break,
            Step::Help => {
                ShellLine::command().print_help()?;
            }
            Step::Invalid(message) => eprint!("{message}"),
            Step::Run(Commands::Shell) => println!("Already in the shell."),
            Step::Run(command) => {
                if let Err(e) = dispatch(session, prompter, command) {
                    tracing::debug!("command failed: {e:?}");
                    report_error(&e);
                }
            }
        }
    }

    println!("Quitting.");
    Ok(())
}

/// Reads one line; false at end of input. Callers hold the lock only for
/// the read so commands can prompt on the same stdin.
fn read_command(input: &mut impl BufRead, line: &mut String) -> io::Result<bool> {
    Ok(input.read_line(line)? > 0)
}

pub fn completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "ynab-cli", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_and_help() {
        assert!(matches!(parse_line("quit\n"), Step::Quit));
        assert!(matches!(parse_line("Q"), Step::Quit));
        assert!(matches!(parse_line("   \n"), Step::Help));
        assert!(matches!(parse_line("help"), Step::Help));
    }

    #[test]
    fn test_parse_commands() {
        match parse_line("total churn\n") {
            Step::Run(Commands::Total { flag }) => assert_eq!(flag.as_str(), "#churn"),
            _ => panic!("expected total"),
        }
        assert!(matches!(
            parse_line("unflag #Trip --dry-run"),
            Step::Run(Commands::Unflag { dry_run: true, .. })
        ));
        assert!(matches!(
            parse_line("window 24"),
            Step::Run(Commands::Window { num_months: 24 })
        ));
    }

    #[test]
    fn test_read_command_per_line() {
        let mut input = io::Cursor::new("status\nquit\n");
        let mut line = String::new();
        assert!(read_command(&mut input, &mut line).unwrap());
        assert_eq!(line, "status\n");
        line.clear();
        assert!(read_command(&mut input, &mut line).unwrap());
        assert!(matches!(parse_line(&line), Step::Quit));
        line.clear();
        assert!(!read_command(&mut input, &mut line).unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse_line("frobnicate"), Step::Invalid(_)));
        assert!(matches!(parse_line("window soon"), Step::Invalid(_)));
        assert!(matches!(parse_line("total"), Step::Invalid(_)));
        assert!(matches!(parse_line("total #"), Step::Invalid(_)));
    }
}
