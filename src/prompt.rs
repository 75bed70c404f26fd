use dialoguer::{Confirm, Input};
use zeroize::Zeroizing;

use crate::error::{Result, YnabError};

/// Blank input cancels; anything else must be an index into the list.
pub fn parse_selection(input: &str, len: usize) -> Result<Option<usize>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let index: usize = input
        .parse()
        .map_err(|_| YnabError::InvalidSelection(format!("{input:?} is not a number")))?;
    if index >= len {
        return Err(YnabError::InvalidSelection(format!(
            "{index} is out of range (0-{})",
            len.saturating_sub(1)
        )));
    }
    Ok(Some(index))
}

pub trait Prompter {
    fn input(&mut self, prompt: &str) -> Result<String>;
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
    fn secret(&mut self, prompt: &str) -> Result<Zeroizing<String>>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new(rpassword::prompt_password(format!("{prompt}: "))?))
    }
}

/// Ask for an index into `items`. `Ok(None)` means the user cancelled.
pub fn choose<'a, T>(
    prompter: &mut dyn Prompter,
    question: &str,
    items: &'a [T],
) -> Result<Option<&'a T>> {
    if items.is_empty() {
        return Ok(None);
    }
    let answer = prompter.input(&format!(
        "{question} Input the number (or nothing to cancel)"
    ))?;
    Ok(parse_selection(&answer, items.len())?.map(|i| &items[i]))
}
