use zeroize::Zeroizing;

use crate::cli::Session;
use crate::error::{Result, YnabError};
use crate::prompt::Prompter;
use crate::store::StateKey;

pub fn set(session: &Session, prompter: &mut dyn Prompter, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(value) => Zeroizing::new(value),
        None => prompter.secret("YNAB personal access token")?,
    };
    if token.trim().is_empty() {
        return Err(YnabError::Other("Token cannot be empty.".to_string()));
    }
    session.store.set(StateKey::Token, &token)?;
    println!("Set token.");
    Ok(())
}

pub fn delete(session: &Session) -> Result<()> {
    if session.store.delete(StateKey::Token)? {
        println!("Deleted token.");
    } else {
        println!("No token was set.");
    }
    Ok(())
}
