use crate::error::{Result, YnabError};
use crate::settings::{load_settings, save_settings, settings_path};

pub fn run(api_url: Option<String>, state_dir: Option<String>, timeout_secs: Option<u64>) -> Result<()> {
    let mut settings = load_settings();
    let changed = api_url.is_some() || state_dir.is_some() || timeout_secs.is_some();

    if let Some(url) = api_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(YnabError::Settings(format!("API URL must start with http(s)://: {url}")));
        }
        settings.api_url = url;
    }
    if let Some(dir) = state_dir {
        settings.state_dir = Some(dir);
    }
    if let Some(secs) = timeout_secs {
        if secs == 0 {
            return Err(YnabError::Settings("Timeout must be at least 1 second".to_string()));
        }
        settings.timeout_secs = secs;
    }

    if changed {
        save_settings(&settings)?;
        println!("Saved {}", settings_path().display());
    }

    println!("api_url:      {}", settings.api_url);
    println!(
        "state_dir:    {}",
        settings.state_dir.as_deref().unwrap_or("(current directory)")
    );
    println!("timeout_secs: {}", settings.timeout_secs);
    Ok(())
}
