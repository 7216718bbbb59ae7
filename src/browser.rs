//! Opening problem links in a web browser.

use crate::error::{RecallError, Result};
use std::process::Command;

/// Opens `url` with `command` if one is configured, otherwise with the system default.
pub fn open_url(url: &str, command: Option<&str>) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(RecallError::InvalidInput("no URL to open".to_string()));
    }

    match command.map(str::trim).filter(|c| !c.is_empty()) {
        Some(browser) => {
            log::debug!("Opening {} with {}", url, browser);
            Command::new(browser).arg(url).spawn()?;
        }
        None => {
            log::debug!("Opening {} with the system browser", url);
            open::that_detached(url)?;
        }
    }
    Ok(())
}
