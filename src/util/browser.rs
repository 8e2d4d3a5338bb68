use anyhow::{Result, bail};
use tracing::debug;

/// Open a document or hearing link in the user's default browser.
pub fn open_url(url: &str) -> Result<()> {
    if !url.starts_with("https://") && !url.starts_with("http://") {
        bail!("Refusing to open non-web link: {}", url);
    }
    debug!(url = url, "Opening link in browser");
    open::that(url)?;
    Ok(())
}
