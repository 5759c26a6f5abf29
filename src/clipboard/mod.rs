//! System clipboard access for copying transcripts out of the TUI

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Maximum clipboard payload (4MB). A whole transcript fits comfortably;
/// anything bigger is likely a runaway.
const MAX_CLIPBOARD_SIZE: usize = 4 * 1024 * 1024;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard backed by arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Nothing to copy");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }
    Ok(())
}

#[cfg(test)]
fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)?;
    Ok(())
}

/// Copy text to the system clipboard.
///
/// # Errors
///
/// Returns an error if the text is empty or oversized, or if the system
/// clipboard is unavailable (headless environment, denied access).
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate before touching the clipboard so headless CI still gets the
    // right error for bad input
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
