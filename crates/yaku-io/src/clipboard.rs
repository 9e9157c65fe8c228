use arboard::Clipboard;

/// Copies an accepted translation so it can be pasted elsewhere.
pub fn copy_text(text: &str) -> Result<(), anyhow::Error> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
