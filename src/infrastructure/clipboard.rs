use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),
    #[error("failed to copy to clipboard: {0}")]
    Write(#[source] arboard::Error),
}

pub struct ClipboardService;

impl ClipboardService {
    /// Puts `text` on the system clipboard.
    ///
    /// # Errors
    ///
    /// [`ClipboardError::Unavailable`] when no clipboard can be opened (for
    /// example over SSH without a display), [`ClipboardError::Write`] when
    /// the clipboard refuses the text.
    pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new().map_err(ClipboardError::Unavailable)?;
        clipboard.set_text(text.to_string()).map_err(ClipboardError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages_keep_source() {
        let err = ClipboardError::Unavailable(arboard::Error::ClipboardNotSupported);
        assert!(err.to_string().starts_with("clipboard unavailable: "));
        assert!(err.source().is_some());

        let err = ClipboardError::Write(arboard::Error::ContentNotAvailable);
        assert!(err.to_string().starts_with("failed to copy to clipboard: "));
    }
}
