//! Input validation applied before any text reaches the model

/// Texts at or below this many characters (after trimming) are rejected.
pub const MIN_TEXT_CHARS: usize = 5;

/// Check that submitted text is plausible email content.
///
/// Valid iff the trimmed text is longer than [`MIN_TEXT_CHARS`] characters
/// and contains at least one ASCII letter. Digit-, punctuation- or
/// whitespace-only input is rejected regardless of length.
pub fn is_valid_email_text(text: &str) -> bool {
    has_letter(text) && text.trim().chars().count() > MIN_TEXT_CHARS
}

fn has_letter(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}
