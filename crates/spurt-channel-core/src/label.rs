//! Field label rule shared by the channel builder forms.

use crate::error::SelectionError;

/// Message shown next to a label that breaks the leading-character rule.
pub const LEADING_CHAR_MESSAGE: &str = "Cannot start with space or hyphen";

/// Check that `label` starts with something other than whitespace or `-`.
///
/// Empty labels fail too, since there is no first character to accept.
pub fn validate_label(label: &str) -> Result<(), SelectionError> {
    match label.chars().next() {
        None => Err(SelectionError::InvalidLabel("label must not be empty")),
        Some(c) if c == '-' || c.is_whitespace() => {
            Err(SelectionError::InvalidLabel(LEADING_CHAR_MESSAGE))
        }
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_labels() {
        assert!(validate_label("Title").is_ok());
        assert!(validate_label("9 lives").is_ok());
        assert!(validate_label("a-b c").is_ok());
    }

    #[test]
    fn test_rejects_leading_space_or_hyphen() {
        for bad in [" Title", "\tTitle", "-Title", "\u{a0}Title"] {
            assert_eq!(
                validate_label(bad),
                Err(SelectionError::InvalidLabel(LEADING_CHAR_MESSAGE)),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate_label(""),
            Err(SelectionError::InvalidLabel(_))
        ));
    }
}
