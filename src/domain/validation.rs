//! Field validators shared by the entity drafts.

use std::borrow::Cow;

use validator::ValidationError;

/// Codes are `UPPER_SNAKE_CASE`: an ASCII capital first, then capitals,
/// digits or underscores.
///
/// # Errors
///
/// Returns a `code` validation error when the format does not match.
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    let mut chars = code.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    let valid_rest = chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(ValidationError::new("code")
            .with_message(Cow::Borrowed("must be UPPER_SNAKE_CASE, e.g. PENDING_PAYMENT")))
    }
}

/// Colors are CSS hex triplets: `#rgb` or `#rrggbb`.
///
/// # Errors
///
/// Returns a `color` validation error when the format does not match.
pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("color")
            .with_message(Cow::Borrowed("must be a hex color such as #1f8b4c")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert!(validate_code("PENDING").is_ok());
        assert!(validate_code("ON_HOLD_2").is_ok());
        assert!(validate_code("").is_err());
        assert!(validate_code("pending").is_err());
        assert!(validate_code("2FA").is_err());
        assert!(validate_code("IN PROGRESS").is_err());
    }

    #[test]
    fn colors() {
        assert!(validate_color("#fff").is_ok());
        assert!(validate_color("#1F8B4C").is_ok());
        assert!(validate_color("1f8b4c").is_err());
        assert!(validate_color("#12345").is_err());
        assert!(validate_color("#gggggg").is_err());
    }
}
