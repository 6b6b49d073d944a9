use validator::ValidationError;

use crate::shared::constants::TITLE_MAX_LENGTH;

/// Reject strings that are empty or consist only of whitespace.
///
/// `length(min = 1)` alone lets `"   "` through, which the bill-board treats
/// as blank.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Non-blank title of at most [`TITLE_MAX_LENGTH`] characters.
///
/// Titles are stored trimmed, so surrounding whitespace does not count.
pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if value.trim().chars().count() > TITLE_MAX_LENGTH {
        let mut error = ValidationError::new("length");
        error.message = Some(format!("must be at most {} characters", TITLE_MAX_LENGTH).into());
        return Err(error);
    }
    Ok(())
}
