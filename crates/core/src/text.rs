//! String validation helpers shared by repositories and handlers.

use crate::error::CoreError;

/// `true` if the string is empty or whitespace-only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Require a non-blank string, naming the offending field in the error.
pub fn require_not_blank(field: &'static str, s: &str) -> Result<(), CoreError> {
    if is_blank(s) {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Require that an optional string, when present, is not blank.
pub fn require_not_blank_opt(field: &'static str, s: Option<&str>) -> Result<(), CoreError> {
    match s {
        Some(s) => require_not_blank(field, s),
        None => Ok(()),
    }
}
