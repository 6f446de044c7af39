//! Form validation helpers.
//!
//! Every create/edit path checks its required fields here before a request
//! is built, so an empty form never reaches the network.

use crate::error::ValidationError;

/// Fails with [`ValidationError::MissingField`] when `value` is blank.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Trimmed non-empty value, or `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
