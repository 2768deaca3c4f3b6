//! Utility functions used across the bgrecap pipeline

use crate::{RecapError, Result};

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RecapError::bad_request(format!(
            "{field_name} cannot be empty"
        )))
    } else {
        Ok(trimmed.to_string())
    }
}
