//! Text rules shared by posts and comments

use crate::error::DomainError;

/// Trim `text` and check it holds between 1 and `max` characters
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn normalize_text(text: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyText);
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::TooLong { max });
    }
    Ok(trimmed.to_string())
}
