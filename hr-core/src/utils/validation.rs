//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! use-case handlers before anything touches the aggregate.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Person names, job titles, task names
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, archive/offboarding reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, department id, due-date strings
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal shape check: non-empty local part and domain with a dot.
/// Full format validation is the transport layer's concern.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let v = value.trim();
    let valid = match v.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation(format!("Invalid email: {v}")));
    }
    Ok(())
}

/// Progress percentage bounds
pub fn validate_progress(value: i32) -> Result<(), AppError> {
    if !(0..=100).contains(&value) {
        return Err(AppError::validation(
            "progress must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "note", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("short".into()), "note", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("y".repeat(501)), "note", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("a@x").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("nope").is_err());
    }

    #[test]
    fn test_progress_bounds() {
        assert!(validate_progress(0).is_ok());
        assert!(validate_progress(100).is_ok());
        assert!(validate_progress(101).is_err());
        assert!(validate_progress(-1).is_err());
    }
}
