//! Internal helpers for input validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so the engine enforces consistent invariants.

use crate::{EngineError, ResultEngine};

/// Trim a required text field and reject it when empty.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, treating blank input as absent.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Emails are compared case-insensitively, so they are stored lowercase.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = normalize_required_name(value, "email")?.to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(EngineError::InvalidName(format!("invalid email: {value}"))),
    }
}

/// Largest amount or limit accepted from callers, in minor units.
pub(crate) const MAX_AMOUNT_MINOR: i64 = 1_000_000_000_000_000;

/// Reject monetary inputs that are negative or above [`MAX_AMOUNT_MINOR`].
pub(crate) fn ensure_amount_in_range(amount_minor: i64, label: &str) -> ResultEngine<()> {
    if amount_minor < 0 {
        return Err(EngineError::InvalidAmount(format!("{label} must be >= 0")));
    }
    if amount_minor > MAX_AMOUNT_MINOR {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be <= {MAX_AMOUNT_MINOR}"
        )));
    }
    Ok(())
}
