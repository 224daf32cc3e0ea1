//! Per-field validation rules.
//!
//! Validation is the engine's one asynchronous boundary: the host runs a
//! [`Validator`] however it likes (inline, on a timer, against a remote
//! service) and feeds the outcome back with the session token it was issued
//! with. [`FieldRules`] is the built-in rule set.

use serde::Serialize;

use crate::types::FieldKey;

/// Result of validating one raw edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    /// User-correctable; the message is shown inline and the session stays
    /// open for retry.
    Invalid(String),
}

impl ValidationOutcome {
    fn invalid(message: &str) -> Self {
        Self::Invalid(message.to_string())
    }
}

/// Pluggable validation capability: `(field, raw text) → outcome`, delivered
/// back to the engine after an arbitrary delay.
pub trait Validator {
    fn validate(&self, field: FieldKey, raw: &str) -> ValidationOutcome;
}

/// The standard field rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRules;

impl Validator for FieldRules {
    fn validate(&self, field: FieldKey, raw: &str) -> ValidationOutcome {
        validate_field(field, raw)
    }
}

/// Validate raw text for a field:
/// - empty or whitespace-only text is invalid for every field
/// - salary must parse as a non-negative number
/// - performance must parse as a number in `[0, 10]`
/// - email must contain `@`
/// - everything else accepts any non-empty text
pub fn validate_field(field: FieldKey, raw: &str) -> ValidationOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ValidationOutcome::invalid("Value cannot be empty");
    }
    match field {
        FieldKey::Salary => match trimmed.parse::<f64>() {
            Ok(n) if n >= 0.0 => ValidationOutcome::Valid,
            _ => ValidationOutcome::invalid("Salary must be a positive number"),
        },
        FieldKey::Performance => match trimmed.parse::<f64>() {
            Ok(n) if (0.0..=10.0).contains(&n) => ValidationOutcome::Valid,
            _ => ValidationOutcome::invalid("Performance must be a number between 0 and 10"),
        },
        FieldKey::Email => {
            if trimmed.contains('@') {
                ValidationOutcome::Valid
            } else {
                ValidationOutcome::invalid("Email must contain @")
            }
        }
        _ => ValidationOutcome::Valid,
    }
}
