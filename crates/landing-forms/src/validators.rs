#![forbid(unsafe_code)]

//! The two checks a contact field can fail: presence and format.

use regex::Regex;

use crate::rules::RuleError;

/// Code of a missing required value.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Code of a value that does not match its field's pattern.
pub const ERROR_CODE_PATTERN: &str = "pattern";

/// A failed check: a stable code plus the text shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// [`ERROR_CODE_REQUIRED`] or [`ERROR_CODE_PATTERN`].
    pub code: &'static str,
    /// Inline error text.
    pub message: String,
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// Passed.
    #[default]
    Valid,
    /// Failed.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Whether the check failed.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// A check over a trimmed field value.
pub trait Validator {
    /// Check `value`.
    fn validate(&self, value: &str) -> ValidationResult;
}

/// Fails on a blank value, naming the field by its label.
#[derive(Debug, Clone)]
pub struct Required {
    label: String,
}

impl Required {
    /// Presence check for a field shown as `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Validator for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.trim().is_empty() {
            ValidationResult::Invalid(ValidationError {
                code: ERROR_CODE_REQUIRED,
                message: format!("{} is required", self.label),
            })
        } else {
            ValidationResult::Valid
        }
    }
}

/// Fails unless the value matches a regular expression; the message is fixed.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: String,
}

impl Pattern {
    /// Compile `pattern` into a check failing with `message`.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            message: message.into(),
        })
    }

    /// Whether `value` matches.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl Validator for Pattern {
    fn validate(&self, value: &str) -> ValidationResult {
        if self.is_match(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError {
                code: ERROR_CODE_PATTERN,
                message: self.message.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failure(result: ValidationResult) -> ValidationError {
        match result {
            ValidationResult::Invalid(e) => e,
            ValidationResult::Valid => panic!("expected a failure"),
        }
    }

    #[test]
    fn required_rejects_blank() {
        let v = Required::new("Name");
        assert!(v.validate("").is_invalid());
        assert!(v.validate("   ").is_invalid());
        assert_eq!(v.validate("x"), ValidationResult::Valid);
    }

    #[test]
    fn required_message_names_the_field() {
        let e = failure(Required::new("Phone").validate(""));
        assert_eq!(e.code, ERROR_CODE_REQUIRED);
        assert_eq!(e.to_string(), "Phone is required");
    }

    #[test]
    fn pattern_uses_fixed_message() {
        let v = Pattern::new(r"^\d+$", "Digits only").unwrap();
        assert_eq!(v.validate("123"), ValidationResult::Valid);
        let e = failure(v.validate("12a"));
        assert_eq!(e.code, ERROR_CODE_PATTERN);
        assert_eq!(e.message, "Digits only");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = Pattern::new("(unclosed", "x").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }
}
