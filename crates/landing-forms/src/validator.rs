#![forbid(unsafe_code)]

//! Applies the rule table to a single field.
//!
//! Precedence, evaluated on the trimmed value:
//!
//! 1. required and empty: `"<Field> is required"`;
//! 2. non-empty with a pattern for the field name: the rule's fixed text
//!    unless the value matches;
//! 3. otherwise valid.
//!
//! A required select with nothing chosen is covered by (1).

use landing_core::debug;

use crate::field::Field;
use crate::rules::RuleTable;
use crate::validators::{Required, ValidationResult, Validator};

/// Validates fields against a [`RuleTable`].
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator<'a> {
    rules: &'a RuleTable,
}

impl<'a> FieldValidator<'a> {
    /// Create a validator over `rules`.
    #[must_use]
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Evaluate `field` without touching its state.
    #[must_use]
    pub fn check(&self, field: &Field) -> ValidationResult {
        let value = field.trimmed_value();
        let spec = field.spec();

        if spec.required && value.is_empty() {
            return Required::new(spec.label()).validate(value);
        }
        if !value.is_empty() {
            if let Some(pattern) = self.rules.pattern(&spec.name) {
                return pattern.validate(value);
            }
        }
        ValidationResult::Valid
    }

    /// Validate `field` and update its visible error state.
    ///
    /// Always returns a definite answer. A field with no error slot is
    /// validated normally; only the display update is skipped.
    pub fn validate(&self, field: &mut Field) -> bool {
        match self.check(field) {
            ValidationResult::Valid => {
                field.mark_valid();
                debug!(field = field.name(), "field valid");
                true
            }
            ValidationResult::Invalid(error) => {
                if !field.mark_invalid(error.message.as_str()) {
                    debug!(field = field.name(), "no error slot; display skipped");
                }
                debug!(field = field.name(), code = error.code, "field invalid");
                false
            }
        }
    }
}
