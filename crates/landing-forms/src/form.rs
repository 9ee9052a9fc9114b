#![forbid(unsafe_code)]

//! The contact form: an ordered set of fields.

use crate::field::{Field, FieldKind, FieldSpec};
use crate::payload::FormPayload;
use crate::rules::RuleError;
use crate::validator::FieldValidator;

/// Failure to assemble a form.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Two fields share a name.
    #[error("duplicate field `{0}`")]
    DuplicateField(String),
    /// Strict mode: a field has no `<name>Error` element.
    #[error("field `{field}` has no error element `{slot_id}`")]
    MissingErrorSlot { field: String, slot_id: String },
    /// The rule table could not be built.
    #[error(transparent)]
    Rules(#[from] RuleError),
}

/// Fields of the shipped contact form.
#[must_use]
pub fn contact_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", FieldKind::Text).required(),
        FieldSpec::new("phone", FieldKind::Tel).required(),
        FieldSpec::new("email", FieldKind::Email).required(),
        FieldSpec::new("serviceType", FieldKind::Select).required(),
        FieldSpec::new("message", FieldKind::TextArea),
    ]
}

fn checked_on_submit(spec: &FieldSpec) -> bool {
    spec.required && (spec.kind.is_input() || spec.kind.is_select())
}

/// Ordered collection of live fields.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    /// Mount a form from field specs.
    ///
    /// With `strict_error_slots`, every field must declare an error slot.
    pub fn new(specs: Vec<FieldSpec>, strict_error_slots: bool) -> Result<Self, FormError> {
        let mut fields: Vec<Field> = Vec::with_capacity(specs.len());
        for spec in specs {
            if fields.iter().any(|f| f.name() == spec.name) {
                return Err(FormError::DuplicateField(spec.name));
            }
            if strict_error_slots && !spec.error_slot {
                return Err(FormError::MissingErrorSlot {
                    slot_id: spec.error_slot_id(),
                    field: spec.name,
                });
            }
            fields.push(Field::new(spec));
        }
        Ok(Self { fields })
    }

    /// The shipped contact form.
    pub fn contact() -> Result<Self, FormError> {
        Self::new(contact_fields(), false)
    }

    /// All fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Mutable field by name.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Fields checked on submit: required inputs and selects.
    pub fn submit_checked(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| checked_on_submit(f.spec()))
    }

    /// Validate every submit-checked field, without short-circuiting, so all
    /// errors become visible at once. Returns the names of failing fields.
    pub fn validate_for_submit(&mut self, validator: &FieldValidator<'_>) -> Vec<String> {
        let mut failed = Vec::new();
        for field in &mut self.fields {
            if checked_on_submit(field.spec()) && !validator.validate(field) {
                failed.push(field.name().to_string());
            }
        }
        failed
    }

    /// Snapshot of the trimmed values, in field order.
    #[must_use]
    pub fn payload(&self) -> FormPayload {
        self.fields
            .iter()
            .map(|f| (f.name().to_string(), f.trimmed_value().to_string()))
            .collect()
    }

    /// Clear every value (native form reset).
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset_value();
        }
    }
}
