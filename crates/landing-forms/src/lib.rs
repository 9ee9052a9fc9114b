#![forbid(unsafe_code)]

//! Contact form: field rules, inline error display, and submission.
//!
//! # Overview
//!
//! - [`rules::RuleTable`] maps field names to a compiled pattern and message.
//! - [`validator::FieldValidator`] applies the table to one [`field::Field`].
//! - [`form::Form`] holds the fields in document order.
//! - [`submission::SubmissionController`] validates on submit, hands the
//!   payload to a [`transport::SubmissionTransport`], and reports the result
//!   through a [`landing_core::notify::Notifier`].
//!
//! # Example
//!
//! ```
//! use landing_forms::{FieldValidator, Form, RuleTable};
//!
//! let rules = RuleTable::contact().unwrap();
//! let validator = FieldValidator::new(&rules);
//! let mut form = Form::contact().unwrap();
//!
//! let field = form.field_mut("email").unwrap();
//! field.set_value("someone@example");
//! assert!(!validator.validate(field));
//! assert_eq!(field.error(), Some("Please enter a valid email address"));
//! ```

pub mod field;
pub mod form;
pub mod payload;
pub mod rules;
pub mod submission;
pub mod transport;
pub mod validator;
pub mod validators;

pub use field::{ErrorSlot, Field, FieldKind, FieldSpec, Validity};
pub use form::{Form, FormError, contact_fields};
pub use payload::FormPayload;
pub use rules::{FieldRule, RuleError, RuleSpec, RuleTable, contact_rule_specs};
pub use submission::{
    AttemptOutcome, MSG_FAILURE, MSG_INVALID, MSG_SUCCESS, Resolution, SubmissionAttempt,
    SubmissionController, SubmissionEvent, SubmissionPhase, SubmissionToken, SubmissionTrace,
    SubmitControl, SubmitOutcome,
};
pub use transport::{
    HostTransport, ScriptedTransport, SimulatedTransport, SubmissionTransport, TransportError,
};
pub use validator::FieldValidator;
pub use validators::{Pattern, Required, ValidationError, ValidationResult, Validator};
