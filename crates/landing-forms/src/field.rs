#![forbid(unsafe_code)]

//! Form field state and its inline error display.
//!
//! # Invariants
//!
//! 1. A field is `Invalid` exactly when its error slot (if present) is visible.
//! 2. Clearing an error never touches the value.
//! 3. A field without an error slot still tracks validity; only the visible
//!    side effect is skipped.

use serde::{Deserialize, Serialize};

/// Border color of a field that failed validation.
pub const BORDER_INVALID: &str = "#ff6b6b";

/// Border color of a field in its neutral state.
pub const BORDER_NEUTRAL: &str = "rgba(255, 255, 255, 0.2)";

/// Suffix appended to a field name to form its error element id.
pub const ERROR_SLOT_SUFFIX: &str = "Error";

/// The kind of form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `<input type="text">`.
    #[default]
    Text,
    /// `<input type="email">`.
    Email,
    /// `<input type="tel">`.
    Tel,
    /// `<select>`.
    Select,
    /// `<textarea>`.
    TextArea,
}

impl FieldKind {
    /// Whether this control is an `<input>` element.
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Text | Self::Email | Self::Tel)
    }

    /// Whether this control is a `<select>` element.
    #[must_use]
    pub const fn is_select(self) -> bool {
        matches!(self, Self::Select)
    }
}

/// Static description of a field, as declared in the page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The control's `name` attribute.
    pub name: String,
    /// Control kind.
    #[serde(default)]
    pub kind: FieldKind,
    /// Whether the control carries the `required` attribute.
    #[serde(default)]
    pub required: bool,
    /// Whether the page has a `<name>Error` element for this field.
    #[serde(default = "default_true")]
    pub error_slot: bool,
}

fn default_true() -> bool {
    true
}

impl FieldSpec {
    /// A field with an error slot.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            error_slot: true,
        }
    }

    /// Mark the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declare that the page has no error element for this field.
    #[must_use]
    pub fn without_error_slot(mut self) -> Self {
        self.error_slot = false;
        self
    }

    /// Id of the error element for this field.
    #[must_use]
    pub fn error_slot_id(&self) -> String {
        format!("{}{ERROR_SLOT_SUFFIX}", self.name)
    }

    /// Human label: the field name with its first character upper-cased.
    #[must_use]
    pub fn label(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Validity of a control.
///
/// Reflected in the border color only when the page has an error slot for
/// the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    /// Never validated, or error cleared.
    #[default]
    Neutral,
    /// Passed validation.
    Valid,
    /// Failed validation.
    Invalid,
}

impl Validity {
    /// Border color for this state.
    #[must_use]
    pub const fn border_color(self) -> &'static str {
        match self {
            Self::Invalid => BORDER_INVALID,
            Self::Neutral | Self::Valid => BORDER_NEUTRAL,
        }
    }
}

/// State of the inline `<name>Error` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    visible: bool,
    message: String,
}

impl ErrorSlot {
    /// Show `message` in the slot.
    pub fn show(&mut self, message: impl Into<String>) {
        self.visible = true;
        self.message = message.into();
    }

    /// Hide the slot. The last message is kept as text content, like the
    /// element keeps its text when the `show` class is removed.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the slot is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last message written to the slot.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A live form field: its spec, value, and visible validation state.
#[derive(Debug, Clone)]
pub struct Field {
    spec: FieldSpec,
    value: String,
    validity: Validity,
    error: Option<String>,
    slot: Option<ErrorSlot>,
}

impl Field {
    /// Mount a field with an empty value.
    #[must_use]
    pub fn new(spec: FieldSpec) -> Self {
        let slot = spec.error_slot.then(ErrorSlot::default);
        Self {
            spec,
            value: String::new(),
            validity: Validity::Neutral,
            error: None,
            slot,
        }
    }

    /// Static description.
    #[must_use]
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Raw current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current value with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_value(&self) -> &str {
        self.value.trim()
    }

    /// Replace the current value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Current validity.
    #[must_use]
    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// Error text of the last failed validation, if the field is invalid.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The inline error slot, if the page has one for this field.
    #[must_use]
    pub fn error_slot(&self) -> Option<&ErrorSlot> {
        self.slot.as_ref()
    }

    /// Record a failed validation. Returns `false` if there was no slot to
    /// show the message in.
    pub fn mark_invalid(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        self.validity = Validity::Invalid;
        let shown = match self.slot.as_mut() {
            Some(slot) => {
                slot.show(message.clone());
                true
            }
            None => false,
        };
        self.error = Some(message);
        shown
    }

    /// Record a passed validation.
    pub fn mark_valid(&mut self) {
        self.validity = Validity::Valid;
        self.error = None;
        if let Some(slot) = self.slot.as_mut() {
            slot.hide();
        }
    }

    /// Hide the error display without re-validating (user is typing).
    ///
    /// Like the page it models, this is a no-op when there is no error slot.
    pub fn clear_error(&mut self) {
        if let Some(slot) = self.slot.as_mut() {
            slot.hide();
            self.validity = Validity::Neutral;
            self.error = None;
        }
    }

    /// Clear the value, as a native form reset does. The error display is
    /// left untouched.
    pub fn reset_value(&mut self) {
        self.value.clear();
    }
}
