#![forbid(unsafe_code)]

//! Static field rules: pattern and fixed error text per field name.
//!
//! A [`RuleTable`] is built once at page start and is read-only afterwards.
//! Pattern and message lookups are independent: a field may carry a message
//! without a pattern (select fields use the message for "nothing chosen").

use serde::{Deserialize, Serialize};

use crate::validators::Pattern;

/// Failure to build a rule table.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// The same field name appears twice in one rule list.
    #[error("duplicate rule for field `{0}`")]
    DuplicateField(String),
}

/// Serializable description of one rule, as found in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Field name the rule applies to.
    pub field: String,
    /// Regular expression the trimmed value must match, if any.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Fixed error text shown when the rule fails.
    pub message: String,
}

impl RuleSpec {
    /// Create a rule with a pattern.
    #[must_use]
    pub fn pattern(
        field: impl Into<String>,
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            pattern: Some(pattern.into()),
            message: message.into(),
        }
    }

    /// Create a message-only rule.
    #[must_use]
    pub fn message_only(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            pattern: None,
            message: message.into(),
        }
    }
}

/// The rules shipped with the contact form.
#[must_use]
pub fn contact_rule_specs() -> Vec<RuleSpec> {
    vec![
        RuleSpec::pattern(
            "name",
            r"^[a-zA-Z\s]{2,50}$",
            "Please enter a valid name (2-50 characters, letters only)",
        ),
        RuleSpec::pattern(
            "phone",
            r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$",
            "Please enter a valid phone number",
        ),
        RuleSpec::pattern(
            "email",
            r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
            "Please enter a valid email address",
        ),
        RuleSpec::message_only("serviceType", "Please select a service type"),
    ]
}

/// A compiled rule for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: String,
    pattern: Option<Pattern>,
    message: String,
}

impl FieldRule {
    /// Compile a rule from its spec.
    pub fn compile(spec: &RuleSpec) -> Result<Self, RuleError> {
        let pattern = spec
            .pattern
            .as_deref()
            .map(|p| Pattern::new(p, spec.message.clone()))
            .transpose()?;
        Ok(Self {
            field: spec.field.clone(),
            pattern,
            message: spec.message.clone(),
        })
    }

    /// Field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Compiled pattern, if the rule has one.
    #[must_use]
    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Fixed error text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Read-only mapping from field name to rule.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<FieldRule>,
}

impl RuleTable {
    /// An empty table (no field has a pattern).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The contact form's default rules.
    pub fn contact() -> Result<Self, RuleError> {
        Self::from_specs(&contact_rule_specs())
    }

    /// Compile a table from specs. Field names must be unique.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, RuleError> {
        let mut rules: Vec<FieldRule> = Vec::with_capacity(specs.len());
        for spec in specs {
            if rules.iter().any(|r| r.field == spec.field) {
                return Err(RuleError::DuplicateField(spec.field.clone()));
            }
            rules.push(FieldRule::compile(spec)?);
        }
        Ok(Self { rules })
    }

    /// Defaults with `overrides` applied: a spec for an existing field
    /// replaces it, a spec for a new field is appended.
    pub fn with_overrides(base: &[RuleSpec], overrides: &[RuleSpec]) -> Result<Self, RuleError> {
        let mut merged = base.to_vec();
        for spec in overrides {
            match merged.iter_mut().find(|r| r.field == spec.field) {
                Some(slot) => *slot = spec.clone(),
                None => merged.push(spec.clone()),
            }
        }
        Self::from_specs(&merged)
    }

    /// Rule for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Pattern for `field`, if any.
    #[must_use]
    pub fn pattern(&self, field: &str) -> Option<&Pattern> {
        self.get(field).and_then(FieldRule::pattern)
    }

    /// Error text for `field`, if any.
    #[must_use]
    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).map(FieldRule::message)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
