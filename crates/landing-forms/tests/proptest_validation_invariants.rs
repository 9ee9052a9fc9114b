//! Property-based invariant tests for field validation and submission.
//!
//! Verifies:
//! 1. A required field whose value trims to empty always fails with
//!    `"<Label> is required"`.
//! 2. Any ten-digit phone in the accepted separators passes.
//! 3. Values with leading or trailing whitespace validate like their trim.
//! 4. An error slot is visible exactly when the field is invalid.
//! 5. Submit with any missing required field never reaches the transport.
//! 6. Validating twice gives the same answer.

use std::time::Duration;

use landing_core::notify::{Notifier, NotifyError, Severity};
use landing_forms::{
    Field, FieldKind, FieldSpec, FieldValidator, Form, RuleTable, SimulatedTransport,
    SubmissionController, SubmitOutcome, Validity,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_whitespace() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n')], 0..6)
        .prop_map(|chars| chars.into_iter().collect())
}

fn arb_contact_field() -> impl Strategy<Value = (&'static str, FieldKind, &'static str)> {
    prop_oneof![
        Just(("name", FieldKind::Text, "Name")),
        Just(("phone", FieldKind::Tel, "Phone")),
        Just(("email", FieldKind::Email, "Email")),
        Just(("serviceType", FieldKind::Select, "ServiceType")),
    ]
}

fn arb_phone() -> impl Strategy<Value = String> {
    let sep = prop_oneof![Just(""), Just("-"), Just("."), Just(" ")];
    (
        "[0-9]{3}",
        "[0-9]{3}",
        "[0-9]{4}",
        any::<bool>(),
        sep.clone(),
        sep,
    )
        .prop_map(|(a, b, c, parens, s1, s2)| {
            if parens {
                format!("({a}){s1}{b}{s2}{c}")
            } else {
                format!("{a}{s1}{b}{s2}{c}")
            }
        })
}

fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,60}",
        "[0-9().\\- ]{0,16}",
        "[a-z]{1,8}@[a-z]{1,8}(\\.[a-z]{2,3})?",
        ".{0,20}",
    ]
}

#[derive(Default)]
struct Count(usize);

impl Notifier for Count {
    fn notify(&mut self, _: &str, _: Severity, _: Duration) -> Result<(), NotifyError> {
        self.0 += 1;
        Ok(())
    }
}

fn required_field(name: &str, kind: FieldKind, value: &str) -> Field {
    let mut field = Field::new(FieldSpec::new(name, kind).required());
    field.set_value(value);
    field
}

proptest! {
    #[test]
    fn required_blank_always_fails_with_label(
        (name, kind, label) in arb_contact_field(),
        blank in arb_whitespace(),
    ) {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut field = required_field(name, kind, &blank);
        prop_assert!(!validator.validate(&mut field));
        let expected = format!("{label} is required");
        prop_assert_eq!(field.error(), Some(expected.as_str()));
    }

    #[test]
    fn formatted_phone_numbers_pass(phone in arb_phone()) {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut field = required_field("phone", FieldKind::Tel, &phone);
        prop_assert!(validator.validate(&mut field), "rejected {phone:?}");
    }

    #[test]
    fn surrounding_whitespace_is_ignored(
        (name, kind, _) in arb_contact_field(),
        value in arb_value(),
        pad_left in arb_whitespace(),
        pad_right in arb_whitespace(),
    ) {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let bare = required_field(name, kind, value.trim());
        let padded = required_field(name, kind, &format!("{pad_left}{value}{pad_right}"));
        prop_assert_eq!(validator.check(&bare), validator.check(&padded));
    }

    #[test]
    fn slot_visible_iff_invalid(
        (name, kind, _) in arb_contact_field(),
        value in arb_value(),
    ) {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut field = required_field(name, kind, &value);
        let ok = validator.validate(&mut field);
        let visible = field.error_slot().is_some_and(|slot| slot.is_visible());
        prop_assert_eq!(visible, !ok);
        prop_assert_eq!(field.validity() == Validity::Invalid, !ok);
    }

    #[test]
    fn validation_is_idempotent(
        (name, kind, _) in arb_contact_field(),
        value in arb_value(),
    ) {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut field = required_field(name, kind, &value);
        let first = validator.validate(&mut field);
        let error = field.error().map(str::to_string);
        prop_assert_eq!(validator.validate(&mut field), first);
        prop_assert_eq!(field.error().map(str::to_string), error);
    }

    #[test]
    fn missing_required_field_never_submits(blank_index in 0usize..4) {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut form = Form::contact().unwrap();
        let values = [
            ("name", "Jane Doe"),
            ("phone", "555 123 4567"),
            ("email", "jane@example.com"),
            ("serviceType", "consultation"),
        ];
        for (i, (name, value)) in values.iter().enumerate() {
            let value = if i == blank_index { "" } else { value };
            form.field_mut(name).unwrap().set_value(value);
        }

        let mut notes = Count::default();
        let mut ctl = SubmissionController::new(SimulatedTransport::default());
        let outcome = ctl
            .submit(&mut form, &validator, &mut notes, Duration::ZERO)
            .unwrap();
        prop_assert_eq!(outcome, SubmitOutcome::Invalid(vec![values[blank_index].0.to_string()]));
        prop_assert!(!ctl.is_in_flight());
        prop_assert!(!ctl.control().is_disabled());
        prop_assert_eq!(notes.0, 1);
    }
}
